//! HTML → article text.

use scraper::{ElementRef, Html, Node, Selector};

use crate::FetchError;

/// Subtrees that never hold article text.
const SKIPPED: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form",
];

/// Containers tried in order; the first match is the article root.
const CONTAINERS: &[&str] = &["article", "main", "[role=main]", "body"];

/// Block elements whose text becomes one paragraph each.
const BLOCKS: &[&str] = &["h1", "h2", "h3", "p", "li", "blockquote"];

/// Readable content of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: Option<String>,
    /// Paragraphs joined by blank lines.
    pub text: String,
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Parse(format!("selector {css}: {e}")))
}

fn element_name<'a>(node: &'a Node) -> Option<&'a str> {
    node.as_element().map(|e| e.name())
}

fn is_skipped(el: &ElementRef) -> bool {
    el.ancestors()
        .chain(std::iter::once(**el))
        .any(|n| element_name(n.value()).is_some_and(|name| SKIPPED.contains(&name)))
}

/// Text of `el` with skipped subtrees removed and whitespace collapsed.
fn collapsed_text(el: &ElementRef) -> String {
    let mut words: Vec<&str> = Vec::new();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|a| a.id() != el.id())
            .any(|a| element_name(a.value()).is_some_and(|name| SKIPPED.contains(&name)));
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

fn has_block_ancestor(el: &ElementRef, root: &ElementRef) -> bool {
    el.ancestors()
        .take_while(|a| a.id() != root.id())
        .any(|a| element_name(a.value()).is_some_and(|name| BLOCKS.contains(&name)))
}

/// Extracts title and body text from an HTML document.
///
/// Nested blocks (a `p` inside an `li`) are read once, through the outermost block. When the
/// container has no block elements at all its whole text is used as a single paragraph.
pub fn extract_article(html: &str) -> Result<Article, FetchError> {
    let document = Html::parse_document(html);

    let mut root = None;
    for css in CONTAINERS {
        if let Some(found) = document.select(&selector(css)?).next() {
            root = Some(found);
            break;
        }
    }
    let root = root.unwrap_or_else(|| document.root_element());

    let blocks = selector(&BLOCKS.join(","))?;
    let mut paragraphs: Vec<String> = root
        .select(&blocks)
        .filter(|el| !is_skipped(el) && !has_block_ancestor(el, &root))
        .map(|el| collapsed_text(&el))
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.is_empty() {
        let whole = collapsed_text(&root);
        if !whole.is_empty() {
            paragraphs.push(whole);
        }
    }
    if paragraphs.is_empty() {
        return Err(FetchError::Empty);
    }

    let title = document
        .select(&selector("h1")?)
        .find(|el| !is_skipped(el))
        .or_else(|| document.select(&selector("title").ok()?).next())
        .map(|el| collapsed_text(&el))
        .filter(|t| !t.is_empty());

    Ok(Article {
        title,
        text: paragraphs.join("\n\n"),
    })
}
