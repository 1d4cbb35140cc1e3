//! Instruction rendering.

use tracing::{debug, warn};

use crate::catalog::{Length, StyleCatalog};

pub const PLACEHOLDER_TEXT: &str = "{text}";
pub const PLACEHOLDER_URL: &str = "{url}";
pub const PLACEHOLDER_LENGTH: &str = "{length}";

/// Substitutes `{name}` placeholders in one left-to-right pass.
///
/// Substituted values are never rescanned, so an article that itself contains `{url}` stays intact.
/// Unknown `{...}` sequences are copied as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        for (placeholder, value) in vars {
            if tail.starts_with(placeholder) {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
                continue 'scan;
            }
        }
        out.push('{');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// Renders the instruction for the text generator.
///
/// Returns an empty string when `style_id` is not in the catalog; callers must treat that as a
/// failure and not send it anywhere.
pub fn build_instruction(
    catalog: &StyleCatalog,
    text: &str,
    url: &str,
    style_id: &str,
    length: Length,
) -> String {
    let Some(style) = catalog.get(style_id) else {
        warn!(style = %style_id, "unknown style, instruction left empty");
        return String::new();
    };
    debug!(style = %style_id, length = %length, text_len = text.len(), "building instruction");
    let chars = length.chars().to_string();
    render(
        &style.template,
        &[
            (PLACEHOLDER_TEXT, text),
            (PLACEHOLDER_URL, url),
            (PLACEHOLDER_LENGTH, chars.as_str()),
        ],
    )
}
