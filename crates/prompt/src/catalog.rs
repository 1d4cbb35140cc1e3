//! Style and length catalogs.
//!
//! A style is a row of data (id, button label, instruction template). The built-in table ships in
//! `styles.toml`; operators can replace it with their own file without touching control flow.

use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::render::{PLACEHOLDER_TEXT, PLACEHOLDER_URL};

const BUILTIN_STYLES: &str = include_str!("../styles.toml");

/// Errors raised while loading or validating a style catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read style catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse style catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("style catalog is empty")]
    Empty,
    #[error("duplicate style id: {0}")]
    DuplicateId(String),
    #[error("style {0} has an empty id or label")]
    Blank(String),
    #[error("template of style {id} must contain {placeholder} {expected}")]
    Placeholder {
        id: String,
        placeholder: &'static str,
        expected: &'static str,
    },
}

/// One tone/format preset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Style {
    pub id: String,
    pub label: String,
    pub template: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "style", default)]
    styles: Vec<Style>,
}

/// Immutable, ordered table of styles. Order is the order the choices are offered in.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: Vec<Style>,
}

impl StyleCatalog {
    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_STYLES)
    }

    /// Loads a catalog from a TOML file with `[[style]]` tables.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.styles)
    }

    /// Validates and wraps the given styles.
    pub fn new(styles: Vec<Style>) -> Result<Self, CatalogError> {
        if styles.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for style in &styles {
            if style.id.trim().is_empty() || style.label.trim().is_empty() {
                return Err(CatalogError::Blank(style.id.clone()));
            }
            if !seen.insert(style.id.as_str()) {
                return Err(CatalogError::DuplicateId(style.id.clone()));
            }
            if style.template.matches(PLACEHOLDER_URL).count() != 1 {
                return Err(CatalogError::Placeholder {
                    id: style.id.clone(),
                    placeholder: PLACEHOLDER_URL,
                    expected: "exactly once",
                });
            }
            if !style.template.contains(PLACEHOLDER_TEXT) {
                return Err(CatalogError::Placeholder {
                    id: style.id.clone(),
                    placeholder: PLACEHOLDER_TEXT,
                    expected: "at least once",
                });
            }
        }
        Ok(Self { styles })
    }

    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Target length of the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    Short,
    Medium,
    Long,
}

impl Length {
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    /// Approximate character count requested from the generator.
    pub fn chars(self) -> u32 {
        match self {
            Length::Short => 500,
            Length::Medium => 1000,
            Length::Long => 1500,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Length::Short => "Короткий",
            Length::Medium => "Средний",
            Length::Long => "Длинный",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown length: {0}")]
pub struct UnknownLength(pub String);

impl FromStr for Length {
    type Err = UnknownLength;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::ALL
            .into_iter()
            .find(|l| l.id() == s)
            .ok_or_else(|| UnknownLength(s.to_string()))
    }
}
