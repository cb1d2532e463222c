//! Text normalization and per-field text extraction.
//!
//! All similarity math runs over normalized text: markup stripped, whitespace
//! collapsed, lowercased. Normalization never fails; unusable input yields an
//! empty string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::product::Product;
use crate::core::errors::ProdsimError;

/// Which text field a similarity index is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Product title text
    Title,
    /// Description text (fragments joined with a space)
    Description,
    /// Normalized title + space + normalized description
    Hybrid,
}

impl Field {
    /// All indexed fields, in build order.
    pub const ALL: [Field; 3] = [Field::Title, Field::Description, Field::Hybrid];

    /// Stable lowercase name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Hybrid => "hybrid",
        }
    }

    /// Positional slot of this field in per-field storage.
    pub(crate) fn slot(&self) -> usize {
        match self {
            Field::Title => 0,
            Field::Description => 1,
            Field::Hybrid => 2,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ProdsimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "description" => Ok(Field::Description),
            "hybrid" => Ok(Field::Hybrid),
            other => Err(ProdsimError::validation(format!(
                "unknown field '{other}', expected title, description or hybrid"
            ))),
        }
    }
}

/// Normalize a raw text fragment: strip markup tags, collapse whitespace
/// runs to single spaces, trim, and lowercase.
pub fn clean_text(raw: &str) -> String {
    let stripped = strip_markup(raw);
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Remove angle-bracket-delimited markup spans.
///
/// A span starts at `<`, contains at least one character that is neither
/// `<` nor `>`, and ends at the first `>`. Anything else (stray brackets,
/// empty `<>`, unterminated tags) passes through unchanged.
fn strip_markup(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '<' {
            let mut j = i + 1;
            while j < chars.len() && chars[j] != '<' && chars[j] != '>' {
                j += 1;
            }
            if j < chars.len() && chars[j] == '>' && j > i + 1 {
                // Valid tag span; drop it entirely
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Extract the normalized text for one field of a product.
///
/// Description fragments are each normalized and joined with a single space.
/// Hybrid text concatenates the normalized title and description; when either
/// side is empty the other is returned alone.
pub fn field_text(product: &Product, field: Field) -> String {
    match field {
        Field::Title => clean_text(product.title.as_deref().unwrap_or("")),
        Field::Description => {
            let parts: Vec<String> = product
                .description
                .iter()
                .map(|fragment| clean_text(fragment))
                .filter(|cleaned| !cleaned.is_empty())
                .collect();
            parts.join(" ")
        }
        Field::Hybrid => {
            let title = field_text(product, Field::Title);
            let description = field_text(product, Field::Description);
            match (title.is_empty(), description.is_empty()) {
                (true, _) => description,
                (_, true) => title,
                _ => format!("{title} {description}"),
            }
        }
    }
}
