//! Product record model for the JSON-lines catalog format.

use serde::{Deserialize, Deserializer, Serialize};

/// A single product record as found in the catalog file.
///
/// The catalog is externally supplied and only ever read; fields the
/// similarity core does not use are kept for the serving layer's detail
/// pages. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Unique product identifier. Records without one are excluded from
    /// similarity indexing.
    pub asin: Option<String>,

    /// Product title
    pub title: Option<String>,

    /// Description fragments. The source format uses either a bare string
    /// or an array of strings; both deserialize into the fragment list.
    #[serde(deserialize_with = "string_or_seq")]
    pub description: Vec<String>,

    /// Brand name
    pub brand: Option<String>,

    /// Price as displayed in the source data (e.g. "$24.99")
    pub price: Option<String>,

    /// Category breadcrumb
    pub category: Vec<String>,

    /// Feature bullet points
    pub feature: Vec<String>,

    /// High-resolution image URLs
    #[serde(rename = "imageURLHighRes")]
    pub image_url_high_res: Vec<String>,

    /// Listing date
    pub date: Option<String>,

    /// Frequently-bought-together asins
    pub also_buy: Vec<String>,

    /// Also-viewed asins
    pub also_view: Vec<String>,
}

impl Product {
    /// Price string for display, only when it looks like a real price.
    ///
    /// The source data stores placeholder markup in `price` for items
    /// without one; anything not starting with `$` is suppressed.
    pub fn display_price(&self) -> Option<&str> {
        self.price.as_deref().filter(|p| p.starts_with('$'))
    }

    /// First high-resolution image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_url_high_res.first().map(String::as_str)
    }
}

/// Deserialize a field that may be a string or a sequence of strings.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeq {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrSeq::deserialize(deserializer)? {
        StringOrSeq::One(s) => vec![s],
        StringOrSeq::Many(v) => v,
    })
}
