//! Product catalog loading and lookup.
//!
//! The catalog is a JSON-lines file (one product object per line), loaded
//! once at startup. Catalog order is preserved for the paginated grid view;
//! products with an identifier additionally get keyed lookup.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::product::Product;
use crate::core::errors::{ProdsimError, Result};

/// An in-memory, read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    /// All products, in file order
    products: Vec<Arc<Product>>,

    /// Products keyed by asin, in file order. Records without an asin are
    /// absent here (and therefore invisible to the similarity index).
    by_asin: IndexMap<String, Arc<Product>>,
}

/// A title autocomplete match.
#[derive(Debug, Clone, Serialize)]
pub struct TitleMatch {
    /// Product identifier (absent for unidentified records)
    pub asin: Option<String>,
    /// Product title as stored
    pub title: String,
}

impl ProductCatalog {
    /// Load a catalog from a JSON-lines file.
    ///
    /// Every non-empty line must be a valid product object; malformed lines
    /// abort the load with line context. Records without an asin are kept
    /// for browsing but excluded from keyed lookup.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ProdsimError::io(format!("cannot open catalog {}", path.display()), e))?;
        let reader = BufReader::new(file);

        let mut products = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ProdsimError::io(format!("cannot read catalog {}", path.display()), e)
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let product: Product = serde_json::from_str(&line).map_err(|e| {
                ProdsimError::CatalogParse {
                    line: line_no + 1,
                    message: "invalid product record".to_string(),
                    source: e,
                }
            })?;
            products.push(product);
        }

        let catalog = Self::from_products(products);
        info!(
            total = catalog.len(),
            identified = catalog.by_asin.len(),
            "loaded product catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-parsed products, preserving order.
    pub fn from_products(products: Vec<Product>) -> Self {
        let products: Vec<Arc<Product>> = products.into_iter().map(Arc::new).collect();
        let mut by_asin = IndexMap::with_capacity(products.len());
        for product in &products {
            if let Some(asin) = &product.asin {
                if by_asin.insert(asin.clone(), Arc::clone(product)).is_some() {
                    debug!(asin = %asin, "duplicate asin in catalog; keeping last record");
                }
            }
        }
        Self { products, by_asin }
    }

    /// Total number of records, including those without an asin.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by asin.
    pub fn get(&self, asin: &str) -> Option<&Arc<Product>> {
        self.by_asin.get(asin)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Iterate identified products as `(asin, product)` pairs, in file order.
    pub fn identified(&self) -> impl Iterator<Item = (&str, &Arc<Product>)> {
        self.by_asin.iter().map(|(asin, p)| (asin.as_str(), p))
    }

    /// One page of the catalog (1-based page number) and the total page count.
    ///
    /// Out-of-range pages and a zero `per_page` yield an empty slice; the
    /// total never drops below 1 so the grid always has a current page to
    /// display.
    pub fn page(&self, page: usize, per_page: usize) -> (&[Arc<Product>], usize) {
        if per_page == 0 {
            return (&[], 1);
        }
        let total_pages = self.products.len().div_ceil(per_page).max(1);
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let end = start.saturating_add(per_page).min(self.products.len());
        if start >= self.products.len() {
            (&[], total_pages)
        } else {
            (&self.products[start..end], total_pages)
        }
    }

    /// Case-insensitive substring search over titles, capped at `limit`.
    ///
    /// This is the autocomplete path, not the similarity engine; it scans
    /// catalog order and returns the first matches.
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter_map(|product| {
                let title = product.title.as_deref()?;
                if title.to_lowercase().contains(&needle) {
                    Some(TitleMatch {
                        asin: product.asin.clone(),
                        title: title.to_string(),
                    })
                } else {
                    None
                }
            })
            .take(limit)
            .collect()
    }
}
