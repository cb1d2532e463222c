//! # Prodsim-RS: Product Catalog Similarity Engine
//!
//! A Rust implementation of a product catalog browser with near-duplicate
//! detection, built around a shingling + MinHash + LSH pipeline:
//!
//! - **Text shingling**: character k-grams over normalized title/description text
//! - **MinHash signatures**: seeded linear hash family over a Mersenne prime
//! - **LSH banding**: sub-linear candidate retrieval via per-band bucket tables
//! - **Exact re-ranking**: candidates re-scored with true Jaccard similarity
//!
//! The index is built once per corpus at startup and served as immutable,
//! shared state; there is no incremental re-indexing path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prodsim_rs::catalog::loader::ProductCatalog;
//! use prodsim_rs::catalog::text::Field;
//! use prodsim_rs::core::config::IndexConfig;
//! use prodsim_rs::similarity::engine::SimilarityIndex;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = ProductCatalog::load_jsonl("meta_Appliances.json")?;
//!     let index = SimilarityIndex::build(&catalog, &IndexConfig::default())?;
//!
//!     for hit in index.similar("B00004R9VV", Field::Title, 10) {
//!         println!("{}  {:.2}%", hit.asin, hit.score);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]

// Core configuration and error types
pub mod core {
    //! Configuration and error handling shared across the crate.

    pub mod config;
    pub mod errors;
}

// Product catalog model and loading
pub mod catalog {
    //! Product records, catalog loading, and text field extraction.

    pub mod loader;
    pub mod product;
    pub mod text;
}

// Shingling, MinHash, and LSH similarity core
pub mod similarity {
    //! The similarity index: shingles, MinHash signatures, LSH banding,
    //! and exact Jaccard re-ranking.

    pub mod banding;
    pub mod comparison;
    pub mod engine;
    pub mod minhash;
    pub mod shingles;
}

// Thin HTTP serving layer over the catalog and index
pub mod server;

// Re-export primary types for convenience
pub use catalog::loader::ProductCatalog;
pub use catalog::product::Product;
pub use catalog::text::Field;
pub use core::config::{IndexConfig, ServerConfig};
pub use core::errors::{ProdsimError, Result};
pub use similarity::engine::{SimilarProduct, SimilarityIndex};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
