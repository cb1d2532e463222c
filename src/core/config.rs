//! Configuration types for the similarity index and the serving layer.

use serde::{Deserialize, Serialize};

use crate::core::errors::{ProdsimError, Result};

/// Parameters for building the shingle/MinHash/LSH similarity index.
///
/// The defaults match the reference pipeline: 3-character shingles, 100 hash
/// functions split into 20 bands of 5 rows, seed 42.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Character shingle length (k)
    pub shingle_k: usize,

    /// Number of MinHash functions (signature length)
    pub num_hashes: usize,

    /// Number of LSH bands
    pub num_bands: usize,

    /// Signature rows per band
    pub rows_per_band: usize,

    /// Seed for the hash-function family
    pub seed: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            shingle_k: 3,
            num_hashes: 100,
            num_bands: 20,
            rows_per_band: 5,
            seed: 42,
        }
    }
}

impl IndexConfig {
    /// Validate index configuration.
    ///
    /// The banding scheme requires `num_hashes == num_bands * rows_per_band`;
    /// an index must never be built with mismatched parameters.
    pub fn validate(&self) -> Result<()> {
        if self.shingle_k == 0 {
            return Err(ProdsimError::config_field(
                "shingle_k must be greater than 0",
                "shingle_k",
            ));
        }

        if self.num_hashes == 0 {
            return Err(ProdsimError::config_field(
                "num_hashes must be greater than 0",
                "num_hashes",
            ));
        }

        if self.num_bands == 0 {
            return Err(ProdsimError::config_field(
                "num_bands must be greater than 0",
                "num_bands",
            ));
        }

        if self.num_hashes != self.num_bands * self.rows_per_band {
            return Err(ProdsimError::config_field(
                format!(
                    "num_hashes ({}) must equal num_bands ({}) * rows_per_band ({})",
                    self.num_hashes, self.num_bands, self.rows_per_band
                ),
                "num_hashes",
            ));
        }

        Ok(())
    }
}

/// Configuration for the HTTP serving layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub bind: String,

    /// Bind port
    pub port: u16,

    /// Products per grid page
    pub per_page: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            per_page: 40,
        }
    }
}

impl ServerConfig {
    /// Validate server configuration.
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(ProdsimError::config_field(
                "per_page must be greater than 0",
                "per_page",
            ));
        }
        Ok(())
    }
}
