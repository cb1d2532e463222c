//! LSH banding index for sub-linear candidate retrieval.
//!
//! Each signature is split into `num_bands` bands of `rows_per_band`
//! consecutive values; items sharing the exact content of any one band land
//! in the same bucket and become retrieval candidates. Items that are truly
//! similar but agree on no complete band are missed; that recall loss is the
//! intended accuracy/performance trade-off of LSH.

use std::hash::{Hash, Hasher};

use ahash::{AHashMap, AHashSet, AHasher};

use crate::core::errors::{ProdsimError, Result};

/// Per-field banding index mapping band keys to product ids.
#[derive(Debug, Clone)]
pub struct BandingIndex {
    num_bands: usize,
    rows_per_band: usize,

    /// One bucket table per band
    buckets: Vec<AHashMap<u64, Vec<String>>>,
}

impl BandingIndex {
    /// Create an empty index.
    ///
    /// Rejects construction unless `num_hashes == num_bands * rows_per_band`;
    /// a partially-banded signature would silently drop hash values.
    pub fn new(num_hashes: usize, num_bands: usize, rows_per_band: usize) -> Result<Self> {
        if num_bands == 0 || rows_per_band == 0 || num_hashes != num_bands * rows_per_band {
            return Err(ProdsimError::config(format!(
                "banding mismatch: num_hashes ({num_hashes}) must equal \
                 num_bands ({num_bands}) * rows_per_band ({rows_per_band})"
            )));
        }

        Ok(Self {
            num_bands,
            rows_per_band,
            buckets: vec![AHashMap::new(); num_bands],
        })
    }

    /// Number of bands.
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Signature rows per band.
    pub fn rows_per_band(&self) -> usize {
        self.rows_per_band
    }

    /// Insert a product's signature. Bucket order is append order; ranking
    /// downstream is by score, never by insertion position.
    pub fn add(&mut self, asin: &str, signature: &[u64]) {
        debug_assert_eq!(signature.len(), self.num_bands * self.rows_per_band);

        for (band_idx, band) in signature.chunks(self.rows_per_band).enumerate() {
            let key = band_key(band);
            self.buckets[band_idx]
                .entry(key)
                .or_default()
                .push(asin.to_string());
        }
    }

    /// Retrieve all candidate ids sharing at least one band with `signature`.
    ///
    /// The result includes the query product itself when indexed; callers
    /// filter it out.
    pub fn query(&self, signature: &[u64]) -> AHashSet<String> {
        let mut candidates = AHashSet::new();

        for (band_idx, band) in signature.chunks(self.rows_per_band).enumerate() {
            let key = band_key(band);
            if let Some(ids) = self.buckets[band_idx].get(&key) {
                candidates.extend(ids.iter().cloned());
            }
        }

        candidates
    }

    /// Total number of non-empty buckets across all bands.
    pub fn bucket_count(&self) -> usize {
        self.buckets.iter().map(|band| band.len()).sum()
    }
}

/// Hash one band's sub-vector to a bucket key.
///
/// `AHasher::default()` uses fixed keys, so the grouping is deterministic
/// within and across builds of the same corpus.
fn band_key(band: &[u64]) -> u64 {
    let mut hasher = AHasher::default();
    band.hash(&mut hasher);
    hasher.finish()
}
