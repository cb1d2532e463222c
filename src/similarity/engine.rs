//! The similarity engine: per-field index build and top-K queries.
//!
//! Build runs once per corpus. For every identified product the three text
//! fields (title, description, hybrid) are normalized and shingled, then each
//! field independently gets MinHash signatures and an LSH banding index. The
//! result is immutable; queries share it behind `Arc` without locking.

use std::cmp::Ordering;
use std::time::Instant;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::loader::ProductCatalog;
use crate::catalog::text::{field_text, Field};
use crate::core::config::IndexConfig;
use crate::core::errors::Result;
use crate::similarity::banding::BandingIndex;
use crate::similarity::comparison::jaccard_similarity;
use crate::similarity::minhash::{build_signatures, MinHashFamily};
use crate::similarity::shingles::{shingle_set, ShingleSet};

/// One ranked similarity hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProduct {
    /// Candidate product identifier
    pub asin: String,
    /// Exact Jaccard similarity, expressed as a percentage
    pub score: f64,
}

/// Shingle sets, signatures, and banding index for a single field.
#[derive(Debug, Clone)]
struct FieldIndex {
    shingles: AHashMap<String, ShingleSet>,
    signatures: AHashMap<String, Vec<u64>>,
    banding: BandingIndex,
}

impl FieldIndex {
    fn build(
        catalog: &ProductCatalog,
        field: Field,
        config: &IndexConfig,
        family: &MinHashFamily,
    ) -> Result<Self> {
        // AHashMap has no FromParallelIterator; gather pairs, then collect.
        let shingles: AHashMap<String, ShingleSet> = catalog
            .identified()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(asin, product)| {
                let text = field_text(product, field);
                (asin.to_string(), shingle_set(&text, config.shingle_k))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        let signatures = build_signatures(&shingles, family);

        let mut banding =
            BandingIndex::new(config.num_hashes, config.num_bands, config.rows_per_band)?;

        // Insertion in sorted asin order keeps bucket contents identical
        // across rebuilds of the same corpus.
        let mut asins: Vec<&String> = signatures.keys().collect();
        asins.sort_unstable();
        for asin in asins {
            banding.add(asin, &signatures[asin]);
        }

        debug!(
            field = %field,
            products = shingles.len(),
            buckets = banding.bucket_count(),
            "field index built"
        );

        Ok(Self {
            shingles,
            signatures,
            banding,
        })
    }
}

/// Immutable similarity index over a frozen product corpus.
pub struct SimilarityIndex {
    /// Per-field indexes, positioned by `Field::slot`
    fields: Vec<FieldIndex>,
}

impl SimilarityIndex {
    /// Build the index for all three fields.
    ///
    /// Fails only on invalid configuration; empty or degenerate corpora build
    /// fine and simply answer every query with an empty result.
    pub fn build(catalog: &ProductCatalog, config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        let started = Instant::now();

        let family = MinHashFamily::new(config.num_hashes, config.seed);

        // Fields share no mutable state, so they build in parallel.
        let fields: Vec<FieldIndex> = Field::ALL
            .par_iter()
            .map(|field| FieldIndex::build(catalog, *field, config, &family))
            .collect::<Result<Vec<_>>>()?;

        info!(
            products = catalog.identified().count(),
            elapsed = ?started.elapsed(),
            "similarity index built"
        );

        Ok(Self { fields })
    }

    fn field(&self, field: Field) -> &FieldIndex {
        &self.fields[field.slot()]
    }

    /// Whether a product is present in the index.
    pub fn contains(&self, asin: &str) -> bool {
        self.field(Field::Title).shingles.contains_key(asin)
    }

    /// Top-`top_k` products most similar to `asin` on `field`.
    ///
    /// Candidates come from the banding index and are re-scored with exact
    /// Jaccard similarity on the full shingle sets. Results are sorted by
    /// descending score with ties broken by ascending asin, the query product
    /// itself excluded, and scores reported as percentages.
    ///
    /// Unknown asins and products with no content for the field yield an
    /// empty result.
    pub fn similar(&self, asin: &str, field: Field, top_k: usize) -> Vec<SimilarProduct> {
        let index = self.field(field);

        let Some(shingles) = index.shingles.get(asin) else {
            return Vec::new();
        };
        if shingles.is_empty() {
            return Vec::new();
        }
        let Some(signature) = index.signatures.get(asin) else {
            return Vec::new();
        };

        let candidates = index.banding.query(signature);
        debug!(
            asin = %asin,
            field = %field,
            candidates = candidates.len(),
            "retrieved lsh candidates"
        );

        let mut scored: Vec<SimilarProduct> = candidates
            .into_iter()
            .filter(|candidate| candidate != asin)
            .filter_map(|candidate| {
                let candidate_shingles = index.shingles.get(&candidate)?;
                if candidate_shingles.is_empty() {
                    return None;
                }
                let score = jaccard_similarity(shingles, candidate_shingles) * 100.0;
                Some(SimilarProduct {
                    asin: candidate,
                    score,
                })
            })
            .collect();

        scored.sort_by(|x, y| {
            y.score
                .partial_cmp(&x.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| x.asin.cmp(&y.asin))
        });
        scored.truncate(top_k);
        scored
    }

    /// Raw MinHash signature of a product for a field, if indexed.
    pub fn signature(&self, asin: &str, field: Field) -> Option<&[u64]> {
        self.field(field).signatures.get(asin).map(Vec::as_slice)
    }
}
