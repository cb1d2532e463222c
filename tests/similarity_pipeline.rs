//! End-to-end tests for the catalog-to-similarity pipeline.

use prodsim_rs::catalog::loader::ProductCatalog;
use prodsim_rs::catalog::text::Field;
use prodsim_rs::core::config::IndexConfig;
use prodsim_rs::similarity::engine::SimilarityIndex;
use prodsim_rs::Product;

fn product(asin: &str, title: &str, description: &[&str]) -> Product {
    Product {
        asin: Some(asin.to_string()),
        title: Some(title.to_string()),
        description: description.iter().map(|s| s.to_string()).collect(),
        ..Product::default()
    }
}

fn appliance_catalog() -> ProductCatalog {
    // B002 is a near-duplicate of B001 (short suffix difference), B004 an
    // exact title duplicate after normalization, B003 unrelated.
    ProductCatalog::from_products(vec![
        product(
            "B001",
            "Professional Red Kitchen Blender with Glass Jar",
            &["A powerful <b>blender</b> for smoothies and crushed ice."],
        ),
        product(
            "B002",
            "Professional Red Kitchen Blender with Glass Jar Lid",
            &["A powerful blender", "for smoothies and crushed ice cubes."],
        ),
        product("B003", "Blue Garden Hose", &["Fifty feet of garden hose."]),
        product(
            "B004",
            "professional red kitchen blender with glass jar",
            &[],
        ),
        Product {
            title: Some("Orphan record without asin".to_string()),
            ..Product::default()
        },
    ])
}

#[test]
fn records_without_asin_are_invisible_to_the_index() {
    let catalog = appliance_catalog();
    let index = SimilarityIndex::build(&catalog, &IndexConfig::default()).unwrap();

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.identified().count(), 4);
    for asin in ["B001", "B002", "B003", "B004"] {
        assert!(index.contains(asin), "{asin} should be indexed");
    }
}

#[test]
fn title_similarity_ranks_near_duplicates_first() {
    let catalog = appliance_catalog();
    let index = SimilarityIndex::build(&catalog, &IndexConfig::default()).unwrap();

    let hits = index.similar("B001", Field::Title, 10);
    assert!(!hits.is_empty());

    // B004 is an exact title match after normalization
    assert_eq!(hits[0].asin, "B004");
    assert!((hits[0].score - 100.0).abs() < 1e-9);

    // B002 shares nearly all trigrams; B003 is unrelated and must rank
    // below it whenever LSH surfaces it at all
    let rank = |asin: &str| hits.iter().position(|h| h.asin == asin);
    let b2 = rank("B002").expect("near-duplicate title must be a candidate");
    if let Some(b3) = rank("B003") {
        assert!(b2 < b3);
    }
}

#[test]
fn markup_is_invisible_to_similarity() {
    let with_markup = ProductCatalog::from_products(vec![
        product("A", "Blender", &["<p>crushes ice</p>"]),
        product("B", "Blender", &["crushes ice"]),
    ]);
    let index = SimilarityIndex::build(&with_markup, &IndexConfig::default()).unwrap();

    let hits = index.similar("A", Field::Description, 10);
    assert_eq!(hits[0].asin, "B");
    assert!((hits[0].score - 100.0).abs() < 1e-9);
}

#[test]
fn empty_description_queries_return_nothing() {
    let catalog = appliance_catalog();
    let index = SimilarityIndex::build(&catalog, &IndexConfig::default()).unwrap();

    assert!(index.similar("B004", Field::Description, 10).is_empty());
    // ...but the same product still answers title queries
    assert!(!index.similar("B004", Field::Title, 10).is_empty());
}

#[test]
fn hybrid_field_blends_title_and_description() {
    let catalog = appliance_catalog();
    let index = SimilarityIndex::build(&catalog, &IndexConfig::default()).unwrap();

    let hits = index.similar("B001", Field::Hybrid, 10);
    assert!(hits.iter().any(|h| h.asin == "B002"));
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn rebuilds_are_deterministic() {
    let catalog = appliance_catalog();
    let config = IndexConfig::default();

    let first = SimilarityIndex::build(&catalog, &config).unwrap();
    let second = SimilarityIndex::build(&catalog, &config).unwrap();

    for field in Field::ALL {
        for asin in ["B001", "B002", "B003", "B004"] {
            assert_eq!(
                first.signature(asin, field),
                second.signature(asin, field),
                "signature mismatch for {asin} on {field}"
            );
            assert_eq!(
                first.similar(asin, field, 10),
                second.similar(asin, field, 10)
            );
        }
    }
}

#[test]
fn different_seeds_produce_different_signatures() {
    let catalog = appliance_catalog();
    let base = SimilarityIndex::build(&catalog, &IndexConfig::default()).unwrap();
    let reseeded = SimilarityIndex::build(
        &catalog,
        &IndexConfig {
            seed: 1337,
            ..IndexConfig::default()
        },
    )
    .unwrap();

    assert_ne!(
        base.signature("B001", Field::Title),
        reseeded.signature("B001", Field::Title)
    );
}

#[test]
fn custom_banding_configuration() {
    let catalog = appliance_catalog();
    let config = IndexConfig {
        num_hashes: 32,
        num_bands: 8,
        rows_per_band: 4,
        ..IndexConfig::default()
    };
    let index = SimilarityIndex::build(&catalog, &config).unwrap();

    let hits = index.similar("B001", Field::Title, 10);
    assert!(hits.iter().any(|h| h.asin == "B004"));
}
