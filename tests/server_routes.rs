//! Route-level tests for the HTTP serving layer.

use std::sync::Arc;

use actix_web::{test, web, App};

use prodsim_rs::catalog::loader::ProductCatalog;
use prodsim_rs::core::config::IndexConfig;
use prodsim_rs::server::{self, AppState};
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

async fn test_state() -> AppState {
    // B002's title is a near-duplicate of B001's so the similarity panel
    // reliably has content to render.
    let catalog = Arc::new(ProductCatalog::from_products(vec![
        Product {
            also_buy: vec!["B002".to_string(), "B003".to_string()],
            also_view: vec!["B003".to_string()],
            ..product(
                "B001",
                "Red Kitchen Blender with Glass Jar",
                &["crushes ice"],
            )
        },
        product(
            "B002",
            "Red Kitchen Blender with Glass Jar Lid",
            &["mixes dough"],
        ),
        product("B003", "Blue Garden Hose", &["waters plants"]),
    ]));
    let index = Arc::new(SimilarityIndex::build(&catalog, &IndexConfig::default()).unwrap());
    AppState::new(catalog, index, 2).unwrap()
}

#[actix_web::test]
async fn home_page_renders_grid() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state().await))
            .configure(server::routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Red Kitchen Blender"));
    // per_page = 2, so page 1 must stop before the third product
    assert!(!body.contains("Blue Garden Hose"));
    assert!(body.contains("Page 1 of 2"));
}

#[actix_web::test]
async fn detail_page_shows_similar_products() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state().await))
            .configure(server::routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/product/B001?similarity=pst")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Red Kitchen Blender with Glass Jar"));
    assert!(body.contains("Glass Jar Lid"));
    assert!(body.contains("Similarity:"));
}

#[actix_web::test]
async fn detail_page_lists_other_details() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state().await))
            .configure(server::routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/product/B001").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Other Details:"));
    assert!(body.contains("Also bought:</strong> B002, B003"));
    assert!(body.contains("Also viewed:</strong> B003"));

    // B002 has neither list; the entries stay hidden
    let req = test::TestRequest::get().uri("/product/B002").to_request();
    let resp = test::call_service(&app, req).await;
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(!body.contains("Also bought:"));
    assert!(!body.contains("Also viewed:"));
}

#[actix_web::test]
async fn unknown_product_is_not_found() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state().await))
            .configure(server::routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/product/ZZZZ").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_returns_json_matches() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state().await))
            .configure(server::routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/search?query=kitchen")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let matches: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["asin"], "B001");

    let req = test::TestRequest::get().uri("/search?query=").to_request();
    let resp = test::call_service(&app, req).await;
    let matches: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert!(matches.is_empty());
}
