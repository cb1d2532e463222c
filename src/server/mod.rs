//! Thin HTTP serving layer over the catalog and similarity index.
//!
//! Three routes, mirroring the catalog browser this engine backs:
//! a paginated grid, a product detail page with optional similar-product
//! panels, and a substring-autocomplete endpoint. All state is immutable
//! and shared; handlers only read.

mod templates;

use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::loader::ProductCatalog;
use crate::catalog::product::Product;
use crate::catalog::text::Field;
use crate::core::config::ServerConfig;
use crate::core::errors::{ProdsimError, Result};
use crate::similarity::engine::SimilarityIndex;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<ProductCatalog>,
    index: Arc<SimilarityIndex>,
    handlebars: Handlebars<'static>,
    per_page: usize,
}

impl AppState {
    /// Assemble serving state from a built catalog and index.
    pub fn new(
        catalog: Arc<ProductCatalog>,
        index: Arc<SimilarityIndex>,
        per_page: usize,
    ) -> Result<Self> {
        Ok(Self {
            catalog,
            index,
            handlebars: templates::registry()?,
            per_page,
        })
    }
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

#[derive(Deserialize)]
struct SimilarityQuery {
    similarity: Option<String>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

#[derive(Serialize)]
struct ProductCard {
    asin: Option<String>,
    title: String,
    brand: String,
    price: Option<String>,
    image: Option<String>,
}

#[derive(Serialize)]
struct HomeView {
    products: Vec<ProductCard>,
    page: usize,
    total_pages: usize,
    has_prev: bool,
    has_next: bool,
    prev_page: usize,
    next_page: usize,
}

#[derive(Serialize)]
struct SimilarCard {
    asin: String,
    title: String,
    image: Option<String>,
    score: String,
}

#[derive(Serialize)]
struct DetailView {
    asin: String,
    title: String,
    brand: String,
    category: String,
    price: Option<String>,
    date: String,
    features: Vec<String>,
    description: String,
    image: Option<String>,
    also_buy: String,
    also_view: String,
    similar: Vec<SimilarCard>,
}

fn card(product: &Product) -> ProductCard {
    ProductCard {
        asin: product.asin.clone(),
        title: product
            .title
            .clone()
            .unwrap_or_else(|| "No Title".to_string()),
        brand: product
            .brand
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        price: product.display_price().map(String::from),
        image: product.primary_image().map(String::from),
    }
}

/// Map a similarity mode parameter to the indexed field it queries.
fn similarity_field(mode: &str) -> Option<Field> {
    match mode {
        "pst" => Some(Field::Title),
        "psd" => Some(Field::Description),
        "pstd" => Some(Field::Hybrid),
        _ => None,
    }
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let truncated: String = title.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

async fn home(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let (products, total_pages) = state.catalog.page(page, state.per_page);

    let view = HomeView {
        products: products.iter().map(|p| card(p)).collect(),
        page,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
        prev_page: page.saturating_sub(1),
        next_page: page + 1,
    };

    let body = state
        .handlebars
        .render("home", &view)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/html").body(body))
}

async fn product_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SimilarityQuery>,
) -> ActixResult<HttpResponse> {
    let asin = path.into_inner();
    let Some(product) = state.catalog.get(&asin) else {
        return Ok(HttpResponse::NotFound().body("Product not found"));
    };

    let similar = query
        .similarity
        .as_deref()
        .and_then(similarity_field)
        .map(|field| {
            state
                .index
                .similar(&asin, field, 10)
                .into_iter()
                .filter_map(|hit| {
                    let candidate = state.catalog.get(&hit.asin)?;
                    Some(SimilarCard {
                        asin: hit.asin.clone(),
                        title: truncate_title(
                            candidate.title.as_deref().unwrap_or("No Title"),
                            50,
                        ),
                        image: candidate.primary_image().map(String::from),
                        score: format!("{:.2}", hit.score),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let view = DetailView {
        asin: asin.clone(),
        title: product
            .title
            .clone()
            .unwrap_or_else(|| "No Title".to_string()),
        brand: product.brand.clone().unwrap_or_else(|| "N/A".to_string()),
        category: product.category.join(" > "),
        price: product.display_price().map(String::from),
        date: product.date.clone().unwrap_or_else(|| "N/A".to_string()),
        features: product.feature.clone(),
        description: product.description.join(" "),
        image: product.primary_image().map(String::from),
        also_buy: product.also_buy.join(", "),
        also_view: product.also_view.join(", "),
        similar,
    };

    let body = state
        .handlebars
        .render("detail", &view)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/html").body(body))
}

async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> ActixResult<HttpResponse> {
    let matches = state.catalog.search_titles(&query.query, 10);
    Ok(HttpResponse::Ok().json(matches))
}

/// Register the catalog browser routes on an actix service config.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/product/{asin}", web::get().to(product_detail))
        .route("/search", web::get().to(search));
}

/// Run the HTTP server until shutdown.
pub async fn run(
    catalog: Arc<ProductCatalog>,
    index: Arc<SimilarityIndex>,
    config: &ServerConfig,
) -> Result<()> {
    config.validate()?;
    let state = AppState::new(catalog, index, config.per_page)?;

    info!("serving catalog on http://{}:{}", config.bind, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes)
    })
    .bind((config.bind.as_str(), config.port))
    .map_err(|e| ProdsimError::io("cannot bind http server", e))?
    .run()
    .await
    .map_err(|e| ProdsimError::io("http server failed", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_field_mapping() {
        assert_eq!(similarity_field("pst"), Some(Field::Title));
        assert_eq!(similarity_field("psd"), Some(Field::Description));
        assert_eq!(similarity_field("pstd"), Some(Field::Hybrid));
        assert_eq!(similarity_field("nope"), None);
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short", 50), "short");
        let long = "x".repeat(60);
        let truncated = truncate_title(&long, 50);
        assert_eq!(truncated.chars().count(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_card_defaults() {
        let card = card(&Product::default());
        assert_eq!(card.title, "No Title");
        assert_eq!(card.brand, "Unknown");
        assert!(card.price.is_none());
        assert!(card.image.is_none());
    }
}
