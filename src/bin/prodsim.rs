//! Prodsim CLI - Product catalog browser and similarity queries.
//!
//! `serve` loads a JSON-lines catalog, builds the similarity index, and runs
//! the HTTP catalog browser. `similar` answers a single query from the
//! command line without starting a server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use prodsim_rs::catalog::loader::ProductCatalog;
use prodsim_rs::catalog::text::Field;
use prodsim_rs::core::config::{IndexConfig, ServerConfig};
use prodsim_rs::server;
use prodsim_rs::similarity::engine::SimilarityIndex;

#[derive(Parser)]
#[command(name = "prodsim", version, about = "Product catalog similarity engine")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and serve the catalog browser over HTTP
    Serve(ServeArgs),
    /// Print the top similar products for one asin
    Similar(SimilarArgs),
}

#[derive(Args)]
struct IndexArgs {
    /// Path to the JSON-lines catalog file
    #[arg(long, env = "PRODSIM_CATALOG")]
    catalog: PathBuf,

    /// Character shingle length
    #[arg(long, default_value_t = 3)]
    shingle_k: usize,

    /// Number of MinHash functions
    #[arg(long, default_value_t = 100)]
    num_hashes: usize,

    /// Number of LSH bands
    #[arg(long, default_value_t = 20)]
    num_bands: usize,

    /// Signature rows per band
    #[arg(long, default_value_t = 5)]
    rows_per_band: usize,

    /// Seed for the hash-function family
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl IndexArgs {
    fn index_config(&self) -> IndexConfig {
        IndexConfig {
            shingle_k: self.shingle_k,
            num_hashes: self.num_hashes,
            num_bands: self.num_bands,
            rows_per_band: self.rows_per_band,
            seed: self.seed,
        }
    }
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Bind port
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Products per grid page
    #[arg(long, default_value_t = 40)]
    per_page: usize,
}

#[derive(Args)]
struct SimilarArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Product asin to query
    #[arg(long)]
    asin: String,

    /// Field to compare on: title, description, or hybrid
    #[arg(long, default_value = "title")]
    field: Field,

    /// Maximum number of results
    #[arg(long, default_value_t = 10)]
    top_k: usize,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve(args) => {
            let catalog = Arc::new(ProductCatalog::load_jsonl(&args.index.catalog)?);
            let index = Arc::new(SimilarityIndex::build(
                &catalog,
                &args.index.index_config(),
            )?);

            let server_config = ServerConfig {
                bind: args.bind,
                port: args.port,
                per_page: args.per_page,
            };
            server::run(catalog, index, &server_config).await?;
        }
        Commands::Similar(args) => {
            let catalog = ProductCatalog::load_jsonl(&args.index.catalog)?;
            let index = SimilarityIndex::build(&catalog, &args.index.index_config())?;

            let hits = index.similar(&args.asin, args.field, args.top_k);
            if hits.is_empty() {
                println!("no similar products for {} on {}", args.asin, args.field);
            } else {
                for hit in hits {
                    let title = catalog
                        .get(&hit.asin)
                        .and_then(|p| p.title.clone())
                        .unwrap_or_else(|| "No Title".to_string());
                    println!("{:>7.2}%  {}  {}", hit.score, hit.asin, title);
                }
            }
        }
    }

    Ok(())
}
