//! warehouse-datagen - synthetic e-commerce CSV dataset for warehouse load tests
//!
//! Writes customers, categories, products, chunked orders/order items,
//! payments, shipments and inventory into one output directory.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use warehouse_seed::config::parse_anchor;
use warehouse_seed::{generate, GenerateError, GeneratorConfig, GeneratorProfile};

#[derive(Parser)]
#[command(name = "warehouse-datagen")]
#[command(version, about = "Generate a synthetic e-commerce dataset as CSV files", long_about = None)]
struct Cli {
    /// Output directory [default: /tmp/mcp_data]
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of customers [default: 2000000]
    #[arg(long)]
    customers: Option<u64>,

    /// Number of categories [default: 1000]
    #[arg(long)]
    categories: Option<u64>,

    /// Number of products [default: 100000]
    #[arg(long)]
    products: Option<u64>,

    /// Number of orders [default: 10000000]
    #[arg(long)]
    orders: Option<u64>,

    /// Orders per chunk file [default: 100000]
    #[arg(long)]
    chunk: Option<u64>,

    /// Random seed [default: 42]
    #[arg(long)]
    seed: Option<u64>,

    /// Reference time for the trailing date windows, "YYYY-MM-DD HH:MM:SS" [default: now]
    #[arg(long, value_parser = parse_anchor_arg)]
    anchor: Option<String>,

    /// YAML profile with any of the settings above; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_anchor_arg(value: &str) -> Result<String, String> {
    parse_anchor(value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

fn main() {
    dotenv::dotenv().ok();
    warehouse_seed::logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GenerateError> {
    let config = resolve_config(cli)?;
    let summary = generate(&config)?;

    tracing::info!(
        "Wrote {} orders with {} items in {} chunks, {} shipments",
        summary.orders,
        summary.order_items,
        summary.chunks,
        summary.shipments
    );
    Ok(())
}

/// CLI flag > YAML profile > built-in default
fn resolve_config(cli: Cli) -> Result<GeneratorConfig, GenerateError> {
    let profile = match &cli.config {
        Some(path) => {
            tracing::info!("Using profile {}", path.display());
            Some(GeneratorProfile::from_file(path)?)
        }
        None => None,
    };

    let overrides = GeneratorProfile {
        out: cli.out,
        customers: cli.customers,
        categories: cli.categories,
        products: cli.products,
        orders: cli.orders,
        chunk: cli.chunk,
        seed: cli.seed,
        anchor: cli.anchor,
    };

    Ok(GeneratorConfig::resolve(profile.as_ref(), &overrides)?)
}
