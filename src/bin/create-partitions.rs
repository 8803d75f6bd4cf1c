//! create-partitions - monthly range partitions for the orders tables
//!
//! Issues `CREATE TABLE IF NOT EXISTS ... PARTITION OF ...` for every month
//! in the window and every parent table, committing once at the end.

use clap::Parser;
use std::io;
use std::process;

use warehouse_seed::{provision, DryRunSink, PgSink, ProvisionError, ProvisionerConfig, YearMonth};

#[derive(Parser)]
#[command(name = "create-partitions")]
#[command(version, about = "Create monthly range partitions for orders and order_items", long_about = None)]
struct Cli {
    /// PostgreSQL connection string [default: $DATABASE_URL or postgres://postgres@localhost/mcp_demo]
    #[arg(long)]
    database_url: Option<String>,

    /// First month, YYYY-MM
    #[arg(long, default_value = "2023-01")]
    from: YearMonth,

    /// Last month (inclusive), YYYY-MM
    #[arg(long, default_value = "2025-12")]
    to: YearMonth,

    /// Parent table; repeat for several [default: orders, order_items]
    #[arg(long = "parent")]
    parents: Vec<String>,

    /// Print the statements instead of executing them
    #[arg(long)]
    dry_run: bool,
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

fn run(cli: Cli) -> Result<(), ProvisionError> {
    let mut config = ProvisionerConfig {
        first_month: cli.from,
        last_month: cli.to,
        dry_run: cli.dry_run,
        ..ProvisionerConfig::default()
    };
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if !cli.parents.is_empty() {
        config.parents = cli.parents;
    }

    let summary = if config.dry_run {
        let mut sink = DryRunSink::new(io::stdout().lock());
        provision(&config, &mut sink)?
    } else {
        let mut sink = PgSink::connect(&config.database_url)?;
        sink.test_connection()?;
        provision(&config, &mut sink)?
    };

    tracing::info!(
        "All partitions created successfully ({} months, {} partitions)",
        summary.months,
        summary.partitions.len()
    );
    Ok(())
}
