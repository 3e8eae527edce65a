use analytics::{AnalyticsEngine, AnalyticsSummary};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, init_tracing, load_config};
use core_types::{Side, Trade, TradeQuery};
use database::{DbRepository, TradeStore, connect, run_migrations};
use importer::{ImportReport, import_csv_file};
use std::path::PathBuf;

/// The main entry point for the Tradelog journal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // A missing .env file is fine; DATABASE_URL may come from the environment.
    dotenvy::dotenv().ok();

    let config = load_config().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging).context("Failed to initialize logging")?;

    if let Commands::Version = cli.command {
        println!("{}", config.app.version_or_dev());
        return Ok(());
    }

    let db_repo = open_store(&config).await?;
    let result = run(cli.command, &db_repo).await;
    db_repo.close().await;

    if let Err(e) = &result {
        tracing::error!(error = ?e, "Command failed.");
    }
    result
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A trading journal: import trades, query them and summarize performance.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import trades from a CSV file.
    Import(ImportArgs),
    /// List stored trades matching the filters.
    List(FilterArgs),
    /// Summarize the closed trades matching the filters.
    Summary(FilterArgs),
    /// Delete a trade by id.
    Delete(DeleteArgs),
    /// Print the application version.
    Version,
}

#[derive(Args)]
struct ImportArgs {
    /// Path to a CSV file with the header
    /// symbol,side,entry_time,exit_time,entry_price,exit_price,qty,fees,notes
    #[arg(long)]
    file: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FilterArgs {
    /// Only trades for this symbol.
    #[arg(long)]
    symbol: Option<String>,

    /// Only trades on this side.
    #[arg(long, value_enum)]
    side: Option<Side>,

    /// Entry time lower bound, inclusive (RFC3339).
    #[arg(long)]
    from: Option<DateTime<Utc>>,

    /// Entry time upper bound, exclusive (RFC3339).
    #[arg(long)]
    to: Option<DateTime<Utc>>,

    /// Maximum number of trades; 0 means unlimited.
    #[arg(long, default_value_t = 0)]
    limit: u32,

    /// Number of trades to skip.
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl FilterArgs {
    fn to_query(&self) -> TradeQuery {
        TradeQuery {
            symbol: self.symbol.clone(),
            side: self.side,
            start_time: self.from,
            end_time: self.to,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Args)]
struct DeleteArgs {
    /// The trade id to remove.
    #[arg(long)]
    id: String,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn open_store(config: &Config) -> anyhow::Result<DbRepository> {
    let pool = connect(&config.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(DbRepository::new(pool))
}

async fn run(command: Commands, db_repo: &DbRepository) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => handle_import(args, db_repo).await,
        Commands::List(args) => handle_list(args, db_repo).await,
        Commands::Summary(args) => handle_summary(args, db_repo).await,
        Commands::Delete(args) => {
            db_repo.delete(&args.id).await?;
            println!("Deleted {}", args.id);
            Ok(())
        }
        Commands::Version => Ok(()),
    }
}

async fn handle_import(args: ImportArgs, db_repo: &DbRepository) -> anyhow::Result<()> {
    let report = import_csv_file(db_repo, &args.file)
        .await
        .with_context(|| format!("Failed to import {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_import_report(&report);
    }
    Ok(())
}

async fn handle_list(args: FilterArgs, db_repo: &DbRepository) -> anyhow::Result<()> {
    let trades = db_repo.list(&args.to_query()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&trades)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "id", "symbol", "side", "entry_time", "exit_time", "entry", "exit", "qty", "fees", "notes",
    ]);
    for trade in &trades {
        table.add_row(trade_row(trade));
    }
    println!("{table}");
    println!("{} trade(s)", trades.len());
    Ok(())
}

async fn handle_summary(args: FilterArgs, db_repo: &DbRepository) -> anyhow::Result<()> {
    let trades = db_repo.list(&args.to_query()).await?;
    let summary = AnalyticsEngine::new().calculate(&trades);

    if args.json {
        // serde_json writes non-finite numbers as null.
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, trades.iter().filter(|t| t.is_closed()).count());
    }
    Ok(())
}

// ==============================================================================
// Output
// ==============================================================================

fn trade_row(trade: &Trade) -> Vec<String> {
    vec![
        trade.id.clone(),
        trade.symbol.clone(),
        trade.side.to_string(),
        trade.entry_time.to_rfc3339(),
        trade.exit_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
        trade.entry_price.to_string(),
        trade.exit_price.map(|p| p.to_string()).unwrap_or_default(),
        trade.quantity.to_string(),
        trade.fees.to_string(),
        trade.notes.clone(),
    ]
}

fn print_summary(summary: &AnalyticsSummary, closed: usize) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["metric", "value"]);
    table.add_row(vec!["closed trades".to_string(), closed.to_string()]);
    table.add_row(vec!["win_rate".to_string(), format!("{:.2}", summary.win_rate)]);
    table.add_row(vec!["profit_factor".to_string(), format!("{:.2}", summary.profit_factor)]);
    table.add_row(vec!["max_drawdown".to_string(), format!("{:.2}", summary.max_drawdown)]);
    table.add_row(vec!["sharpe".to_string(), format!("{:.2}", summary.sharpe)]);
    table.add_row(vec!["sortino".to_string(), format!("{:.2}", summary.sortino)]);
    table.add_row(vec!["expectancy".to_string(), format!("{:.2}", summary.expectancy)]);
    println!("{table}");
}

fn print_import_report(report: &ImportReport) {
    println!(
        "imported: {}, skipped: {}, errors: {}",
        report.imported,
        report.skipped,
        report.errors.len()
    );
    for error in &report.errors {
        println!("  {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_is_answered_by_the_parser_alone() {
        // main parses before touching config, so a broken environment cannot block --help.
        let err = match Cli::try_parse_from(["tradelog", "--help"]) {
            Ok(_) => panic!("--help should short-circuit parsing"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn filter_flags_build_a_query() {
        let cli = Cli::try_parse_from([
            "tradelog", "list", "--symbol", "AAPL", "--side", "short", "--from",
            "2024-01-02T00:00:00Z", "--limit", "5",
        ])
        .unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected the list command");
        };
        let query = args.to_query();
        assert_eq!(query.symbol.as_deref(), Some("AAPL"));
        assert_eq!(query.side, Some(Side::Short));
        assert_eq!(query.start_time, Some("2024-01-02T00:00:00Z".parse().unwrap()));
        assert_eq!(query.end_time, None);
        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 0);
    }
}
