// crates/finnews/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use finnews_core::{export, loader, preprocess, summary, validation};
use polars::prelude::DataFrame;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Financial news CSV cleaning pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a CSV file against the required headline schema
    Validate(ValidateArgs),
    /// Clean a CSV file and write the normalized table
    Clean(CleanArgs),
    /// Print summary statistics for a cleaned table
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to the input CSV file
    input: PathBuf,
    /// Emit the verdict as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Path to the input CSV file
    input: PathBuf,
    /// Where to write the cleaned CSV
    #[arg(short, long)]
    output: PathBuf,
    /// Skip schema validation before cleaning (for sources with
    /// non-standard headers; the pipeline still standardizes them)
    #[arg(long)]
    no_validate: bool,
    /// Print summary statistics after cleaning
    #[arg(long)]
    summary: bool,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Path to the input CSV file
    input: PathBuf,
    /// Emit the statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => handle_validate(args),
        Command::Clean(args) => handle_clean(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_validate(args: ValidateArgs) -> Result<()> {
    let df = loader::load_raw(&args.input)?;
    let outcome = validation::validate_data(&df);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match outcome.reason() {
            None => println!("OK: {} rows, schema valid", df.height()),
            Some(reason) => println!("INVALID: {reason}"),
        }
    }

    if !outcome.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_clean(args: CleanArgs) -> Result<()> {
    let df = loader::load_data(&args.input, !args.no_validate)?;
    let cleaned = preprocess::preprocess_data(&df)?;
    export::write_csv(&cleaned, &args.output)?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        "clean finished"
    );
    println!(
        "Wrote {} cleaned rows to {}",
        cleaned.height(),
        args.output.display()
    );

    if args.summary {
        print_summary_tables(&cleaned)?;
    }
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<()> {
    let df = loader::load_data(&args.input, false)?;
    let cleaned = preprocess::preprocess_data(&df)?;

    if args.json {
        let payload = serde_json::json!({
            "headline_length": summary::headline_length_stats(&cleaned)?,
            "publishers": summary::publisher_counts(&cleaned, 10)?,
            "daily": summary::daily_counts(&cleaned)?,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_summary_tables(&cleaned)
}

fn print_summary_tables(df: &DataFrame) -> Result<()> {
    let stats = summary::headline_length_stats(df)?;
    let mut table = Table::new();
    table.set_header(vec!["statistic", "value"]);
    table.add_row(vec!["count".to_string(), stats.count.to_string()]);
    table.add_row(vec!["mean".to_string(), format!("{:.2}", stats.mean)]);
    table.add_row(vec!["std".to_string(), format!("{:.2}", stats.std)]);
    table.add_row(vec!["min".to_string(), stats.min.to_string()]);
    table.add_row(vec!["25%".to_string(), format!("{:.1}", stats.q25)]);
    table.add_row(vec!["50%".to_string(), format!("{:.1}", stats.median)]);
    table.add_row(vec!["75%".to_string(), format!("{:.1}", stats.q75)]);
    table.add_row(vec!["max".to_string(), stats.max.to_string()]);
    println!("Headline length distribution:\n{table}");

    let publishers = summary::publisher_counts(df, 10)?;
    let mut table = Table::new();
    table.set_header(vec!["publisher", "articles"]);
    for row in &publishers {
        table.add_row(vec![row.publisher.clone(), row.articles.to_string()]);
    }
    println!("Most active publishers:\n{table}");

    let daily = summary::daily_counts(df)?;
    let mut table = Table::new();
    table.set_header(vec!["date", "articles"]);
    for row in &daily {
        table.add_row(vec![row.date.to_string(), row.articles.to_string()]);
    }
    println!("Articles per day:\n{table}");

    Ok(())
}
