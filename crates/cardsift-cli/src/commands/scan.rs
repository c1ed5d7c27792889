//! Scan command - extract card records from a directory or zip archive.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardsift_core::models::CardRecord;
use cardsift_core::report::render_json;
use cardsift_core::{ResultSet, ScanConfig, Scanner, StrategyTag, open_source};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Directory or .zip archive to scan (defaults to the configured source)
    source: Option<PathBuf>,

    /// Report file (defaults to the configured report path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Descend into subdirectories and nested archive folders
    #[arg(short, long)]
    recursive: bool,

    /// Field delimiter for delimited rows
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Only run these strategies (repeatable)
    #[arg(short, long = "strategy", value_enum)]
    strategies: Vec<StrategyArg>,

    /// Extra file extensions to scan (repeatable, without dot)
    #[arg(short = 'e', long = "extension")]
    extensions: Vec<String>,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Banner-separated plain text blocks
    Text,
    /// JSON with records and run summary
    Json,
    /// CSV, one row per record
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    DelimitedRow,
    LabeledBlock,
    KeyValueBlock,
    FreeformScan,
    StructuredRecord,
}

impl From<StrategyArg> for StrategyTag {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::DelimitedRow => StrategyTag::DelimitedRow,
            StrategyArg::LabeledBlock => StrategyTag::LabeledBlock,
            StrategyArg::KeyValueBlock => StrategyTag::KeyValueBlock,
            StrategyArg::FreeformScan => StrategyTag::FreeformScan,
            StrategyArg::StructuredRecord => StrategyTag::StructuredRecord,
        }
    }
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::config::load(config_path)?;
    apply_overrides(&mut config, &args);

    let source_path = config.source.path.clone();
    info!("Scanning {}", source_path.display());

    let mut source = open_source(&source_path, &config.source)?;
    let total = source.identifiers()?.len();

    println!(
        "{} Found {} documents in {}",
        style("ℹ").blue(),
        total,
        source.location()
    );

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let scanner = Scanner::from_config(&config.extraction);
    let mut results = ResultSet::new();
    let run = scanner.scan_source_with_progress(source.as_mut(), &mut results, |identifier| {
        pb.set_message(identifier.to_string());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    let summary = results.summary();

    if summary.no_matches() {
        println!("{} No valid card records found.", style("ℹ").yellow());
    } else {
        let content = format_report(&results, args.format)?;
        if args.stdout {
            print!("{}", content);
        } else {
            let report_path = &config.output.report_path;
            if let Some(parent) = report_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(report_path, content)?;
            debug!("Wrote report to {}", report_path.display());
            println!(
                "{} Report written to {}",
                style("✓").green(),
                report_path.display()
            );
        }
    }

    println!();
    println!(
        "{} Scanned {} documents in {:?}",
        style("✓").green(),
        summary.documents_scanned,
        start.elapsed()
    );
    println!(
        "   {} candidates, {} valid, {} rejected, {} duplicates",
        summary.candidates_observed,
        style(summary.accepted).green(),
        style(summary.rejected).red(),
        summary.duplicates
    );
    if summary.documents_skipped > 0 {
        println!("   {} binary documents skipped", summary.documents_skipped);
    }

    if !run.failures.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for failure in &run.failures {
            println!("  - {}: {}", failure.identifier, failure.error);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut ScanConfig, args: &ScanArgs) {
    if let Some(source) = &args.source {
        config.source.path = source.clone();
    }
    if let Some(output) = &args.output {
        config.output.report_path = output.clone();
    }
    if args.recursive {
        config.source.recursive = true;
    }
    if let Some(delimiter) = &args.delimiter {
        config.extraction.delimiter = delimiter.clone();
    }
    if !args.strategies.is_empty() {
        config.extraction.strategies = args.strategies.iter().map(|&s| s.into()).collect();
    }
    for ext in &args.extensions {
        let ext = ext.trim_start_matches('.').to_lowercase();
        if !config.source.extensions.contains(&ext) {
            config.source.extensions.push(ext);
        }
    }
}

fn format_report(results: &ResultSet, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(results.render_report()),
        OutputFormat::Json => Ok(render_json(results.records(), results.summary())?),
        OutputFormat::Csv => format_csv(results.records()),
    }
}

fn format_csv(records: &[CardRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "card_number",
        "name",
        "expiration",
        "cvc",
        "origin_line",
        "source",
        "strategy",
    ])?;

    for record in records {
        wtr.write_record([
            record.card_number(),
            record.name(),
            record.expiration(),
            record.cvc(),
            record.origin_line(),
            record.source(),
            record.strategy().as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
