mod error;
mod output;
mod parser;
mod record;
mod report;
mod settings;
mod source;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::PageError;
use crate::parser::PageExtraction;
use crate::record::Record;
use crate::report::RunReport;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "htgf_portfolio",
    about = "Extract HTGF portfolio companies from saved portfolio pages into a CSV table"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every page in the input directory and write the table (default)
    Run {
        /// Directory with saved pages (default: current directory)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output table path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the run summary as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Extract a single page and print its records as JSON
    Inspect {
        /// Saved page named prefix_CATEGORY_NUMBER_YYYY-MM-DD[.ext]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run {
        input: None,
        output: None,
        report: None,
    });

    let result = match command {
        Commands::Run { input, output, report } => {
            let settings = Settings::load()?.with_overrides(input, output, report);
            info!(settings = ?settings, "Starting portfolio extraction");
            run(&settings)
        }
        Commands::Inspect { file } => inspect(&file),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Discover → extract → write table → report.
fn run(settings: &Settings) -> anyhow::Result<()> {
    let mut exclude = vec![settings.output.as_path()];
    if let Some(report) = &settings.report {
        exclude.push(report.as_path());
    }
    let files = source::discover(&settings.input_dir, &exclude)?;
    if files.is_empty() {
        println!("No files in {}.", settings.input_dir.display());
    } else {
        println!("Processing {} files...", files.len());
    }

    let (records, report) = extract_files(&files)?;
    output::write_table(&settings.output, &records)?;

    report.print();
    if let Some(path) = &settings.report {
        report.write_json(path)?;
    }
    Ok(())
}

fn inspect(file: &Path) -> anyhow::Result<()> {
    let page = process_file(file)
        .1
        .with_context(|| format!("No records extracted from {}", file.display()))?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

/// Pages are extracted independently; records keep file-then-block order.
fn extract_files(files: &[PathBuf]) -> anyhow::Result<(Vec<Record>, RunReport)> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let outcomes = extract_each(files, &pb);
    pb.finish_and_clear();

    let mut records = Vec::new();
    let mut report = RunReport::default();
    for (filename, outcome) in outcomes {
        match outcome {
            Ok(page) => {
                report.record_page(&page);
                records.extend(page.records);
            }
            Err(e) => {
                warn!("Skipping {}: {}", filename, e);
                report.record_skipped_page(&filename, &e);
            }
        }
    }

    info!(
        "Extracted {} records from {} pages ({} skipped)",
        report.records,
        report.pages,
        report.skipped_pages.len()
    );
    Ok((records, report))
}

type PageOutcome = (String, Result<PageExtraction, PageError>);

#[cfg(feature = "rayon")]
fn extract_each(files: &[PathBuf], pb: &ProgressBar) -> Vec<PageOutcome> {
    files
        .par_iter()
        .map(|path| {
            let outcome = process_file(path);
            pb.inc(1);
            outcome
        })
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn extract_each(files: &[PathBuf], pb: &ProgressBar) -> Vec<PageOutcome> {
    files
        .iter()
        .map(|path| {
            let outcome = process_file(path);
            pb.inc(1);
            outcome
        })
        .collect()
}

fn process_file(path: &Path) -> PageOutcome {
    let filename = source::file_name(path);
    let outcome = source::read_page(path)
        .map_err(|e| PageError::Unreadable(e.to_string()))
        .and_then(|page| parser::extract_page(&page.bytes, &page.filename));
    (filename, outcome)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_end_to_end() {
        let dir = std::env::temp_dir().join(format!("htgf_run_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["htgf_software_007_2020-06-01.html", "htgf_hardware_002_2021-01-15.html"] {
            std::fs::copy(format!("tests/fixtures/{}", name), dir.join(name)).unwrap();
        }
        std::fs::write(dir.join("notes.txt"), "not a portfolio page").unwrap();

        let settings = Settings {
            input_dir: dir.clone(),
            output: dir.join("htgf_portfolio_output.csv"),
            report: Some(dir.join("report.json")),
        };
        run(&settings).unwrap();

        let table = std::fs::read_to_string(&settings.output).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 1 + 3 + 1);
        assert!(lines[0].starts_with("company_name;"));
        assert!(lines[1..].iter().all(|l| l.split(';').count() == 22));

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("report.json")).unwrap()).unwrap();
        assert_eq!(report["pages"], 3);
        assert_eq!(report["records"], 4);
        assert_eq!(report["skipped_pages_by_reason"]["filename"], 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_directory_writes_header_only() {
        let dir = std::env::temp_dir().join(format!("htgf_empty_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let settings = Settings {
            input_dir: dir.clone(),
            output: dir.join("out.csv"),
            report: None,
        };
        run(&settings).unwrap();
        let table = std::fs::read_to_string(&settings.output).unwrap();
        assert_eq!(table.lines().count(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn duration_format() {
        assert_eq!(format_duration(std::time::Duration::from_secs(75)), "1m 15s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }
}
