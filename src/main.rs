use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use parcelguard::config::Config;
use parcelguard::manifest::{Disposition, ManifestCheck, ScreeningSummary};
use parcelguard::output::{markdown, terminal};
use parcelguard::screening::levenshtein_distance;
use parcelguard::screening::traits::{ContentScreener, KeywordScreener};

/// Exit code when a checked description must be blocked.
const EXIT_BLOCKED: i32 = 2;

/// ParcelGuard: contraband screening for shipment descriptions.
///
/// Flags references to weapons, hazardous materials, narcotics, controlled
/// medication, and protected-species goods, including misspelled ones.
#[derive(Parser)]
#[command(name = "parcelguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a single shipment description
    Check {
        /// The description to screen (read from stdin when omitted)
        text: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Screen a file with one description per line
    Scan {
        /// Path to the descriptions file
        file: String,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Screen a file and write a Markdown report
    Report {
        /// Path to the descriptions file
        file: String,

        /// Where to write the report (default: PARCELGUARD_REPORT_PATH)
        #[arg(long)]
        output: Option<String>,
    },

    /// List the risk categories and keywords in effect
    Taxonomy {
        /// Print the taxonomy as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the edit distance between two words
    Distance { a: String, b: String },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("parcelguard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { text, json } => {
            let screener = build_screener()?;
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read description from stdin")?;
                    buf
                }
            };

            let check = ManifestCheck::new(text.trim(), screener.screen(&text));

            if json {
                println!("{}", serde_json::to_string_pretty(&check)?);
            } else {
                terminal::display_check(&check);
            }

            if check.disposition == Disposition::Block {
                std::process::exit(EXIT_BLOCKED);
            }
        }

        Commands::Scan { file, json } => {
            let screener = build_screener()?;
            let checks = screen_file(&screener, &file)?;

            if json {
                let summary = ScreeningSummary::from_checks(&checks);
                let payload = serde_json::json!({ "checks": checks, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                terminal::display_batch(&checks);
            }
        }

        Commands::Report { file, output } => {
            let config = Config::load()?;
            let screener = build_screener()?;
            let checks = screen_file(&screener, &file)?;

            terminal::display_batch(&checks);

            let path = output.unwrap_or(config.report_path);
            let report_path = markdown::generate_report(&checks, &path)?;

            println!(
                "\n{}",
                format!("Markdown report saved to: {report_path}").bold()
            );
        }

        Commands::Taxonomy { json } => {
            let screener = build_screener()?;
            if json {
                println!("{}", serde_json::to_string_pretty(screener.taxonomy())?);
            } else {
                terminal::display_taxonomy(screener.taxonomy());
            }
        }

        Commands::Distance { a, b } => {
            println!("{}", levenshtein_distance(&a, &b));
        }
    }

    Ok(())
}

/// Build the screener from configuration (builtin taxonomy plus any extension).
fn build_screener() -> Result<KeywordScreener> {
    let config = Config::load()?;
    config.require_taxonomy_file()?;
    KeywordScreener::from_extension(config.taxonomy_path.as_deref())
}

/// Screen every non-blank line of `file`.
fn screen_file(screener: &dyn ContentScreener, file: &str) -> Result<Vec<ManifestCheck>> {
    let content = std::fs::read_to_string(Path::new(file))
        .with_context(|| format!("Failed to read descriptions from {file}"))?;

    let descriptions: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!(file, descriptions = descriptions.len(), "Screening descriptions");

    let results = screener.screen_batch(&descriptions);
    Ok(descriptions
        .into_iter()
        .zip(results)
        .map(|(description, result)| ManifestCheck::new(description, result))
        .collect())
}
