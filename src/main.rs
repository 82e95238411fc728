//! get-papers-list - PubMed papers with company-affiliated authors
//!
//! Searches PubMed, keeps papers with at least one author whose affiliation
//! looks commercial, and writes them as CSV or prints them.
//!
//! ## Usage
//!
//! ```bash
//! get-papers-list "cancer immunotherapy" --file results.csv
//! get-papers-list "crispr delivery" --debug
//! ```
//!
//! ## Exit status
//!
//! `0` on success (including no matches), `2` for usage errors, `3` when
//! PubMed could not be reached, `4` for an unparsable citation document and
//! `5` when results could not be written.

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_company_papers::eutils::{EutilsClient, EutilsConfig, DEFAULT_MAX_RESULTS};
use pubmed_company_papers::output::OutputSink;
use pubmed_company_papers::{Pipeline, PipelineOutcome, PubmedError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch PubMed papers with company affiliations
#[derive(Parser)]
#[command(name = "get-papers-list")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PubMed search query (e.g., "cancer immunotherapy")
    query: String,

    /// Filename to save results as CSV (e.g., output.csv); prints to console if omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug output for troubleshooting
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Maximum number of PubMed records to retrieve
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// NCBI API key
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Contact email sent to NCBI
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging (stderr, so console results stay on stdout)
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = EutilsConfig {
        max_results: cli.max_results,
        timeout: Duration::from_secs(cli.timeout),
        api_key: cli.api_key,
        email: cli.email,
        ..Default::default()
    };
    debug!(
        max_results = config.max_results,
        timeout = ?config.timeout,
        api_key = config.api_key.is_some(),
        "E-utilities configuration"
    );

    let sink = OutputSink::from_path(cli.file);
    search_and_report(&cli.query, config, &sink, &mut std::io::stdout()).await
}

/// Run the pipeline for `query` and hand the outcome to `sink`.
///
/// Status lines go to `out`. The sink is left untouched when the search
/// matched nothing.
async fn search_and_report<W: Write>(
    query: &str,
    config: EutilsConfig,
    sink: &OutputSink,
    out: &mut W,
) -> Result<()> {
    let client = EutilsClient::new(config)?;
    let outcome = Pipeline::new(client).run(query).await?;

    match outcome {
        PipelineOutcome::NoResults => {
            writeln!(out, "No papers found.").map_err(PubmedError::from)?;
        }
        PipelineOutcome::Papers(papers) => {
            sink.emit(&papers).context("Failed to write results")?;
            if let OutputSink::Csv(path) = sink {
                writeln!(out, "Results saved to {}", path.display()).map_err(PubmedError::from)?;
            }
        }
    }

    Ok(())
}

/// Exit status for a failed run
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PubmedError>()
        .map(PubmedError::exit_code)
        .unwrap_or(1)
}
