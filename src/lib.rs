//! # pubmed-company-papers
//!
//! Find PubMed papers with at least one author affiliated with a company.
//!
//! ## Modules
//!
//! - [`classifier`] - Company vs. academic affiliation heuristic
//! - [`extractor`] - Per-paper author signals (names, affiliations, email)
//! - [`parser`] - PubMed XML citation document parser
//! - [`xml`] - Null-safe element tree used by the parser
//! - [`pipeline`] - Search → fetch → parse orchestration
//! - [`eutils`] - NCBI E-utilities client
//! - [`output`] - CSV and console sinks
//! - [`models`] - Paper and author records
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubmed_company_papers::eutils::{EutilsClient, EutilsConfig};
//! use pubmed_company_papers::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = EutilsClient::new(EutilsConfig::default())?;
//!     let outcome = Pipeline::new(client).run("cancer immunotherapy").await?;
//!     println!("Found {} papers", outcome.papers().len());
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod error;
pub mod eutils;
pub mod extractor;
pub mod models;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod xml;

pub use error::{ErrorKind, PubmedError, Result};
pub use models::{AuthorRecord, PaperRecord, PaperRow};
pub use pipeline::{CitationSource, Pipeline, PipelineOutcome};
