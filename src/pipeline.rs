//! Search → fetch → parse/filter orchestration.
//!
//! The pipeline runs its steps one after another and never retries. It does
//! not print anything: callers get a [`PipelineOutcome`] or a typed error and
//! decide how to present it.

use crate::error::{PubmedError, Result};
use crate::models::PaperRecord;
use crate::parser::CitationParser;
use async_trait::async_trait;
use tracing::info;

/// Where PMIDs and citation documents come from.
#[async_trait]
pub trait CitationSource: Send + Sync {
    /// PMIDs matching a free-text query, capped by the source
    async fn search_ids(&self, query: &str) -> Result<Vec<String>>;

    /// Raw citation document for `ids`
    async fn fetch_citations(&self, ids: &[String]) -> Result<String>;
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The search matched nothing; no document was retrieved
    NoResults,
    /// Qualifying papers in document order (possibly none)
    Papers(Vec<PaperRecord>),
}

impl PipelineOutcome {
    /// Papers produced by the run; empty for [`PipelineOutcome::NoResults`]
    pub fn papers(&self) -> &[PaperRecord] {
        match self {
            PipelineOutcome::NoResults => &[],
            PipelineOutcome::Papers(papers) => papers,
        }
    }
}

/// Sequences a [`CitationSource`] and a [`CitationParser`].
pub struct Pipeline<S> {
    source: S,
    parser: CitationParser,
}

impl<S: CitationSource> Pipeline<S> {
    /// Pipeline with the built-in keyword vocabularies
    pub fn new(source: S) -> Self {
        Self::with_parser(source, CitationParser::default())
    }

    pub fn with_parser(source: S, parser: CitationParser) -> Self {
        Self { source, parser }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one query end to end.
    pub async fn run(&self, query: &str) -> Result<PipelineOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PubmedError::Validation("query must not be empty".to_string()));
        }

        info!(query = query, "Searching PubMed");
        let ids = self.source.search_ids(query).await?;

        if ids.is_empty() {
            info!(query = query, "No papers found");
            return Ok(PipelineOutcome::NoResults);
        }

        info!(count = ids.len(), "Fetching citation records");
        let document = self.source.fetch_citations(&ids).await?;

        let papers = self.parser.parse(&document)?;
        info!(
            fetched = ids.len(),
            qualifying = papers.len(),
            "Pipeline complete"
        );

        Ok(PipelineOutcome::Papers(papers))
    }
}
