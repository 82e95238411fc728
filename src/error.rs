//! Custom error types for pubmed-company-papers.
//!
//! Every fallible operation in the library returns `Result<T, PubmedError>`.
//! Absent optional fields in a citation document are never errors; they are
//! substituted with empty values during parsing.

use thiserror::Error;

/// Main error type for pubmed-company-papers operations.
#[derive(Debug, Error)]
pub enum PubmedError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// E-utilities returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the service
        message: String,
    },

    /// Search response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Citation document could not be parsed as markup
    #[error("Malformed citation document: {0}")]
    MalformedDocument(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Coarse grouping of [`PubmedError`] used to decide how a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// IDs or the citation document could not be retrieved
    Retrieval,
    /// The citation document is not structurally valid
    MalformedDocument,
    /// Results could not be written to the sink
    Output,
    /// Bad input or client configuration
    Usage,
}

impl ErrorKind {
    /// Process exit status for this kind of failure.
    ///
    /// `0` is reserved for success (including an empty search result) and
    /// `2` is shared with clap's own usage errors.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Usage => 2,
            ErrorKind::Retrieval => 3,
            ErrorKind::MalformedDocument => 4,
            ErrorKind::Output => 5,
        }
    }
}

impl PubmedError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PubmedError::Network(_) | PubmedError::Api { .. } | PubmedError::InvalidResponse(_) => {
                ErrorKind::Retrieval
            }
            PubmedError::MalformedDocument(_) => ErrorKind::MalformedDocument,
            PubmedError::Io(_) | PubmedError::Csv(_) => ErrorKind::Output,
            PubmedError::Config(_) | PubmedError::Validation(_) => ErrorKind::Usage,
        }
    }

    /// Shortcut for `self.kind().exit_code()`.
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

impl From<quick_xml::Error> for PubmedError {
    fn from(e: quick_xml::Error) -> Self {
        PubmedError::MalformedDocument(e.to_string())
    }
}

/// Result type alias using `PubmedError`
pub type Result<T> = std::result::Result<T, PubmedError>;
