//! Paper-level author signals.
//!
//! Walks the authors of one article and collects the names of authors with a
//! company affiliation, the distinct company affiliation texts and the first
//! email address mentioned in any affiliation.

use crate::classifier::AffiliationClassifier;
use crate::models::AuthorRecord;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// What an article's author list says about company involvement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorSignals {
    /// Display name once per company affiliation, in encounter order
    pub non_academic_authors: Vec<String>,
    /// Distinct company affiliation texts, first-seen order
    pub company_affiliations: Vec<String>,
    /// First email found in any affiliation, company or not
    pub corresponding_email: Option<String>,
}

impl AuthorSignals {
    /// True when at least one author has a company affiliation
    pub fn qualifies(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }
}

/// Aggregates affiliation classifications over an author list.
#[derive(Debug, Clone, Default)]
pub struct AuthorInfoExtractor {
    classifier: AffiliationClassifier,
}

impl AuthorInfoExtractor {
    pub fn new(classifier: AffiliationClassifier) -> Self {
        Self { classifier }
    }

    /// Collect [`AuthorSignals`] for one article.
    pub fn extract(&self, authors: &[AuthorRecord]) -> AuthorSignals {
        let mut signals = AuthorSignals::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for author in authors {
            let name = author.display_name();

            for affiliation in &author.affiliations {
                if self.classifier.classify(affiliation) {
                    trace!(author = %name, affiliation = %affiliation, "Company affiliation");
                    signals.non_academic_authors.push(name.clone());
                    if seen.insert(affiliation.as_str()) {
                        signals.company_affiliations.push(affiliation.clone());
                    }
                }

                if signals.corresponding_email.is_none() {
                    signals.corresponding_email = find_email(affiliation);
                }
            }
        }

        signals
    }
}

/// First email-shaped substring of `text`
pub fn find_email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}
