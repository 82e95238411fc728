//! PubMed citation document parser.
//!
//! Turns an efetch XML document into [`PaperRecord`]s, keeping only papers
//! with at least one company-affiliated author. A document that is not
//! well-formed fails as a whole; missing optional elements never do.

use crate::error::Result;
use crate::extractor::AuthorInfoExtractor;
use crate::models::{AuthorRecord, PaperRecord};
use crate::xml::{parse_document, XmlElement};
use tracing::{debug, info};

/// Parses citation documents and filters them to qualifying papers.
#[derive(Debug, Clone, Default)]
pub struct CitationParser {
    extractor: AuthorInfoExtractor,
}

impl CitationParser {
    pub fn new(extractor: AuthorInfoExtractor) -> Self {
        Self { extractor }
    }

    /// Parse `document` and return the qualifying papers in document order.
    pub fn parse(&self, document: &str) -> Result<Vec<PaperRecord>> {
        let root = parse_document(document)?;

        let mut papers = Vec::new();
        let mut total = 0usize;

        for article in root.find_all("PubmedArticle") {
            total += 1;
            if let Some(paper) = self.parse_article(article) {
                papers.push(paper);
            }
        }

        info!(articles = total, qualifying = papers.len(), "Parsed citation document");
        Ok(papers)
    }

    fn parse_article(&self, article: &XmlElement) -> Option<PaperRecord> {
        let pubmed_id = article.find_text("PMID").unwrap_or_default();
        let authors = parse_authors(article);
        let signals = self.extractor.extract(&authors);

        if !signals.qualifies() {
            debug!(pmid = %pubmed_id, authors = authors.len(), "No company-affiliated author");
            return None;
        }

        Some(PaperRecord {
            title: article.find_text("ArticleTitle"),
            publication_date: publication_date(article),
            pubmed_id,
            non_academic_authors: signals.non_academic_authors,
            company_affiliations: signals.company_affiliations,
            corresponding_email: signals.corresponding_email,
        })
    }
}

/// `Year-Month-Day` of the first `PubDate`, skipping absent parts
fn publication_date(article: &XmlElement) -> String {
    let Some(pub_date) = article.find("PubDate") else {
        return String::new();
    };

    ["Year", "Month", "Day"]
        .iter()
        .filter_map(|part| pub_date.child_text(part))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn parse_authors(article: &XmlElement) -> Vec<AuthorRecord> {
    article
        .find_all("Author")
        .map(|author| AuthorRecord {
            last_name: author.child_text("LastName").unwrap_or_default(),
            fore_name: author.child_text("ForeName"),
            affiliations: author
                .children_named("AffiliationInfo")
                .map(|info| info.child_text("Affiliation").unwrap_or_default())
                .collect(),
        })
        .collect()
}
