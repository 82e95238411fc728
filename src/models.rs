//! Records produced while turning a citation document into output rows.

use serde::{Deserialize, Serialize};

/// Separator used when list-valued fields are flattened into one column
pub const LIST_SEPARATOR: &str = "; ";

/// Placeholder written when no corresponding email was found
pub const MISSING_EMAIL: &str = "N/A";

/// Output column order
pub const PAPER_COLUMNS: &[&str] = &[
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academicAuthor(s)",
    "CompanyAffiliation(s)",
    "Corresponding Author Email",
];

/// One author of one article, as read from the citation document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorRecord {
    pub last_name: String,
    pub fore_name: Option<String>,
    /// Affiliation texts in document order; missing text is kept as `""`
    pub affiliations: Vec<String>,
}

impl AuthorRecord {
    /// `"<LastName> <ForeName>"`, trimmed
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.last_name,
            self.fore_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// A paper with at least one company-affiliated author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperRecord {
    pub pubmed_id: String,
    pub title: Option<String>,
    /// `Year-Month-Day` with absent parts omitted, or empty
    pub publication_date: String,
    /// One entry per qualifying affiliation, so a name may repeat
    pub non_academic_authors: Vec<String>,
    /// Unique affiliation texts in first-seen order
    pub company_affiliations: Vec<String>,
    pub corresponding_email: Option<String>,
}

/// Flat six-column representation of a [`PaperRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academicAuthor(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "CompanyAffiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl From<&PaperRecord> for PaperRow {
    fn from(paper: &PaperRecord) -> Self {
        Self {
            pubmed_id: paper.pubmed_id.clone(),
            title: paper.title.clone().unwrap_or_default(),
            publication_date: paper.publication_date.clone(),
            non_academic_authors: paper.non_academic_authors.join(LIST_SEPARATOR),
            company_affiliations: paper.company_affiliations.join(LIST_SEPARATOR),
            corresponding_email: paper
                .corresponding_email
                .clone()
                .unwrap_or_else(|| MISSING_EMAIL.to_string()),
        }
    }
}

impl PaperRow {
    /// Column values in [`PAPER_COLUMNS`] order
    pub fn values(&self) -> [&str; 6] {
        [
            self.pubmed_id.as_str(),
            self.title.as_str(),
            self.publication_date.as_str(),
            self.non_academic_authors.as_str(),
            self.company_affiliations.as_str(),
            self.corresponding_email.as_str(),
        ]
    }
}

/// Split a joined list column back into its items.
///
/// An empty column splits to no items. A list whose only item is `""` (an
/// author with neither `LastName` nor `ForeName`, e.g. a `CollectiveName`
/// entry) also joins to `""`, so it does not survive the round trip.
pub fn split_joined(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_string).collect()
}
