//! Heuristic company/academic affiliation classifier.
//!
//! An affiliation is a company affiliation when it mentions at least one
//! company keyword and no academic keyword. Matching is a case-insensitive
//! substring test, so `"inc"` also matches inside longer words.

/// Built-in company vocabulary
pub const COMPANY_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "therapeutics",
    "inc",
    "ltd",
    "llc",
    "gmbh",
    "laboratories",
    "solutions",
];

/// Built-in academic vocabulary
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "institute",
    "college",
    "hospital",
    "school",
    "department",
    "center",
    "centre",
    "academy",
];

/// Affiliation classifier over two fixed keyword vocabularies.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    company: Vec<String>,
    academic: Vec<String>,
}

impl AffiliationClassifier {
    /// Create a classifier from explicit vocabularies.
    ///
    /// Keywords are lowercased; blank entries are dropped since an empty
    /// pattern would match every affiliation.
    pub fn new<I, J, S, T>(company: I, academic: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            company: normalize(company),
            academic: normalize(academic),
        }
    }

    /// Company keywords in use
    pub fn company_keywords(&self) -> &[String] {
        &self.company
    }

    /// Returns true when `text` looks like a commercial affiliation.
    ///
    /// Any academic keyword wins over company keywords. Empty text is never
    /// a company affiliation.
    pub fn classify(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let lower = text.to_lowercase();
        let has_company = self.company.iter().any(|k| lower.contains(k.as_str()));
        has_company && !self.academic.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new(COMPANY_KEYWORDS, ACADEMIC_KEYWORDS)
    }
}

fn normalize<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
