//! Query filters for the `/posts/` endpoint

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone when encoding query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Filter set for listing posts
///
/// Only present keys reach the wire: `None`, empty strings, a zero limit and
/// `false` flags are omitted rather than sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub limit: Option<usize>,
    pub trending: bool,
    pub featured: bool,
    pub is_breaking: bool,
    pub is_sponsored: bool,
    pub search: Option<String>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, slug: &str) -> Self {
        self.category = Some(slug.to_string());
        self
    }

    pub fn subcategory(mut self, slug: &str) -> Self {
        self.subcategory = Some(slug.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn trending(mut self) -> Self {
        self.trending = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn breaking(mut self) -> Self {
        self.is_breaking = true;
        self
    }

    pub fn sponsored(mut self) -> Self {
        self.is_sponsored = true;
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    /// Key/value pairs for the keys that are present, in wire order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = non_empty(&self.category) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(subcategory) = non_empty(&self.subcategory) {
            pairs.push(("subcategory", subcategory.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        for (key, set) in [
            ("trending", self.trending),
            ("featured", self.featured),
            ("is_breaking", self.is_breaking),
            ("is_sponsored", self.is_sponsored),
        ] {
            if set {
                pairs.push((key, "true".to_string()));
            }
        }
        if let Some(search) = non_empty(&self.search) {
            pairs.push(("search", search.to_string()));
        }

        pairs
    }

    /// Encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
