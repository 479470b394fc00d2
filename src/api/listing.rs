//! List responses: either a bare JSON array or a paginated envelope

use serde::Deserialize;

/// A list endpoint response
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paginated(Paginated<T>),
}

/// Paginated envelope (`{count, next, previous, results}`)
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Listing<T> {
    /// The items, whichever shape the endpoint used
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Paginated(page) => page.results,
        }
    }
}
