//! Category tree (one level of subcategories)

use serde::{Deserialize, Serialize};

use super::flags::{deserialize_flag, deserialize_null_as_empty};
use super::post::{ResourceId, TermRef};

/// A top-level category with its subcategories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<ResourceId>,
    pub name: String,
    pub slug: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_trending: bool,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub subcategories: Vec<TermRef>,
}

impl Category {
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            slug: slug.to_string(),
            is_trending: false,
            subcategories: Vec::new(),
        }
    }

    /// Categories flagged as trending, in API order
    pub fn trending(categories: &[Category]) -> impl Iterator<Item = &Category> {
        categories.iter().filter(|c| c.is_trending)
    }

    /// Find a subcategory by slug
    pub fn subcategory(&self, slug: &str) -> Option<&TermRef> {
        self.subcategories.iter().find(|s| s.slug == slug)
    }
}
