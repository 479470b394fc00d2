//! Post model as delivered by the content API

use serde::{Deserialize, Serialize};
use std::fmt;

use super::flags::{deserialize_flag, deserialize_null_as_default};

/// Label shown for posts that carry no category
pub const DEFAULT_CATEGORY_LABEL: &str = "General";

/// Identifier of an API resource; the backend mixes numeric and string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{}", id),
            ResourceId::Str(id) => f.write_str(id),
        }
    }
}

/// Reference to the category or subcategory a post is filed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRef {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub name: String,
    pub slug: String,
}

/// A news post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: Option<ResourceId>,

    /// Unique URL key
    pub slug: String,

    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub title: String,

    /// Raw, untrusted HTML body
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub body: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    /// ISO 8601 publication timestamp
    #[serde(default)]
    pub published_date: Option<String>,

    #[serde(default)]
    pub date_modified: Option<String>,

    #[serde(default)]
    pub featured_image: Option<String>,

    #[serde(default)]
    pub category: Option<TermRef>,

    #[serde(default)]
    pub subcategory: Option<TermRef>,

    #[serde(default)]
    pub author_name: Option<String>,

    #[serde(default)]
    pub meta_description: Option<String>,

    // Editorial flags
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_trending: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_sponsored: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_editor_pick: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_read_also: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_affiliate: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_breaking: bool,
}

impl Post {
    /// Create a post with no flags set
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            id: None,
            slug: slug.to_string(),
            title: title.to_string(),
            body: String::new(),
            excerpt: None,
            published_date: None,
            date_modified: None,
            featured_image: None,
            category: None,
            subcategory: None,
            author_name: None,
            meta_description: None,
            is_featured: false,
            is_trending: false,
            is_sponsored: false,
            is_editor_pick: false,
            is_read_also: false,
            is_affiliate: false,
            is_breaking: false,
        }
    }

    /// Category name, or "General" when the post has none
    pub fn category_label(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(DEFAULT_CATEGORY_LABEL)
    }

    /// Read-also and affiliate posts are kept out of regular rails
    pub fn is_special(&self) -> bool {
        self.is_read_also || self.is_affiliate
    }

    /// Slug of the subcategory, if any
    pub fn subcategory_slug(&self) -> Option<&str> {
        self.subcategory.as_ref().map(|s| s.slug.as_str())
    }
}
