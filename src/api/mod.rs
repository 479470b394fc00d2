//! Content API access
//!
//! [`ContentSource`] is the fetch surface the pages are built from. The HTTP
//! implementation is [`ApiClient`]; derived fetches (subcategory fallback,
//! sidebar rails, search) live in [`queries`].

mod client;
mod filter;
mod listing;
pub mod queries;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

pub use client::ApiClient;
pub use filter::PostFilter;
pub use listing::{Listing, Paginated};

use crate::content::{Category, Post};
use crate::error::ApiResult;

/// Something posts and categories can be fetched from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// List posts matching a filter, in the order the source returns them
    async fn fetch_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>>;

    /// Look up one post; any failure is reported as not found
    async fn fetch_post(&self, slug: &str) -> Option<Post>;

    /// The category tree
    async fn fetch_categories(&self) -> ApiResult<Vec<Category>>;
}
