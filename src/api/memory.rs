//! In-memory content source used by tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ContentSource, PostFilter};
use crate::content::{Category, Post};
use crate::error::{ApiError, ApiResult};

/// Applies filters the way the content API does, and records every request
#[derive(Default)]
pub struct MemorySource {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    /// Ignore the `subcategory` filter and return nothing, like a backend
    /// that has not implemented it
    pub subcategory_filter_broken: bool,
    /// Categories whose listing fails with a 500
    pub failing_categories: HashSet<String>,
    pub fail_posts: bool,
    pub fail_categories: bool,
    /// Artificial latency per search term
    pub search_delays: Vec<(String, Duration)>,
    requests: Mutex<Vec<PostFilter>>,
    category_fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Every filter received so far
    pub fn requests(&self) -> Vec<PostFilter> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of category list fetches so far
    pub fn category_fetches(&self) -> usize {
        self.category_fetches.load(Ordering::SeqCst)
    }

    fn failure(url: &str) -> ApiError {
        ApiError::status(url, reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn matches(&self, post: &Post, filter: &PostFilter) -> bool {
        if let Some(category) = &filter.category {
            if post.category.as_ref().map(|c| &c.slug) != Some(category) {
                return false;
            }
        }
        if let Some(subcategory) = &filter.subcategory {
            if self.subcategory_filter_broken
                || post.subcategory_slug() != Some(subcategory.as_str())
            {
                return false;
            }
        }
        if let Some(term) = &filter.search {
            if !post.title.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        (!filter.trending || post.is_trending)
            && (!filter.featured || post.is_featured)
            && (!filter.is_breaking || post.is_breaking)
            && (!filter.is_sponsored || post.is_sponsored)
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>> {
        self.requests.lock().unwrap().push(filter.clone());

        if let Some(term) = &filter.search {
            if let Some((_, delay)) = self.search_delays.iter().find(|(t, _)| t == term) {
                tokio::time::sleep(*delay).await;
            }
        }

        if self.fail_posts {
            return Err(Self::failure("memory://posts/"));
        }
        if let Some(category) = &filter.category {
            if self.failing_categories.contains(category) {
                return Err(Self::failure("memory://posts/"));
            }
        }

        let limit = filter.limit.filter(|l| *l > 0).unwrap_or(usize::MAX);
        Ok(self
            .posts
            .iter()
            .filter(|p| self.matches(p, filter))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_post(&self, slug: &str) -> Option<Post> {
        self.posts.iter().find(|p| p.slug == slug).cloned()
    }

    async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        self.category_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_categories {
            return Err(Self::failure("memory://categories/"));
        }
        Ok(self.categories.clone())
    }
}
