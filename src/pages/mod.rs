//! Page assembly: fetch, bucket and shape data for the templates
//!
//! Every assembler returns a [`Page`] whose serialized form is the Tera
//! context of the matching template.

mod category;
mod home;
mod post;

pub use category::{category_page, subcategory_page, CategoryPage, ListItem};
pub use home::{home_page, HomePage};
pub use post::{post_page, PostPage, PostView, RelatedGroup};

use serde::Serialize;

use crate::api::ContentSource;
use crate::content::{Category, Post};
use crate::error::ApiResult;
use crate::helpers;

/// A rendered page: chrome shared by every template plus the page's own view
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub title: String,
    pub path: String,
    pub nav: Vec<NavCategory>,
    #[serde(flatten)]
    pub view: T,
}

/// Body of the 404 and error pages
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub heading: String,
    pub message: String,
}

/// Header navigation entry
#[derive(Debug, Clone, Serialize)]
pub struct NavCategory {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub subcategories: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub name: String,
    pub url: String,
}

impl NavCategory {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            url: helpers::category_path(&category.slug),
            subcategories: category
                .subcategories
                .iter()
                .map(|sub| NavLink {
                    name: sub.name.clone(),
                    url: helpers::subcategory_path(&category.slug, &sub.slug),
                })
                .collect(),
        }
    }
}

pub fn nav_from(categories: &[Category]) -> Vec<NavCategory> {
    categories.iter().map(NavCategory::from_category).collect()
}

/// Category list for the header; a failure leaves it empty
pub async fn categories<S: ContentSource + ?Sized>(source: &S) -> Vec<Category> {
    source.fetch_categories().await.unwrap_or_else(|e| {
        tracing::warn!("Categories unavailable: {}", e);
        Vec::new()
    })
}

pub async fn nav<S: ContentSource + ?Sized>(source: &S) -> Vec<NavCategory> {
    nav_from(&categories(source).await)
}

/// 404 page
pub async fn not_found_page<S: ContentSource + ?Sized>(source: &S) -> Page<StatusView> {
    Page {
        title: "Page not found".to_string(),
        path: String::new(),
        nav: nav(source).await,
        view: StatusView {
            heading: "Page not found".to_string(),
            message: "The page you are looking for does not exist.".to_string(),
        },
    }
}

/// Error page; rendered without navigation since the API may be down
pub fn error_page(message: &str) -> Page<StatusView> {
    Page {
        title: "Something went wrong".to_string(),
        path: String::new(),
        nav: Vec::new(),
        view: StatusView {
            heading: "Something went wrong".to_string(),
            message: message.to_string(),
        },
    }
}

/// Side rail posts; a failed fetch is logged and shows the empty state
fn rail(result: ApiResult<Vec<Post>>, name: &str) -> Vec<Post> {
    result.unwrap_or_else(|e| {
        tracing::warn!("{} unavailable: {}", name, e);
        Vec::new()
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemorySource;

    #[tokio::test]
    async fn test_nav_links() {
        let source = MemorySource::new(Vec::new()).with_categories(fixtures::categories());
        let nav = nav(&source).await;
        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].url, "/category/news");
        assert_eq!(nav[0].subcategories[0].url, "/category/news/politics");
    }

    #[tokio::test]
    async fn test_nav_failure_is_empty() {
        let mut source = MemorySource::new(Vec::new()).with_categories(fixtures::categories());
        source.fail_categories = true;
        assert!(nav(&source).await.is_empty());
    }

    #[test]
    fn test_page_context_is_flat() {
        let page = error_page("boom");
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["heading"], "Something went wrong");
        assert_eq!(value["message"], "boom");
        assert!(value["nav"].as_array().unwrap().is_empty());
    }
}
