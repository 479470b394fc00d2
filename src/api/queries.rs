//! Fetches built on top of a [`ContentSource`]

use super::{ContentSource, PostFilter};
use crate::content::{buckets, Post};
use crate::error::ApiResult;

pub const TRENDING_LIMIT: usize = 6;
pub const FEATURED_LIMIT: usize = 4;
pub const SEARCH_LIMIT: usize = 6;

/// Every post (no filter)
pub async fn all_posts<S: ContentSource + ?Sized>(source: &S) -> ApiResult<Vec<Post>> {
    source.fetch_posts(&PostFilter::new()).await
}

/// Posts filed under a category
pub async fn posts_by_category<S: ContentSource + ?Sized>(
    source: &S,
    category: &str,
) -> ApiResult<Vec<Post>> {
    source.fetch_posts(&PostFilter::new().category(category)).await
}

/// Posts filed under a subcategory
///
/// When the server-side subcategory filter yields nothing, fall back to the
/// category listing and match the subcategory slug locally. Errors degrade to
/// an empty list.
pub async fn posts_by_subcategory<S: ContentSource + ?Sized>(
    source: &S,
    category: &str,
    subcategory: &str,
) -> Vec<Post> {
    let filtered = source
        .fetch_posts(&PostFilter::new().category(category).subcategory(subcategory))
        .await;

    let result = match filtered {
        Ok(posts) if !posts.is_empty() => Ok(posts),
        Ok(_) => {
            tracing::warn!(
                "Subcategory filter returned nothing for {}/{}, filtering locally",
                category,
                subcategory
            );
            posts_by_category(source, category).await.map(|posts| {
                posts
                    .into_iter()
                    .filter(|p| p.subcategory_slug() == Some(subcategory))
                    .collect()
            })
        }
        Err(e) => Err(e),
    };

    result.unwrap_or_else(|e| {
        tracing::error!("Subcategory fetch error: {}", e);
        Vec::new()
    })
}

/// Latest trending posts
pub async fn trending_posts<S: ContentSource + ?Sized>(source: &S) -> ApiResult<Vec<Post>> {
    source
        .fetch_posts(&PostFilter::new().trending().limit(TRENDING_LIMIT))
        .await
}

/// Latest featured posts
pub async fn featured_posts<S: ContentSource + ?Sized>(source: &S) -> ApiResult<Vec<Post>> {
    source
        .fetch_posts(&PostFilter::new().featured().limit(FEATURED_LIMIT))
        .await
}

/// Breaking news rail (at most four, no read-also/affiliate posts)
pub async fn breaking_news<S: ContentSource + ?Sized>(source: &S) -> ApiResult<Vec<Post>> {
    let posts = source
        .fetch_posts(&PostFilter::new().breaking().limit(buckets::SIDEBAR_CAP))
        .await?;
    Ok(buckets::breaking_news(&posts))
}

/// Partnership rail (at most four, no read-also/affiliate posts)
pub async fn partnership_posts<S: ContentSource + ?Sized>(source: &S) -> ApiResult<Vec<Post>> {
    let posts = source
        .fetch_posts(&PostFilter::new().sponsored().limit(buckets::SIDEBAR_CAP))
        .await?;
    Ok(buckets::partnership(&posts))
}

/// Posts matching a search term
pub async fn search_posts<S: ContentSource + ?Sized>(
    source: &S,
    term: &str,
) -> ApiResult<Vec<Post>> {
    source
        .fetch_posts(&PostFilter::new().search(term).limit(SEARCH_LIMIT))
        .await
}
