//! Home page

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::Serialize;

use super::{categories, nav_from, NavLink, Page};
use crate::api::{queries, ContentSource};
use crate::config::SiteConfig;
use crate::content::{Category, HomeBuckets};
use crate::error::AppError;
use crate::helpers;
use crate::views::{CardContext, CardStyle, PostCard};

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub trending_topics: Vec<NavLink>,
    pub featured: Vec<PostCard>,
    pub trending: Vec<PostCard>,
    pub editors_choice: Vec<PostCard>,
    pub sponsored: Vec<PostCard>,
    pub breaking: Vec<PostCard>,
    pub partnership: Vec<PostCard>,
}

impl HomePage {
    /// Slugs of every post the home page links to, first appearance first
    pub fn linked_slugs(&self) -> Vec<&str> {
        let sections = [
            &self.featured,
            &self.trending,
            &self.editors_choice,
            &self.sponsored,
            &self.breaking,
            &self.partnership,
        ];

        sections
            .into_iter()
            .flatten()
            .map(|card| card.slug.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Fetch every post and bucket it into the home page sections
///
/// Failing to fetch the post list fails the page. The category list feeds
/// both the header and the trending topics.
pub async fn home_page<S: ContentSource + ?Sized>(
    source: &S,
    config: &SiteConfig,
    now: DateTime<Utc>,
) -> Result<Page<HomePage>, AppError> {
    let (categories, posts) = tokio::join!(categories(source), queries::all_posts(source));
    let posts = posts?;
    let trending_topics = Category::trending(&categories)
        .map(|c| NavLink {
            name: c.name.clone(),
            url: helpers::category_path(&c.slug),
        })
        .collect();

    let buckets = HomeBuckets::assemble(&posts);
    tracing::debug!(
        "Home: {} posts, {} featured, {} trending",
        posts.len(),
        buckets.featured.len(),
        buckets.trending.len()
    );

    let cards = CardContext::new(now, &config.fallback_image);
    Ok(Page {
        title: config.title.clone(),
        path: "/".to_string(),
        nav: nav_from(&categories),
        view: HomePage {
            trending_topics,
            featured: cards.cards(&buckets.featured, CardStyle::Wide),
            trending: cards.cards(&buckets.trending, CardStyle::Wide),
            editors_choice: cards.cards(&buckets.editors_choice, CardStyle::Square),
            sponsored: cards.cards(&buckets.sponsored, CardStyle::Wide),
            breaking: cards.cards(&buckets.breaking, CardStyle::Thumb),
            partnership: cards.cards(&buckets.partnership, CardStyle::Thumb),
        },
    })
}
