//! Editorial buckets for the home page and sidebars
//!
//! Flags overlap (a sponsored post can also be an editor's pick), so buckets
//! that are shown side by side are deduplicated by slug and capped to keep
//! each section bounded.

use std::collections::HashSet;

use serde::Serialize;

use super::Post;

pub const FEATURED_CAP: usize = 4;
pub const TRENDING_CAP: usize = 6;
pub const EDITORS_CHOICE_CAP: usize = 6;
pub const SPONSORED_IN_EDITORS_CAP: usize = 2;
pub const SIDEBAR_CAP: usize = 4;

/// All sections of the home page
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeBuckets {
    pub featured: Vec<Post>,
    pub trending: Vec<Post>,
    pub sponsored: Vec<Post>,
    pub editors_choice: Vec<Post>,
    pub breaking: Vec<Post>,
    pub partnership: Vec<Post>,
}

impl HomeBuckets {
    /// Partition a flat post list into the home page sections
    pub fn assemble(posts: &[Post]) -> Self {
        Self {
            featured: featured(posts),
            trending: trending(posts),
            sponsored: sponsored(posts),
            editors_choice: editors_choice(posts),
            breaking: breaking_news(posts),
            partnership: partnership(posts),
        }
    }
}

fn take_where<'a, F>(posts: impl IntoIterator<Item = &'a Post>, cap: usize, pred: F) -> Vec<Post>
where
    F: Fn(&Post) -> bool,
{
    posts
        .into_iter()
        .filter(|p| pred(*p))
        .take(cap)
        .cloned()
        .collect()
}

/// First four featured posts
pub fn featured(posts: &[Post]) -> Vec<Post> {
    take_where(posts, FEATURED_CAP, |p| p.is_featured)
}

/// First six trending posts
pub fn trending(posts: &[Post]) -> Vec<Post> {
    take_where(posts, TRENDING_CAP, |p| p.is_trending)
}

/// Every sponsored post
pub fn sponsored(posts: &[Post]) -> Vec<Post> {
    take_where(posts, usize::MAX, |p| p.is_sponsored)
}

/// Editor's choice: editor picks, with up to two sponsored posts mixed in,
/// backfilled with non-featured posts up to six entries
pub fn editors_choice(posts: &[Post]) -> Vec<Post> {
    let primary = take_where(posts, EDITORS_CHOICE_CAP, |p| p.is_editor_pick);
    let primary_slugs: HashSet<&str> = primary.iter().map(|p| p.slug.as_str()).collect();

    let secondary = take_where(posts, SPONSORED_IN_EDITORS_CAP, |p| {
        p.is_sponsored && !primary_slugs.contains(p.slug.as_str())
    });

    let mut chosen = if secondary.is_empty() {
        primary
    } else {
        let keep = EDITORS_CHOICE_CAP.saturating_sub(secondary.len());
        let mut chosen: Vec<Post> = primary.into_iter().take(keep).collect();
        chosen.extend(secondary);
        chosen
    };

    let mut used: HashSet<String> = chosen.iter().map(|p| p.slug.clone()).collect();
    for post in posts {
        if chosen.len() >= EDITORS_CHOICE_CAP {
            break;
        }
        if !post.is_featured && used.insert(post.slug.clone()) {
            chosen.push(post.clone());
        }
    }

    chosen
}

/// Breaking news rail: breaking posts that are not read-also or affiliate
pub fn breaking_news<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<Post> {
    take_where(posts, SIDEBAR_CAP, |p| p.is_breaking && !p.is_special())
}

/// Partnership rail: sponsored posts that are not read-also or affiliate
pub fn partnership<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<Post> {
    take_where(posts, SIDEBAR_CAP, |p| p.is_sponsored && !p.is_special())
}
