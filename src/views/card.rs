//! Post cards: the flattened, display-ready form of a post

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::Post;
use crate::helpers;

/// How a card's image is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    /// Wide grid card (trending, featured)
    Wide,
    /// Square grid card (editor's choice)
    Square,
    /// Small side-rail thumbnail
    Thumb,
}

impl CardStyle {
    fn transform(self) -> Option<&'static str> {
        match self {
            CardStyle::Wide => Some("f_auto,q_auto,w_800"),
            CardStyle::Square => Some("f_auto,q_auto,w_600"),
            CardStyle::Thumb => None,
        }
    }
}

/// Shared inputs for building cards on one page
#[derive(Debug, Clone)]
pub struct CardContext<'a> {
    pub now: DateTime<Utc>,
    pub fallback_image: &'a str,
}

impl<'a> CardContext<'a> {
    pub fn new(now: DateTime<Utc>, fallback_image: &'a str) -> Self {
        Self {
            now,
            fallback_image,
        }
    }

    pub fn card(&self, post: &Post, style: CardStyle) -> PostCard {
        PostCard {
            slug: post.slug.clone(),
            title: post.title.clone(),
            url: helpers::post_path(&post.slug),
            image: helpers::image_url(
                post.featured_image.as_deref(),
                style.transform(),
                self.fallback_image,
            ),
            category: post.category_label().to_string(),
            time_ago: helpers::time_ago(post.published_date.as_deref(), self.now),
            excerpt: post
                .excerpt
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            badges: badges(post),
        }
    }

    pub fn cards(&self, posts: &[Post], style: CardStyle) -> Vec<PostCard> {
        posts.iter().map(|p| self.card(p, style)).collect()
    }
}

/// A post as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub image: String,
    pub category: String,
    pub time_ago: String,
    pub excerpt: Option<String>,
    pub badges: Vec<&'static str>,
}

fn badges(post: &Post) -> Vec<&'static str> {
    let mut badges = Vec::new();
    if post.is_read_also {
        badges.push("Read Also");
    }
    if post.is_affiliate {
        badges.push("Affiliate");
    }
    badges
}
