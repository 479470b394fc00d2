//! Category and subcategory listings

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{nav, rail, NavCategory, NavLink, Page};
use crate::api::{queries, ContentSource};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::AppError;
use crate::helpers;
use crate::views::{CardContext, CardStyle, ExpandableList, PostCard};

/// One row of a listing, optionally expanded to show its teaser
#[derive(Debug, Serialize)]
pub struct ListItem {
    #[serde(flatten)]
    pub card: PostCard,
    pub teaser: String,
    pub open: bool,
    pub toggle_href: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: String,
    pub subcategory: Option<String>,
    pub heading: String,
    pub items: Vec<ListItem>,
    pub subcategories: Vec<NavLink>,
    pub breaking: Vec<PostCard>,
    pub partnership: Vec<PostCard>,
}

struct Listing<'a> {
    category: &'a str,
    subcategory: Option<&'a str>,
    heading: String,
    path: String,
}

/// `/category/{category}`
///
/// The category listing is primary; the breaking and partnership rails
/// degrade to empty.
pub async fn category_page<S: ContentSource + ?Sized>(
    source: &S,
    config: &SiteConfig,
    now: DateTime<Utc>,
    category: &str,
    open: Option<String>,
) -> Result<Page<CategoryPage>, AppError> {
    let (nav, posts, breaking, partnership) = tokio::join!(
        nav(source),
        queries::posts_by_category(source, category),
        queries::breaking_news(source),
        queries::partnership_posts(source),
    );

    let listing = Listing {
        category,
        subcategory: None,
        heading: helpers::title_from_slug(category),
        path: helpers::category_path(category),
    };

    Ok(assemble(
        listing,
        config,
        now,
        nav,
        &posts?,
        &rail(breaking, "Breaking news"),
        &rail(partnership, "Partnership posts"),
        ExpandableList::new(open),
    ))
}

/// `/category/{category}/{subcategory}`
pub async fn subcategory_page<S: ContentSource + ?Sized>(
    source: &S,
    config: &SiteConfig,
    now: DateTime<Utc>,
    category: &str,
    subcategory: &str,
    open: Option<String>,
) -> Result<Page<CategoryPage>, AppError> {
    let (nav, posts, breaking, partnership) = tokio::join!(
        nav(source),
        queries::posts_by_subcategory(source, category, subcategory),
        queries::breaking_news(source),
        queries::partnership_posts(source),
    );

    let listing = Listing {
        category,
        subcategory: Some(subcategory),
        heading: format!(
            "{} in {}",
            helpers::title_from_slug(subcategory),
            helpers::title_from_slug(category)
        ),
        path: helpers::subcategory_path(category, subcategory),
    };

    Ok(assemble(
        listing,
        config,
        now,
        nav,
        &posts,
        &rail(breaking, "Breaking news"),
        &rail(partnership, "Partnership posts"),
        ExpandableList::new(open),
    ))
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    listing: Listing<'_>,
    config: &SiteConfig,
    now: DateTime<Utc>,
    nav: Vec<NavCategory>,
    posts: &[Post],
    breaking: &[Post],
    partnership: &[Post],
    expanded: ExpandableList,
) -> Page<CategoryPage> {
    let cards = CardContext::new(now, &config.fallback_image);

    let items = posts
        .iter()
        .map(|post| ListItem {
            card: cards.card(post, CardStyle::Wide),
            teaser: helpers::teaser(post.excerpt.as_deref(), &post.body),
            open: expanded.is_open(&post.slug),
            toggle_href: expanded.toggle_href(&listing.path, &post.slug),
        })
        .collect();

    let subcategories = nav
        .iter()
        .find(|c| c.slug == listing.category)
        .map(|c| c.subcategories.clone())
        .unwrap_or_default();

    Page {
        title: listing.heading.clone(),
        path: listing.path,
        nav,
        view: CategoryPage {
            category: listing.category.to_string(),
            subcategory: listing.subcategory.map(str::to_string),
            heading: listing.heading,
            items,
            subcategories,
            breaking: cards.cards(breaking, CardStyle::Thumb),
            partnership: cards.cards(partnership, CardStyle::Thumb),
        },
    }
}
