//! Post detail page

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::{categories, nav_from, Page};
use crate::api::ContentSource;
use crate::config::SiteConfig;
use crate::content::{buckets, related, Category, Post};
use crate::error::AppError;
use crate::helpers;
use crate::views::{BodyToggle, CardContext, CardStyle, NewsArticle, PostCard};

/// The post itself, ready for display
#[derive(Debug, Serialize)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub category_url: Option<String>,
    pub image: String,
    pub author: String,
    pub time_ago: String,
    pub published: String,
    /// Sanitized HTML
    pub body_html: String,
    pub teaser: String,
}

/// Related posts from one category
#[derive(Debug, Serialize)]
pub struct RelatedGroup {
    pub name: String,
    pub url: String,
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub post: PostView,
    pub expanded: bool,
    pub toggle_label: &'static str,
    pub toggle_href: String,
    pub json_ld: String,
    pub related: Vec<RelatedGroup>,
    pub breaking: Vec<PostCard>,
    pub partnership: Vec<PostCard>,
}

/// `/posts/{slug}`
///
/// A missing post is [`AppError::NotFound`]. Related groups and the side
/// rails come from one sequential pass over the categories.
pub async fn post_page<S, R>(
    source: &S,
    config: &SiteConfig,
    now: DateTime<Utc>,
    slug: &str,
    expanded: bool,
    mut rng: R,
) -> Result<Page<PostPage>, AppError>
where
    S: ContentSource + ?Sized,
    R: Rng,
{
    let (categories, post) = tokio::join!(categories(source), source.fetch_post(slug));
    let post = post.ok_or(AppError::NotFound)?;

    let fetched = related::fetch_category_posts(source, &categories).await;
    let groups = related::group_related(&fetched, &mut rng);

    let cards = CardContext::new(now, &config.fallback_image);
    let related = groups
        .iter()
        .filter(|(_, posts)| !posts.is_empty())
        .map(|(slug, posts)| RelatedGroup {
            name: category_name(&categories, slug),
            url: helpers::category_path(slug),
            posts: cards.cards(posts, CardStyle::Square),
        })
        .collect();

    let breaking = buckets::breaking_news(groups.values().flatten());
    let partnership = buckets::partnership(groups.values().flatten());

    let toggle = BodyToggle::new(expanded);
    let path = helpers::post_path(&post.slug);
    let json_ld = NewsArticle::new(&post, config)
        .to_script_json()
        .map_err(tera::Error::json)?;

    Ok(Page {
        title: post.title.clone(),
        nav: nav_from(&categories),
        view: PostPage {
            post: post_view(&post, config, now),
            expanded: toggle.expanded,
            toggle_label: toggle.label(),
            toggle_href: toggle.toggle_href(&path),
            json_ld,
            related,
            breaking: cards.cards(&breaking, CardStyle::Thumb),
            partnership: cards.cards(&partnership, CardStyle::Thumb),
        },
        path,
    })
}

fn post_view(post: &Post, config: &SiteConfig, now: DateTime<Utc>) -> PostView {
    PostView {
        slug: post.slug.clone(),
        title: post.title.clone(),
        category: post.category_label().to_string(),
        category_url: post.category.as_ref().map(|c| helpers::category_path(&c.slug)),
        image: helpers::image_url(post.featured_image.as_deref(), None, &config.fallback_image),
        author: post
            .author_name
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(config.default_author.as_str())
            .to_string(),
        time_ago: helpers::time_ago(post.published_date.as_deref(), now),
        published: helpers::format_published(
            post.published_date.as_deref(),
            config.tz(),
            &config.date_format,
        ),
        body_html: helpers::sanitize_html(&post.body),
        teaser: helpers::teaser(post.excerpt.as_deref(), &post.body),
    }
}

fn category_name(categories: &[Category], slug: &str) -> String {
    categories
        .iter()
        .find(|c| c.slug == slug)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| helpers::title_from_slug(slug))
}
