//! schema.org NewsArticle structured data for post pages

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::script_safe_json;

#[derive(Debug, Serialize)]
struct Person<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    headline: &'a str,
    author: Person<'a>,
    publisher: Person<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<&'a str>,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

impl<'a> NewsArticle<'a> {
    pub fn new(post: &'a Post, config: &'a SiteConfig) -> Self {
        let description = post
            .excerpt
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(post.meta_description.as_deref())
            .unwrap_or("");

        Self {
            context: "https://schema.org",
            kind: "NewsArticle",
            headline: &post.title,
            author: Person {
                kind: "Person",
                name: post
                    .author_name
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .unwrap_or(config.default_author.as_str()),
            },
            publisher: Person {
                kind: "Organization",
                name: &config.publisher,
            },
            date_published: post.published_date.as_deref(),
            date_modified: post.date_modified.as_deref(),
            description,
            image: post.featured_image.as_deref(),
        }
    }

    /// JSON ready to be placed inside `<script type="application/ld+json">`
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self).map(|json| script_safe_json(&json))
    }
}
