//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping is on everywhere;
//! the sanitized post body and the JSON-LD block are the only values marked
//! `safe`.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers;
use crate::pages::Page;
use crate::search::SearchResult;

pub const HOME: &str = "home.html";
pub const CATEGORY: &str = "category.html";
pub const POST: &str = "post.html";
pub const NOT_FOUND: &str = "not_found.html";
pub const ERROR: &str = "error.html";
const SEARCH_RESULTS: &str = "partials/search_results.html";

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();

        // Escape every .html template, but keep `/` readable in routes
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(helpers::escape_html);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            (HOME, include_str!("site/home.html")),
            (CATEGORY, include_str!("site/category.html")),
            (POST, include_str!("site/post.html")),
            (NOT_FOUND, include_str!("site/not_found.html")),
            (ERROR, include_str!("site/error.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/social.html",
                include_str!("site/partials/social.html"),
            ),
            ("partials/card.html", include_str!("site/partials/card.html")),
            (
                "partials/sidebar.html",
                include_str!("site/partials/sidebar.html"),
            ),
            (SEARCH_RESULTS, include_str!("site/partials/search_results.html")),
        ])?;

        // Register custom filters
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a full page; `site` is available to every template
    pub fn render_page<T: Serialize>(
        &self,
        template_name: &str,
        site: &SiteConfig,
        page: &Page<T>,
    ) -> tera::Result<String> {
        let mut context = Context::from_serialize(page)?;
        context.insert("site", site);
        self.tera.render(template_name, &context)
    }

    /// Render the search dropdown for a websocket results frame
    pub fn render_search_results(
        &self,
        query: &str,
        results: &[SearchResult],
    ) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("query", query);
        context.insert("results", results);
        self.tera.render(SEARCH_RESULTS, &context)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(helpers::truncate(&s, length, &omission)))
}
