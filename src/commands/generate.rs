//! Generate static files

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::api::ContentSource;
use crate::config::SiteConfig;
use crate::error::AppError;
use crate::pages::{self, Page};
use crate::templates::{self, TemplateRenderer};
use crate::Site;

/// Render the site into `out`
pub async fn run(site: &Site, out: &Path) -> Result<()> {
    let start = std::time::Instant::now();

    if site.api.is_offline() {
        tracing::warn!("No content API configured; generating empty pages");
    }

    let generator = Generator {
        source: &*site.api,
        config: &site.config,
        renderer: TemplateRenderer::new()?,
        out,
        now: Utc::now(),
    };
    let written = generator.generate().await?;
    let assets = copy_static_assets(&site.static_dir, &out.join("static"))?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages and {} assets in {:.2}s",
        written,
        assets,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Static site generator over any content source
struct Generator<'a, S: ?Sized> {
    source: &'a S,
    config: &'a SiteConfig,
    renderer: TemplateRenderer,
    out: &'a Path,
    now: DateTime<Utc>,
}

impl<S: ContentSource + ?Sized> Generator<'_, S> {
    /// Render home, every category and subcategory, and every post linked
    /// from home. Returns the number of pages written.
    async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(self.out)?;
        let mut written = 0;

        // The home page is required
        let home = pages::home_page(self.source, self.config, self.now)
            .await
            .context("Failed to build the home page")?;
        written += self.write(&[], templates::HOME, &home)?;

        for category in pages::categories(self.source).await {
            let page =
                pages::category_page(self.source, self.config, self.now, &category.slug, None).await;
            written += self.write_result(&["category", &category.slug], templates::CATEGORY, page)?;

            for sub in &category.subcategories {
                let page = pages::subcategory_page(
                    self.source,
                    self.config,
                    self.now,
                    &category.slug,
                    &sub.slug,
                    None,
                )
                .await;
                written += self.write_result(
                    &["category", &category.slug, &sub.slug],
                    templates::CATEGORY,
                    page,
                )?;
            }
        }

        for slug in home.view.linked_slugs() {
            let page = pages::post_page(
                self.source,
                self.config,
                self.now,
                slug,
                false,
                StdRng::from_entropy(),
            )
            .await;
            written += self.write_result(&["posts", slug], templates::POST, page)?;
        }

        let not_found = pages::not_found_page(self.source).await;
        let html = self
            .renderer
            .render_page(templates::NOT_FOUND, self.config, &not_found)?;
        fs::write(self.out.join("404.html"), html)?;
        written += 1;

        Ok(written)
    }

    /// Write a page that may have failed to build; failures are logged and
    /// skipped. Returns the number of pages written.
    fn write_result<T: Serialize>(
        &self,
        segments: &[&str],
        template: &str,
        page: Result<Page<T>, AppError>,
    ) -> Result<usize> {
        match page {
            Ok(page) => self.write(segments, template, &page),
            Err(e) => {
                tracing::warn!("Skipping /{}: {}", segments.join("/"), e);
                Ok(0)
            }
        }
    }

    fn write<T: Serialize>(
        &self,
        segments: &[&str],
        template: &str,
        page: &Page<T>,
    ) -> Result<usize> {
        let Some(path) = output_path(self.out, segments) else {
            tracing::warn!("Skipping unsafe path /{}", segments.join("/"));
            return Ok(0);
        };

        let html = self
            .renderer
            .render_page(template, self.config, page)
            .with_context(|| format!("Failed to render {:?}", path))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        tracing::debug!("Generated: {:?}", path);

        Ok(1)
    }
}

/// `out/<segments>/index.html`, or `None` if a segment would leave `out`
fn output_path(out: &Path, segments: &[&str]) -> Option<PathBuf> {
    let mut path = out.to_path_buf();
    for segment in segments {
        if segment.is_empty()
            || *segment == "."
            || *segment == ".."
            || segment.contains(['/', '\\'])
        {
            return None;
        }
        path.push(segment);
    }
    Some(path.join("index.html"))
}

/// Copy static assets to the output directory
fn copy_static_assets(static_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_file() {
            let relative = path.strip_prefix(static_dir)?;
            let dest = dest_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemorySource;
    use crate::api::ApiClient;
    use crate::content::{Category, Post, TermRef};
    use tempfile::TempDir;

    fn term(slug: &str) -> TermRef {
        TermRef {
            id: None,
            name: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    fn source() -> MemorySource {
        let mut lead = Post::new("lead", "Lead");
        lead.is_featured = true;
        lead.category = Some(term("news"));
        lead.subcategory = Some(term("politics"));

        let mut news = Category::new("News", "news");
        news.subcategories = vec![term("politics")];

        MemorySource::new(vec![lead, Post::new("../escape", "Escape")])
            .with_categories(vec![news])
    }

    async fn generate<S: ContentSource + ?Sized>(source: &S, out: &Path) -> usize {
        let config = SiteConfig::default();
        let generator = Generator {
            source,
            config: &config,
            renderer: TemplateRenderer::new().unwrap(),
            out,
            now: Utc::now(),
        };
        generator.generate().await.unwrap()
    }

    #[tokio::test]
    async fn test_generate_site() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("public");

        let written = generate(&source(), &out).await;

        assert!(out.join("index.html").exists());
        assert!(out.join("category/news/index.html").exists());
        assert!(out.join("category/news/politics/index.html").exists());
        assert!(out.join("posts/lead/index.html").exists());
        assert!(out.join("404.html").exists());
        assert!(!tmp.path().join("escape").exists());
        // home, category, subcategory, one post, 404
        assert_eq!(written, 5);

        let post = fs::read_to_string(out.join("posts/lead/index.html")).unwrap();
        assert!(post.contains("application/ld+json"));
    }

    #[tokio::test]
    async fn test_generate_offline_renders_empty_pages() {
        let tmp = TempDir::new().unwrap();
        let written = generate(&ApiClient::offline(), tmp.path()).await;

        assert_eq!(written, 2);
        let home = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(home.contains("No posts found."));
    }

    #[test]
    fn test_output_path_rejects_traversal() {
        let out = Path::new("/tmp/out");
        assert_eq!(
            output_path(out, &["posts", "a"]),
            Some(PathBuf::from("/tmp/out/posts/a/index.html"))
        );
        assert_eq!(output_path(out, &[]), Some(PathBuf::from("/tmp/out/index.html")));
        assert_eq!(output_path(out, &["posts", ".."]), None);
        assert_eq!(output_path(out, &["posts", "a/b"]), None);
    }

    #[test]
    fn test_copy_static_assets() {
        let tmp = TempDir::new().unwrap();
        let static_dir = tmp.path().join("static");
        fs::create_dir_all(static_dir.join("css")).unwrap();
        fs::write(static_dir.join("css/site.css"), "body {}").unwrap();

        let dest = tmp.path().join("public/static");
        assert_eq!(copy_static_assets(&static_dir, &dest).unwrap(), 1);
        assert!(dest.join("css/site.css").exists());

        assert_eq!(copy_static_assets(&tmp.path().join("missing"), &dest).unwrap(), 0);
    }
}
