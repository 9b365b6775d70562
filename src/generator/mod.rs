//! Generator module - fetches content and writes static HTML files

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::content::{format_page, ContentSource, PostPagination, Predicate, Query};
use crate::error::ContentError;
use crate::pages::{PostList, PostView};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Summary of a full generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Entries on the first list page
    pub index_posts: usize,
    /// Post pages written
    pub post_pages: usize,
    /// Slugs that failed to resolve and were left to on-demand rendering
    pub skipped: Vec<String>,
}

/// Static site generator backed by a content source
pub struct Generator {
    blog: Blog,
    source: Arc<dyn ContentSource>,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog, source: Arc<dyn ContentSource>) -> Result<Self> {
        let renderer = TemplateRenderer::new(&blog.config)?;

        Ok(Self {
            blog: blog.clone(),
            source,
            renderer,
        })
    }

    pub fn blog(&self) -> &Blog {
        &self.blog
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Generate the list page and every known post page
    pub async fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let index_posts = self.generate_index().await?;

        let mut report = GenerateReport {
            index_posts,
            ..Default::default()
        };

        for slug in self.static_paths().await? {
            match self.generate_post(&slug).await {
                Ok(_) => report.post_pages += 1,
                Err(e) => {
                    tracing::warn!("Skipping post {}: {}", slug, e);
                    report.skipped.push(slug);
                }
            }
        }

        Ok(report)
    }

    /// First page of the list, as the list page is built from
    pub async fn fetch_home(&self) -> Result<PostPagination, ContentError> {
        let api = &self.blog.config.api;
        let query = Query::new(vec![Predicate::document_type(&api.document_type)])
            .fetch(api.fetch_fields())
            .page_size(api.page_size);

        let page = self.source.query(&query).await?;
        Ok(format_page(page))
    }

    /// Write `index.html`; returns the number of entries on it
    pub async fn generate_index(&self) -> Result<usize> {
        let list = PostList::new(self.fetch_home().await?);
        let html = self.renderer.render_index(&list)?;

        let output_path = self.index_path();
        write_page(&output_path, &html)?;
        tracing::info!(
            "Generated list page with {} posts (more: {})",
            list.len(),
            list.has_more()
        );

        Ok(list.len())
    }

    /// Every slug the content API knows about, following all pages
    pub async fn static_paths(&self) -> Result<Vec<String>, ContentError> {
        let api = &self.blog.config.api;
        let query = Query::new(vec![Predicate::document_type(&api.document_type)])
            .fetch(vec![format!("{}.title", api.document_type)]);

        let mut list = PostList::new(format_page(self.source.query(&query).await?));
        list.load_all(self.source.as_ref()).await?;

        Ok(list
            .into_results()
            .into_iter()
            .filter_map(|post| post.uid)
            .collect())
    }

    /// Resolve a post and render it
    ///
    /// Content failures are returned as a [`ContentError`] inside the
    /// `anyhow::Error`, so callers can tell a missing post apart.
    pub async fn render_post(&self, slug: &str) -> Result<String> {
        let config = &self.blog.config;
        let view = PostView::resolve(
            self.source.as_ref(),
            &config.api.document_type,
            slug,
            config.words_per_minute,
        )
        .await?;

        self.renderer.render_post(&view)
    }

    /// Resolve, render and write `post/{slug}/index.html`
    pub async fn generate_post(&self, slug: &str) -> Result<String> {
        let output_path = self.post_path(slug)?;
        let html = self.render_post(slug).await?;
        write_page(&output_path, &html)?;
        tracing::debug!("Generated post: {:?}", output_path);
        Ok(html)
    }

    /// The loading placeholder shown for unresolved posts
    pub fn render_fallback(&self) -> Result<String> {
        self.renderer.render_post(&PostView::Fallback)
    }

    pub fn index_path(&self) -> PathBuf {
        self.blog.public_dir.join("index.html")
    }

    /// Output path of a post page; rejects slugs that would escape `post/`
    pub fn post_path(&self, slug: &str) -> Result<PathBuf> {
        if !is_safe_slug(slug) {
            anyhow::bail!("Refusing to write post with unsafe slug {:?}", slug);
        }
        Ok(self
            .blog
            .public_dir
            .join("post")
            .join(slug)
            .join("index.html"))
    }
}

/// A slug usable as a single path segment
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

/// Write a page through a sibling temp file, so readers never see a partial page
fn write_page(output_path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }

    let temp_path = output_path.with_extension("html.tmp");
    fs::write(&temp_path, html)
        .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", temp_path, e))?;
    fs::rename(&temp_path, output_path)
        .map_err(|e| anyhow::anyhow!("Failed to replace {:?}: {}", output_path, e))?;
    Ok(())
}
