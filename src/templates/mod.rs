//! Built-in spacetraveling templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on for every
//! template, since titles and subtitles come straight from the content API;
//! rendered rich text is marked `safe` where it is inserted.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::DateFormatter;
use crate::pages::{PostList, PostView};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

/// Site-wide values every template can read
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub load_more_text: String,
    pub loading_text: String,
}

impl SiteData {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
            load_more_text: config.load_more_text.clone(),
            loading_text: config.loading_text.clone(),
        }
    }
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let dates = DateFormatter::from_config(config)?;
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("spacetraveling/layout.html")),
            ("index.html", include_str!("spacetraveling/index.html")),
            ("post.html", include_str!("spacetraveling/post.html")),
            ("fallback.html", include_str!("spacetraveling/fallback.html")),
            (
                "partials/entries.html",
                include_str!("spacetraveling/partials/entries.html"),
            ),
        ])?;

        tera.register_filter(
            "long_date",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                long_date_filter(&dates, value)
            },
        );
        tera.register_filter("minutes", minutes_filter);

        Ok(Self {
            tera,
            site: SiteData::from_config(config),
        })
    }

    /// Render the list page for the current list state
    pub fn render_index(&self, list: &PostList) -> Result<String> {
        let mut context = self.base_context();
        context.insert("posts", list.results());
        context.insert("next_page", &list.next_page());
        self.render("index.html", &context)
    }

    /// Render list entries without the surrounding page
    pub fn render_entries(&self, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base_context();
        context.insert("posts", posts);
        self.render("partials/entries.html", &context)
    }

    /// Render a post page, or the loading placeholder
    pub fn render_post(&self, view: &PostView) -> Result<String> {
        match view {
            PostView::Fallback => self.render("fallback.html", &self.base_context()),
            PostView::Ready(post) => {
                let mut context = self.base_context();
                context.insert("post", post.as_ref());
                self.render("post.html", &context)
            }
        }
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: localized long date, falls back to the raw value
fn long_date_filter(dates: &DateFormatter, value: &tera::Value) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(tera::Value::String(String::new()));
    }
    let s = tera::try_get_value!("long_date", "value", String, value);
    match dates.format(&s) {
        Ok(formatted) => Ok(tera::Value::String(formatted)),
        Err(e) => {
            tracing::warn!("{}", e);
            Ok(tera::Value::String(s))
        }
    }
}

/// Tera filter: `3` -> `3 min`
fn minutes_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let minutes = tera::try_get_value!("minutes", "value", u64, value);
    Ok(tera::Value::String(format!("{} min", minutes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{
        Banner, ContentSection, Document, PostDetailData, PostPagination, PostSummaryData,
        RichTextBlock,
    };
    use crate::pages::PostPage;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new(&SiteConfig::default()).unwrap()
    }

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: Some(uid.to_string()),
            first_publication_date: Some("2021-03-25T00:00:00Z".to_string()),
            data: PostSummaryData {
                title: format!("Post {}", uid),
                subtitle: "Pensando em sincronização".to_string(),
                author: "Danilo Vieira".to_string(),
            },
        }
    }

    fn list(count: usize, next: Option<&str>) -> PostList {
        PostList::new(PostPagination {
            next_page: next.map(str::to_string),
            results: (0..count).map(|i| summary(&format!("post-{}", i))).collect(),
        })
    }

    #[test]
    fn test_index_with_more_pages() {
        let html = renderer()
            .render_index(&list(4, Some("https://blog.cdn.prismic.io/api/v2/documents/search?page=2")))
            .unwrap();

        assert_eq!(html.matches(r#"class="post-entry""#).count(), 4);
        assert_eq!(html.matches(r#"class="load-more""#).count(), 1);
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains(r#"href="/post/post-0""#));
        assert!(html.contains("25 de março de 2021"));
        assert!(html.contains("/api/posts/more?next="));
    }

    #[test]
    fn test_index_last_page_has_no_button() {
        let html = renderer().render_index(&list(2, None)).unwrap();
        assert_eq!(html.matches(r#"class="post-entry""#).count(), 2);
        assert!(!html.contains(r#"class="load-more""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_entries_fragment() {
        let mut untitled = summary("x");
        untitled.uid = None;
        untitled.first_publication_date = None;
        untitled.data.title = "<script>alert(1)</script>".to_string();

        let html = renderer()
            .render_entries(&[summary("a"), untitled])
            .unwrap();

        assert!(!html.contains("<html"));
        assert_eq!(html.matches(r#"class="post-entry""#).count(), 2);
        assert_eq!(html.matches("href=").count(), 1);
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_post_page() {
        let doc = Document {
            id: "1".to_string(),
            uid: Some("hooks".to_string()),
            doc_type: "posts".to_string(),
            tags: Vec::new(),
            lang: None,
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            last_publication_date: None,
            data: PostDetailData {
                title: "Como utilizar Hooks".to_string(),
                subtitle: String::new(),
                banner: Banner {
                    url: "https://images.prismic.io/banner.png".to_string(),
                    alt: None,
                },
                author: "Joseph Oliveira".to_string(),
                content: vec![ContentSection {
                    heading: "Proin et varius".to_string(),
                    body: vec![RichTextBlock::paragraph("Lorem ipsum dolor")],
                }],
            },
        };
        let view = PostView::Ready(Box::new(PostPage::from_document(doc, 200)));
        let html = renderer().render_post(&view).unwrap();

        assert!(html.contains("<title>Como utilizar Hooks | spacetraveling</title>"));
        assert!(html.contains(r#"alt="banner-Como utilizar Hooks""#));
        assert!(html.contains("15 de março de 2021"));
        assert!(html.contains("1 min"));
        assert!(html.contains(r#"<h2 id="proin-et-varius">Proin et varius</h2>"#));
        assert!(html.contains("<p>Lorem ipsum dolor</p>"));
    }

    #[test]
    fn test_fallback_page() {
        let html = renderer().render_post(&PostView::Fallback).unwrap();
        assert!(html.contains("Carregando..."));
        assert!(!html.contains("<article class=\"content post\">"));
    }

    #[test]
    fn test_unparseable_date_is_shown_raw() {
        let mut post = summary("a");
        post.first_publication_date = Some("someday".to_string());
        let html = renderer().render_entries(&[post]).unwrap();
        assert!(html.contains("<time>someday</time>"));
    }
}
