//! Post page state

use serde::Serialize;

use crate::content::richtext::as_html;
use crate::content::{ContentSource, PostDetail};
use crate::error::ContentError;
use crate::helpers::reading_time;

/// A post section ready for the template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub heading: String,
    /// Anchor id derived from the heading
    pub anchor: String,
    /// Trusted markup from the rich text renderer
    pub html: String,
}

/// Everything the post template shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub banner_url: String,
    pub banner_alt: String,
    pub author: String,
    pub sections: Vec<RenderedSection>,
    /// Minutes
    pub reading_time: usize,
}

impl PostPage {
    pub fn from_document(doc: PostDetail, words_per_minute: usize) -> Self {
        let minutes = reading_time(&doc.data.content, words_per_minute);
        let data = doc.data;

        let sections = data
            .content
            .iter()
            .map(|section| RenderedSection {
                heading: section.heading.clone(),
                anchor: slug::slugify(&section.heading),
                html: as_html(&section.body),
            })
            .collect();

        Self {
            uid: doc.uid,
            first_publication_date: doc.first_publication_date,
            banner_alt: data
                .banner
                .alt
                .clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| format!("banner-{}", data.title)),
            banner_url: data.banner.url,
            title: data.title,
            subtitle: data.subtitle,
            author: data.author,
            sections,
            reading_time: minutes,
        }
    }
}

/// What the post route shows: a placeholder until the document resolves
#[derive(Debug, Clone, PartialEq)]
pub enum PostView {
    Fallback,
    Ready(Box<PostPage>),
}

impl PostView {
    /// Resolve a post by slug
    pub async fn resolve(
        source: &dyn ContentSource,
        doc_type: &str,
        slug: &str,
        words_per_minute: usize,
    ) -> Result<Self, ContentError> {
        let doc = source.get_by_uid(doc_type, slug).await?;
        Ok(Self::Ready(Box::new(PostPage::from_document(
            doc,
            words_per_minute,
        ))))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Banner, ContentSection, Document, PostDetailData, RichTextBlock};

    fn document(words: usize) -> PostDetail {
        Document {
            id: "YFt2".to_string(),
            uid: Some("como-utilizar-hooks".to_string()),
            doc_type: "posts".to_string(),
            tags: Vec::new(),
            lang: None,
            first_publication_date: Some("2021-03-25T00:00:00Z".to_string()),
            last_publication_date: None,
            data: PostDetailData {
                title: "Como utilizar Hooks".to_string(),
                subtitle: String::new(),
                banner: Banner {
                    url: "https://images.prismic.io/banner.png".to_string(),
                    alt: None,
                },
                author: "Joseph Oliveira".to_string(),
                content: vec![
                    ContentSection {
                        heading: "Proin et varius".to_string(),
                        body: vec![RichTextBlock::paragraph(vec!["lorem"; words].join(" "))],
                    },
                    ContentSection {
                        heading: "Cras laoreet mi".to_string(),
                        body: vec![RichTextBlock::paragraph("<tail>")],
                    },
                ],
            },
        }
    }

    #[test]
    fn test_from_document() {
        let page = PostPage::from_document(document(200), 200);

        // 200 words plus the single word of the second section
        assert_eq!(page.reading_time, 2);
        assert_eq!(page.banner_alt, "banner-Como utilizar Hooks");
        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.sections[0].anchor, "proin-et-varius");
        assert_eq!(page.sections[1].html, "<p>&lt;tail&gt;</p>");
    }

    #[test]
    fn test_explicit_banner_alt_wins() {
        let mut doc = document(1);
        doc.data.banner.alt = Some("Foguete".to_string());
        assert_eq!(PostPage::from_document(doc, 200).banner_alt, "Foguete");
    }

    #[test]
    fn test_fallback() {
        assert!(PostView::Fallback.is_fallback());
        let ready = PostView::Ready(Box::new(PostPage::from_document(document(1), 200)));
        assert!(!ready.is_fallback());
    }
}
