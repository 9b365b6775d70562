//! Structured rich text as delivered by the content API
//!
//! A rich text field is a list of blocks. Each block carries its plain text
//! plus inline spans (bold, italic, links, labels) addressed by character
//! offsets into that text. This module turns blocks into plain text for word
//! counting and into HTML for the post page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

/// A rich text field
pub type RichText = Vec<RichTextBlock>;

/// Block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "preformatted")]
    Preformatted,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "embed")]
    Embed,
    #[serde(other)]
    Unknown,
}

/// Inline span type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "hyperlink")]
    Hyperlink,
    #[serde(rename = "label")]
    Label,
    #[serde(other)]
    Unknown,
}

/// An inline span over `text[start..end]`, offsets counted in characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// oEmbed payload of an embed block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub embed_url: Option<String>,
    pub html: Option<String>,
}

/// One block of a rich text field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image source, image blocks only
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub oembed: Option<Embed>,
}

impl RichTextBlock {
    /// A plain paragraph with no spans
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }
}

/// Plain text of a rich text field, blocks joined by a single space
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a rich text field to HTML
///
/// Consecutive list items are grouped into a single `<ul>` or `<ol>`.
/// Block text is escaped; embed HTML is passed through untouched.
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in blocks {
        let is_list = matches!(block.kind, BlockKind::ListItem | BlockKind::OrderedListItem);

        if open_list.is_some() && open_list != Some(block.kind) {
            html.push_str(list_close(open_list));
            open_list = None;
        }
        if is_list && open_list.is_none() {
            html.push_str(if block.kind == BlockKind::OrderedListItem {
                "<ol>"
            } else {
                "<ul>"
            });
            open_list = Some(block.kind);
        }

        html.push_str(&render_block(block));
    }

    html.push_str(list_close(open_list));
    html
}

fn list_close(kind: Option<BlockKind>) -> &'static str {
    match kind {
        Some(BlockKind::ListItem) => "</ul>",
        Some(BlockKind::OrderedListItem) => "</ol>",
        _ => "",
    }
}

fn render_block(block: &RichTextBlock) -> String {
    let inner = || render_spans(&block.text, &block.spans);

    match block.kind {
        BlockKind::Paragraph => format!("<p>{}</p>", inner()),
        BlockKind::Heading1 => format!("<h1>{}</h1>", inner()),
        BlockKind::Heading2 => format!("<h2>{}</h2>", inner()),
        BlockKind::Heading3 => format!("<h3>{}</h3>", inner()),
        BlockKind::Heading4 => format!("<h4>{}</h4>", inner()),
        BlockKind::Heading5 => format!("<h5>{}</h5>", inner()),
        BlockKind::Heading6 => format!("<h6>{}</h6>", inner()),
        BlockKind::Preformatted => format!("<pre>{}</pre>", inner()),
        BlockKind::ListItem | BlockKind::OrderedListItem => format!("<li>{}</li>", inner()),
        BlockKind::Image => match &block.url {
            Some(url) => format!(
                r#"<p class="block-img"><img src="{}" alt="{}"></p>"#,
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(block.alt.as_deref().unwrap_or(""))
            ),
            None => String::new(),
        },
        BlockKind::Embed => match &block.oembed {
            Some(embed) => format!(
                r#"<div data-oembed="{}" data-oembed-type="{}">{}</div>"#,
                encode_double_quoted_attribute(embed.embed_url.as_deref().unwrap_or("")),
                encode_double_quoted_attribute(embed.kind.as_deref().unwrap_or("")),
                embed.html.as_deref().unwrap_or("")
            ),
            None => String::new(),
        },
        BlockKind::Unknown => String::new(),
    }
}

impl Span {
    fn open_tag(&self) -> String {
        match self.kind {
            SpanKind::Strong => "<strong>".to_string(),
            SpanKind::Em => "<em>".to_string(),
            SpanKind::Hyperlink => {
                let url = self.data_str("url").unwrap_or("");
                match self.data_str("target") {
                    Some(target) => format!(
                        r#"<a href="{}" target="{}" rel="noopener">"#,
                        encode_double_quoted_attribute(url),
                        encode_double_quoted_attribute(target)
                    ),
                    None => format!(r#"<a href="{}">"#, encode_double_quoted_attribute(url)),
                }
            }
            SpanKind::Label => format!(
                r#"<span class="{}">"#,
                encode_double_quoted_attribute(self.data_str("label").unwrap_or(""))
            ),
            SpanKind::Unknown => String::new(),
        }
    }

    fn close_tag(&self) -> &'static str {
        match self.kind {
            SpanKind::Strong => "</strong>",
            SpanKind::Em => "</em>",
            SpanKind::Hyperlink => "</a>",
            SpanKind::Label => "</span>",
            SpanKind::Unknown => "",
        }
    }

    fn data_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }
}

/// Interleave span tags with escaped text
///
/// Spans are opened in (start asc, end desc) order so enclosing spans wrap
/// enclosed ones. When spans overlap without nesting, the inner ones are
/// closed and reopened around the boundary to keep the markup well-formed.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut sorted: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.start < chars.len())
        .collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    let mut open: Vec<&Span> = Vec::new();
    let mut next = 0;

    for i in 0..=chars.len() {
        if open.iter().any(|s| s.end <= i) {
            flush_text(&mut out, &mut run);
            let mut reopen = Vec::new();
            while let Some(span) = open.pop() {
                out.push_str(span.close_tag());
                if span.end > i {
                    reopen.push(span);
                }
                if !open.iter().any(|s| s.end <= i) {
                    break;
                }
            }
            for span in reopen.into_iter().rev() {
                out.push_str(&span.open_tag());
                open.push(span);
            }
        }

        while next < sorted.len() && sorted[next].start == i {
            flush_text(&mut out, &mut run);
            out.push_str(&sorted[next].open_tag());
            open.push(sorted[next]);
            next += 1;
        }

        if let Some(c) = chars.get(i) {
            run.push(*c);
        }
    }

    flush_text(&mut out, &mut run);
    while let Some(span) = open.pop() {
        out.push_str(span.close_tag());
    }

    out
}

fn flush_text(out: &mut String, run: &mut String) {
    if run.is_empty() {
        return;
    }
    out.push_str(&encode_text(run).replace('\n', "<br />"));
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, kind: SpanKind) -> Span {
        Span {
            start,
            end,
            kind,
            data: None,
        }
    }

    fn block(kind: BlockKind, text: &str, spans: Vec<Span>) -> RichTextBlock {
        RichTextBlock {
            kind,
            text: text.to_string(),
            spans,
            url: None,
            alt: None,
            oembed: None,
        }
    }

    #[test]
    fn test_as_text_joins_blocks() {
        let blocks = vec![
            RichTextBlock::paragraph("Lorem ipsum"),
            RichTextBlock::paragraph("dolor sit amet"),
        ];
        assert_eq!(as_text(&blocks), "Lorem ipsum dolor sit amet");
        assert_eq!(as_text(&[]), "");
    }

    #[test]
    fn test_paragraph_with_strong() {
        let blocks = vec![block(
            BlockKind::Paragraph,
            "hello world",
            vec![span(6, 11, SpanKind::Strong)],
        )];
        assert_eq!(as_html(&blocks), "<p>hello <strong>world</strong></p>");
    }

    #[test]
    fn test_nested_spans() {
        let blocks = vec![block(
            BlockKind::Paragraph,
            "abcdef",
            vec![span(2, 4, SpanKind::Em), span(0, 6, SpanKind::Strong)],
        )];
        assert_eq!(
            as_html(&blocks),
            "<p><strong>ab<em>cd</em>ef</strong></p>"
        );
    }

    #[test]
    fn test_overlapping_spans_stay_well_formed() {
        let blocks = vec![block(
            BlockKind::Paragraph,
            "abcdef",
            vec![span(0, 4, SpanKind::Strong), span(2, 6, SpanKind::Em)],
        )];
        assert_eq!(
            as_html(&blocks),
            "<p><strong>ab<em>cd</em></strong><em>ef</em></p>"
        );
    }

    #[test]
    fn test_hyperlink_span() {
        let mut link = span(0, 4, SpanKind::Hyperlink);
        link.data = Some(serde_json::json!({
            "link_type": "Web",
            "url": "https://example.com/?a=1&b=2",
            "target": "_blank"
        }));
        let blocks = vec![block(BlockKind::Paragraph, "link here", vec![link])];
        assert_eq!(
            as_html(&blocks),
            r#"<p><a href="https://example.com/?a=1&amp;b=2" target="_blank" rel="noopener">link</a> here</p>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let blocks = vec![block(BlockKind::Preformatted, "<b>x</b>\ny", vec![])];
        assert_eq!(as_html(&blocks), "<pre>&lt;b&gt;x&lt;/b&gt;<br />y</pre>");
    }

    #[test]
    fn test_lists_are_grouped() {
        let blocks = vec![
            block(BlockKind::ListItem, "one", vec![]),
            block(BlockKind::ListItem, "two", vec![]),
            block(BlockKind::OrderedListItem, "first", vec![]),
            RichTextBlock::paragraph("after"),
        ];
        assert_eq!(
            as_html(&blocks),
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol><p>after</p>"
        );
    }

    #[test]
    fn test_image_and_unknown_blocks() {
        let json = r#"[
            {"type": "image", "url": "https://images.prismic.io/a.png", "alt": "a \"quoted\" alt", "dimensions": {"width": 1, "height": 1}},
            {"type": "some-future-block", "text": "ignored"}
        ]"#;
        let blocks: RichText = serde_json::from_str(json).unwrap();
        assert_eq!(blocks[1].kind, BlockKind::Unknown);
        assert_eq!(
            as_html(&blocks),
            r#"<p class="block-img"><img src="https://images.prismic.io/a.png" alt="a &quot;quoted&quot; alt"></p>"#
        );
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        let blocks = vec![block(
            BlockKind::Paragraph,
            "ação rápida",
            vec![span(5, 11, SpanKind::Em)],
        )];
        assert_eq!(as_html(&blocks), "<p>ação <em>rápida</em></p>");
    }
}
