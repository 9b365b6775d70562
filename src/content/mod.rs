//! Content module - models, the content API client and rich text rendering

mod format;
mod post;
pub mod prismic;
pub mod richtext;
mod source;

pub use format::{format_page, format_results};
pub use post::{
    ApiPage, Banner, ContentSection, Document, PostDetail, PostDetailData, PostPagination,
    PostSummary, PostSummaryData,
};
pub use prismic::PrismicClient;
pub use richtext::{RichText, RichTextBlock};
pub use source::{ContentSource, Predicate, Query};
