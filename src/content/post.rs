//! Post models as returned by the content API

use serde::{Deserialize, Serialize};

use super::richtext::RichText;

/// A raw API document, with every field the API sends that we care about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<D> {
    #[serde(default)]
    pub id: String,

    /// Unique slug within the document type
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(rename = "type", default)]
    pub doc_type: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub lang: Option<String>,

    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub last_publication_date: Option<String>,

    pub data: D,
}

/// A raw search response page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPage<D> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub results_size: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    pub results: Vec<Document<D>>,
}

/// Fields shown for a post in list views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// A post as it appears in the list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub data: PostSummaryData,
}

/// One page of list results plus the cursor to the next one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPagination {
    pub next_page: Option<String>,
    pub results: Vec<PostSummary>,
}

impl PostPagination {
    /// Whether there is nothing after this page
    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}

/// Banner image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub url: String,
    pub alt: Option<String>,
}

/// A titled section of a post body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub heading: String,
    pub body: RichText,
}

/// Full post data for the detail page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDetailData {
    pub title: String,
    pub subtitle: String,
    pub banner: Banner,
    pub author: String,
    pub content: Vec<ContentSection>,
}

/// A post document resolved by uid
pub type PostDetail = Document<PostDetailData>;
