//! The narrow interface every content backend implements

use async_trait::async_trait;
use std::fmt;

use super::post::{ApiPage, PostDetail, PostSummaryData};
use crate::error::ContentError;

/// A query predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `path` equals `value`
    At { path: String, value: String },
}

impl Predicate {
    /// Match documents of the given type
    pub fn document_type(doc_type: &str) -> Self {
        Self::At {
            path: "document.type".to_string(),
            value: doc_type.to_string(),
        }
    }

    /// Match the document of `doc_type` whose uid is `uid`
    pub fn uid(doc_type: &str, uid: &str) -> Self {
        Self::At {
            path: format!("my.{}.uid", doc_type),
            value: uid.to_string(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At { path, value } => {
                let value = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[at({},\"{}\")]", path, value)
            }
        }
    }
}

/// A filtered, paged query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub predicates: Vec<Predicate>,
    /// Fields to return, e.g. `posts.title`; empty means everything
    pub fetch: Vec<String>,
    pub page_size: Option<u32>,
}

impl Query {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            ..Default::default()
        }
    }

    pub fn fetch(mut self, fields: Vec<String>) -> Self {
        self.fetch = fields;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// The `q` parameter: every predicate wrapped in one outer list
    pub fn predicate_string(&self) -> String {
        let inner: String = self.predicates.iter().map(|p| p.to_string()).collect();
        format!("[{}]", inner)
    }
}

/// A headless content backend
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a query and return its first page
    async fn query(&self, query: &Query) -> Result<ApiPage<PostSummaryData>, ContentError>;

    /// Fetch a follow-up page from a `next_page` URL as-is
    async fn fetch_page(&self, url: &str) -> Result<ApiPage<PostSummaryData>, ContentError>;

    /// Resolve one document by its unique slug
    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<PostDetail, ContentError>;
}
