//! List page state: accumulated entries plus the cursor to the next page

use crate::content::{format_page, ContentSource, PostPagination, PostSummary};
use crate::error::ContentError;

/// Entries shown on the list page, append-only within one page view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostList {
    results: Vec<PostSummary>,
    next_page: Option<String>,
}

impl PostList {
    /// Start from the first page
    pub fn new(initial: PostPagination) -> Self {
        Self {
            results: initial.results,
            next_page: initial.next_page,
        }
    }

    /// Start empty, positioned at a known cursor
    pub fn resume(cursor: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            next_page: Some(cursor.into()),
        }
    }

    pub fn results(&self) -> &[PostSummary] {
        &self.results
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Whether the "load more" control should be shown
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Append a fetched page and move the cursor; returns how many entries were added
    pub fn append(&mut self, page: PostPagination) -> usize {
        let added = page.results.len();
        self.results.extend(page.results);
        self.next_page = page.next_page;
        added
    }

    /// Fetch the page behind the cursor and append it
    ///
    /// Does nothing when there is no cursor. On error the state is left as it
    /// was, so the caller can simply try again.
    pub async fn load_more(&mut self, source: &dyn ContentSource) -> Result<usize, ContentError> {
        let Some(cursor) = self.next_page.as_deref() else {
            return Ok(0);
        };

        let page = source.fetch_page(cursor).await?;
        let added = self.append(format_page(page));
        tracing::debug!(
            "Loaded {} more posts ({} total, more: {})",
            added,
            self.results.len(),
            self.has_more()
        );
        Ok(added)
    }

    /// Keep loading until the cursor runs out; returns how many entries were added
    pub async fn load_all(&mut self, source: &dyn ContentSource) -> Result<usize, ContentError> {
        let mut added = 0;
        while self.has_more() {
            added += self.load_more(source).await?;
        }
        Ok(added)
    }

    /// Take the accumulated entries
    pub fn into_results(self) -> Vec<PostSummary> {
        self.results
    }
}
