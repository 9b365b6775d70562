//! Projection of raw API documents onto the list view shape

use super::post::{ApiPage, Document, PostPagination, PostSummary, PostSummaryData};

/// Keep exactly `uid`, `first_publication_date` and `data` of each document
pub fn format_results(results: Vec<Document<PostSummaryData>>) -> Vec<PostSummary> {
    results
        .into_iter()
        .map(|doc| PostSummary {
            uid: doc.uid,
            first_publication_date: doc.first_publication_date,
            data: doc.data,
        })
        .collect()
}

/// Project a raw search page into the pagination envelope
pub fn format_page(page: ApiPage<PostSummaryData>) -> PostPagination {
    PostPagination {
        next_page: page.next_page,
        results: format_results(page.results),
    }
}
