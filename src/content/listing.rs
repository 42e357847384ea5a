//! Listing page state

use chrono_tz::Tz;

use super::PostSummary;
use crate::cms::QueryResponse;

/// Current page and page count of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Self {
        Self { current, total }
    }

    /// "First" and "previous" controls are shown from page 2 on
    pub fn show_previous(&self) -> bool {
        self.current >= 2
    }

    /// "Next" and "last" controls are shown before the last page
    pub fn show_next(&self) -> bool {
        self.current < self.total
    }

    pub fn first(&self) -> u32 {
        1
    }

    pub fn previous(&self) -> u32 {
        self.current.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        self.current + 1
    }

    pub fn last(&self) -> u32 {
        self.total
    }
}

/// The posts shown on the listing page together with their pagination
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub posts: Vec<PostSummary>,
    pub pagination: Pagination,
}

impl Listing {
    /// Build the listing from one page of CMS results, keeping CMS order
    pub fn from_response(response: &QueryResponse, tz: &Tz, language: &str) -> Self {
        Self {
            posts: summaries(response, tz, language),
            pagination: Pagination::new(response.page, response.total_pages),
        }
    }

    /// Replace the shown posts with the result for `page`.
    ///
    /// An empty result leaves the listing untouched and returns `false`.
    pub fn navigate(
        &mut self,
        page: u32,
        response: &QueryResponse,
        tz: &Tz,
        language: &str,
    ) -> bool {
        if response.results.is_empty() {
            tracing::debug!(
                "Page {} has no posts, keeping page {}",
                page,
                self.pagination.current
            );
            return false;
        }

        self.posts = summaries(response, tz, language);
        self.pagination.current = page;
        true
    }
}

fn summaries(response: &QueryResponse, tz: &Tz, language: &str) -> Vec<PostSummary> {
    response
        .results
        .iter()
        .map(|doc| PostSummary::from_document(doc, tz, language))
        .collect()
}
