//! Headless CMS access
//!
//! The views only depend on [`ContentSource`]; [`PrismicClient`] is the
//! implementation backed by the Prismic REST API.

mod client;
mod document;
mod error;
mod query;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

pub use client::PrismicClient;
pub use document::{
    ApiDescriptor, ApiRef, Dimensions, Document, ImageField, PostFields, QueryResponse,
};
pub use error::CmsError;
pub use query::{Predicate, Query};

/// Where posts come from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page (1-based) of posts, newest first
    async fn query_page(&self, page: u32) -> Result<QueryResponse, CmsError>;

    /// Look up a single post by its UID; `None` when it does not exist
    async fn get_by_uid(&self, uid: &str) -> Result<Option<Document>, CmsError>;
}
