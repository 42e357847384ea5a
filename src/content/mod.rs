//! Content module - post view models and listing state

mod listing;
mod post;

pub use listing::{Listing, Pagination};
pub use post::{PostDetail, PostSummary};
