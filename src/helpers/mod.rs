//! Helper functions for views
//!
//! Small formatting utilities shared by the view models and templates:
//! localized dates, HTML escaping, image tags and URL building.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
