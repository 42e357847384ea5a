//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::ListingConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::{ACCESS_TOKEN_ENV, ENDPOINT_ENV};
