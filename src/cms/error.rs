//! CMS client errors

use thiserror::Error;

/// Errors raised while talking to the CMS
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS endpoint is not configured (set cms.endpoint or PRISMIC_ENDPOINT)")]
    MissingEndpoint,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned {status} for {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("Failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CMS API has no master ref")]
    NoMasterRef,
}
