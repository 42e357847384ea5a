//! Hyperlink resolution for rich text

use super::SpanData;
use crate::config::SiteConfig;
use crate::helpers::post_url;

/// Turns hyperlink span data into an `href`.
///
/// Web and media links carry their own URL. A link to another CMS document
/// only carries the document's type and UID: documents of the post type
/// resolve to their post page, other types have no page here.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    root: String,
    listing_route: String,
    document_type: String,
}

impl LinkResolver {
    pub fn new(root: &str, listing_route: &str, document_type: &str) -> Self {
        Self {
            root: root.to_string(),
            listing_route: listing_route.to_string(),
            document_type: document_type.to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            &config.root,
            &config.listing.route,
            &config.cms.document_type,
        )
    }

    pub fn resolve(&self, data: &SpanData) -> Option<String> {
        if let Some(url) = data.url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }

        if data.link_type.as_deref() != Some("Document") || data.is_broken {
            return None;
        }
        let uid = data.uid.as_deref().filter(|u| !u.is_empty())?;
        let kind = data.kind.as_deref()?;
        (!self.document_type.is_empty() && kind == self.document_type)
            .then(|| post_url(&self.root, &self.listing_route, uid))
    }
}
