//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a path segment (RFC 3986 unreserved ones are kept)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/posts/hello") // -> "/blog/posts/hello"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// URL of a single post under the listing route
pub fn post_url(root: &str, listing_route: &str, slug: &str) -> String {
    let route = listing_route.trim_matches('/');
    url_for(root, &format!("{}/{}", route, encode_segment(slug)))
}

/// URL of a listing page
pub fn page_url(root: &str, listing_route: &str, page: u32) -> String {
    format!("{}?page={}", url_for(root, listing_route), page)
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
