//! HTML helper functions

/// Width of cover images on both pages
pub const COVER_WIDTH: u32 = 720;
/// Height of cover images on both pages
pub const COVER_HEIGHT: u32 = 410;

/// Tiny PNG shown behind a cover while it loads
pub const BLUR_PLACEHOLDER: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mO0YvjfBAADcgG9K6qdIwAAAABJRU5ErkJggg==";

/// Generate a cover image tag with the blurred placeholder background
///
/// # Examples
/// ```ignore
/// cover_image_tag("https://images.prismic.io/blog/a.png", "My post")
/// ```
pub fn cover_image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" width="{}" height="{}" loading="lazy" style="background-image:url({});background-size:cover">"#,
        html_escape(src),
        html_escape(alt),
        COVER_WIDTH,
        COVER_HEIGHT,
        BLUR_PLACEHOLDER
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
