//! List posts from the CMS

use anyhow::Result;

use crate::cms::ContentSource;
use crate::content::Listing;
use crate::Blog;

/// Print one listing page
pub async fn run(blog: &Blog, page: u32) -> Result<()> {
    let client = blog.client()?;
    let response = client.query_page(page).await?;
    let listing = Listing::from_response(&response, &blog.config.tz(), &blog.config.language);
    print!("{}", format_listing(&listing));
    Ok(())
}

/// Text rendering of a listing, one post per line
pub fn format_listing(listing: &Listing) -> String {
    let mut out = format!(
        "Posts (page {}/{}):\n",
        listing.pagination.current, listing.pagination.total
    );
    for post in &listing.posts {
        let date = if post.updated_at.is_empty() {
            "-"
        } else {
            post.updated_at.as_str()
        };
        out.push_str(&format!("  {} - {} [{}]\n", date, post.title, post.slug));
    }
    out
}
