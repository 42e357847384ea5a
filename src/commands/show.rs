//! Show a single post from the CMS

use anyhow::Result;

use crate::cms::ContentSource;
use crate::content::PostDetail;
use crate::richtext::LinkResolver;
use crate::Blog;

/// Print a post's fields and HTML body
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let client = blog.client()?;
    match client.get_by_uid(slug).await? {
        Some(doc) => {
            let post = PostDetail::from_document(
                slug,
                &doc,
                &blog.config.tz(),
                &blog.config.language,
                &LinkResolver::from_config(&blog.config),
            );
            print!("{}", format_post(&post));
        }
        None => println!("Post not found: {}", slug),
    }
    Ok(())
}

pub fn format_post(post: &PostDetail) -> String {
    format!(
        "{}\n{}\ncover: {}\n\n{}\n",
        post.title,
        post.updated_at.as_deref().unwrap_or("-"),
        post.cover,
        post.description
    )
}
