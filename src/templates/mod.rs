//! Built-in blog templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Template names end in
//! `.html`, so Tera escapes interpolated values; pre-rendered HTML (cover
//! tags, post bodies, URLs built by the helpers) is marked `safe`.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Listing, Pagination, PostDetail, PostSummary};
use crate::helpers::{cover_image_tag, page_url, post_url, url_for};

/// Stylesheet served next to the pages
pub const STYLESHEET: &str = include_str!("blog/style.css");

/// Path the stylesheet is served from, relative to the site root
pub const STYLESHEET_PATH: &str = "styles.css";

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("posts.html", include_str!("blog/posts.html")),
            ("post.html", include_str!("blog/post.html")),
            ("error.html", include_str!("blog/error.html")),
            // Partials
            (
                "partials/pager.html",
                include_str!("blog/partials/pager.html"),
            ),
        ])?;

        Ok(Self {
            tera,
            site: SiteData::new(config),
        })
    }

    /// Render the listing page
    pub fn render_listing(&self, listing: &Listing) -> Result<String> {
        let posts: Vec<PostCard> = listing
            .posts
            .iter()
            .map(|p| PostCard::new(&self.site, p))
            .collect();

        let mut context = self.base_context(&self.site.title);
        context.insert("posts", &posts);
        context.insert("pager", &PagerData::new(&self.site, &listing.pagination));
        self.render("posts.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &PostDetail) -> Result<String> {
        let mut context = self.base_context(&post.title);
        context.insert("post", post);
        context.insert("cover_tag", &cover_image_tag(&post.cover, &post.title));
        self.render("post.html", &context)
    }

    /// Render an error page
    pub fn render_error(&self, status: u16, message: &str) -> Result<String> {
        let mut context = self.base_context(&self.site.title);
        context.insert("status", &status);
        context.insert("message", message);
        self.render("error.html", &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    fn base_context(&self, page_title: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("page_title", page_title);
        context
    }
}

/// Site-wide values available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub root: String,
    pub listing_route: String,
    pub listing_url: String,
    pub stylesheet: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
            root: config.root.clone(),
            listing_route: config.listing.route.clone(),
            listing_url: url_for(&config.root, &config.listing.route),
            stylesheet: url_for(&config.root, STYLESHEET_PATH),
        }
    }
}

/// A post summary prepared for the listing template
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    /// Link target; absent for posts without a slug
    pub url: Option<String>,
    pub cover_tag: String,
    pub title: String,
    pub updated_at: String,
    pub description: String,
}

impl PostCard {
    fn new(site: &SiteData, post: &PostSummary) -> Self {
        Self {
            url: post
                .has_slug()
                .then(|| post_url(&site.root, &site.listing_route, &post.slug)),
            cover_tag: cover_image_tag(&post.cover, &post.title),
            title: post.title.clone(),
            updated_at: post.updated_at.clone(),
            description: post.description.clone(),
        }
    }
}

/// Pagination controls for the listing template
#[derive(Debug, Clone, Serialize)]
pub struct PagerData {
    pub current: u32,
    pub total: u32,
    pub show_previous: bool,
    pub show_next: bool,
    pub first_url: String,
    pub previous_url: String,
    pub next_url: String,
    pub last_url: String,
}

impl PagerData {
    fn new(site: &SiteData, pagination: &Pagination) -> Self {
        let url = |page| page_url(&site.root, &site.listing_route, page);
        Self {
            current: pagination.current,
            total: pagination.total,
            show_previous: pagination.show_previous(),
            show_next: pagination.show_next(),
            first_url: url(pagination.first()),
            previous_url: url(pagination.previous()),
            next_url: url(pagination.next()),
            last_url: url(pagination.last()),
        }
    }
}
