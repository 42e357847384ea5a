//! HTTP server rendering the blog pages

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use chrono_tz::Tz;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::ListingCache;
use crate::cms::ContentSource;
use crate::config::SiteConfig;
use crate::content::PostDetail;
use crate::helpers::url_for;
use crate::richtext::LinkResolver;
use crate::templates::{TemplateRenderer, STYLESHEET, STYLESHEET_PATH};
use crate::Blog;

/// Server state
pub struct AppState {
    config: SiteConfig,
    tz: Tz,
    source: Arc<dyn ContentSource>,
    listing: Arc<ListingCache>,
    renderer: TemplateRenderer,
    links: LinkResolver,
    static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        config: SiteConfig,
        source: Arc<dyn ContentSource>,
        static_dir: Option<PathBuf>,
    ) -> Result<Arc<Self>> {
        let tz = config.tz();
        let listing = ListingCache::new(
            Arc::clone(&source),
            Duration::from_secs(config.listing.revalidate_secs),
            tz,
            &config.language,
        );
        let renderer = TemplateRenderer::new(&config)?;
        let links = LinkResolver::from_config(&config);

        Ok(Arc::new(Self {
            config,
            tz,
            source,
            listing,
            renderer,
            links,
            static_dir,
        }))
    }

    fn listing_url(&self) -> String {
        url_for(&self.config.root, &self.config.listing.route)
    }

    /// Log an error and render the error page
    fn error_page(&self, error: anyhow::Error) -> Response {
        tracing::error!("Request failed: {:#}", error);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        match self
            .renderer
            .render_error(status.as_u16(), "Não foi possível carregar o conteúdo.")
        {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, "Internal server error").into_response()
            }
        }
    }
}

/// Build the router for all blog routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let listing_route = format!("/{}", state.config.listing.route.trim_matches('/'));
    let post_route = format!("{}/:slug", listing_route);

    let mut app = Router::new()
        .route("/", get(index_handler))
        .route(&listing_route, get(listing_handler))
        .route(&post_route, get(post_handler))
        .route(&format!("/{}", STYLESHEET_PATH), get(stylesheet_handler));

    if let Some(dir) = state.static_dir.as_ref().filter(|d| d.is_dir()) {
        tracing::debug!("Serving assets from {:?}", dir);
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    let app = app.with_state(Arc::clone(&state));

    let root = state.config.root.trim_end_matches('/');
    let app = if root.is_empty() {
        app
    } else {
        Router::new().nest(root, app)
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let source: Arc<dyn ContentSource> = Arc::new(blog.client()?);
    let state = AppState::new(blog.config.clone(), source, Some(blog.static_dir()))?;

    // Generate the listing up front; a failure here is retried on first request
    if let Err(e) = state.listing.refresh().await {
        tracing::warn!("Initial listing generation failed: {}", e);
    }

    let app = create_router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.listing_url())
}

#[derive(Debug, Deserialize)]
struct ListingParams {
    /// Kept as text so a malformed value falls back to the default page
    page: Option<String>,
}

impl ListingParams {
    fn page(&self) -> Option<u32> {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
    }
}

/// Listing page, optionally switched to another page
async fn listing_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Response {
    match render_listing(&state, params.page()).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => state.error_page(e),
    }
}

async fn render_listing(state: &Arc<AppState>, page: Option<u32>) -> Result<String> {
    let mut listing = state.listing.get().await?;

    if let Some(page) = page.filter(|p| *p != listing.pagination.current) {
        let response = state.source.query_page(page).await?;
        listing.navigate(page, &response, &state.tz, &state.config.language);
    }

    state.renderer.render_listing(&listing)
}

/// Single post page; unknown slugs go back to the listing
async fn post_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match render_post(&state, &slug).await {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => {
            tracing::info!("Post {:?} not found, redirecting to listing", slug);
            Redirect::temporary(&state.listing_url()).into_response()
        }
        Err(e) => state.error_page(e),
    }
}

async fn render_post(state: &AppState, slug: &str) -> Result<Option<String>> {
    let Some(doc) = state.source.get_by_uid(slug).await? else {
        return Ok(None);
    };

    let post = PostDetail::from_document(
        slug,
        &doc,
        &state.tz,
        &state.config.language,
        &state.links,
    );
    Ok(Some(state.renderer.render_post(&post)?))
}

async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
