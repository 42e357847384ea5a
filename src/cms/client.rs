//! HTTP client for the Prismic REST API v2

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::document::{ApiDescriptor, Document, QueryResponse};
use super::error::CmsError;
use super::query::Query;
use super::ContentSource;
use crate::config::CmsConfig;

/// Longest response body excerpt kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// How long a fetched master ref is reused before asking the API again
const MASTER_REF_TTL: Duration = Duration::from_secs(5);

/// Prismic client bound to one repository and document type
///
/// Clones share the cached master ref.
#[derive(Clone)]
pub struct PrismicClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    document_type: String,
    page_size: u32,
    master_ref: Arc<RwLock<Option<(String, Instant)>>>,
}

impl PrismicClient {
    /// Build a client from the CMS configuration
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(CmsError::MissingEndpoint);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            access_token: config.access_token.clone(),
            document_type: config.document_type.clone(),
            page_size: config.page_size,
            master_ref: Arc::new(RwLock::new(None)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The master ref, fetched at most once per [`MASTER_REF_TTL`]
    pub async fn master_ref(&self) -> Result<String, CmsError> {
        let cached = self.master_ref.read().await.clone();
        if let Some((reference, fetched_at)) = cached {
            if fetched_at.elapsed() < MASTER_REF_TTL {
                return Ok(reference);
            }
        }

        let reference = self.fetch_master_ref().await?;
        *self.master_ref.write().await = Some((reference.clone(), Instant::now()));
        Ok(reference)
    }

    /// Fetch the API descriptor and return its master ref
    async fn fetch_master_ref(&self) -> Result<String, CmsError> {
        let mut params = Vec::new();
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        let api: ApiDescriptor = self.get_json(&self.endpoint, &params).await?;
        api.master_ref()
            .map(str::to_string)
            .ok_or(CmsError::NoMasterRef)
    }

    /// Run a documents search against the master ref
    pub async fn search(&self, query: &Query) -> Result<QueryResponse, CmsError> {
        let reference = self.master_ref().await?;
        let url = format!("{}/documents/search", self.endpoint);
        let params = query.params(&reference, self.access_token.as_deref());
        self.get_json(&url, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, CmsError> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CmsError::Status {
                status,
                url: url.to_string(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query_page(&self, page: u32) -> Result<QueryResponse, CmsError> {
        let query = Query::listing(&self.document_type, self.page_size, page);
        let response = self.search(&query).await?;
        tracing::debug!(
            "Fetched page {}/{} ({} posts)",
            response.page,
            response.total_pages,
            response.results.len()
        );
        Ok(response)
    }

    async fn get_by_uid(&self, uid: &str) -> Result<Option<Document>, CmsError> {
        let query = Query::by_uid(&self.document_type, uid);
        let response = self.search(&query).await?;
        Ok(response.results.into_iter().next())
    }
}
