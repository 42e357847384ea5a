//! In-memory content source for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{CmsError, ContentSource, Document, QueryResponse};

/// Serves a fixed list of documents, paginated like the CMS
pub struct MemorySource {
    pub documents: Vec<Document>,
    pub page_size: usize,
    /// Number of `query_page` calls served
    pub queries: AtomicUsize,
    /// Calls fail once this many queries have been served
    pub fail_after: Option<usize>,
    /// Simulated CMS latency per query
    pub delay: Duration,
}

impl MemorySource {
    pub fn new(documents: Vec<Document>, page_size: usize) -> Self {
        Self {
            documents,
            page_size,
            queries: AtomicUsize::new(0),
            fail_after: None,
            delay: Duration::ZERO,
        }
    }

    /// `count` posts with uids `post-1`..`post-N`
    pub fn with_posts(count: usize, page_size: usize) -> Self {
        let documents = (1..=count)
            .map(|i| post(&format!("post-{}", i), &format!("Post {}", i)))
            .collect();
        Self::new(documents, page_size)
    }

    /// A source where every call fails
    pub fn failing() -> Self {
        Self::new(Vec::new(), 1).failing_after(0)
    }

    /// Serve `queries` queries, then fail
    pub fn failing_after(mut self, queries: usize) -> Self {
        self.fail_after = Some(queries);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn total_pages(&self) -> u32 {
        self.documents.len().div_ceil(self.page_size) as u32
    }

    fn fails_at(&self, served: usize) -> bool {
        self.fail_after.is_some_and(|n| served >= n)
    }
}

fn unavailable() -> CmsError {
    CmsError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        url: "memory://".to_string(),
        body: "unavailable".to_string(),
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn query_page(&self, page: u32) -> Result<QueryResponse, CmsError> {
        let served = self.queries.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fails_at(served) {
            return Err(unavailable());
        }

        let page = page.max(1);
        let start = (page as usize - 1) * self.page_size;
        let results: Vec<Document> = self
            .documents
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        Ok(QueryResponse {
            page,
            results_per_page: self.page_size as u32,
            total_results_size: self.documents.len() as u32,
            total_pages: self.total_pages(),
            results,
        })
    }

    async fn get_by_uid(&self, uid: &str) -> Result<Option<Document>, CmsError> {
        if self.fails_at(self.query_count()) {
            return Err(unavailable());
        }
        Ok(self
            .documents
            .iter()
            .find(|d| d.uid.as_deref() == Some(uid))
            .cloned())
    }
}

/// A post document with a title, one description paragraph and a cover
pub fn post(uid: &str, title: &str) -> Document {
    serde_json::from_value(serde_json::json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "post",
        "last_publication_date": "2021-05-02T12:00:00+0000",
        "data": {
            "title": [{"type": "heading1", "text": title, "spans": []}],
            "description": [
                {"type": "paragraph", "text": format!("Resumo de {}", title), "spans": []},
                {"type": "paragraph", "text": "Mais texto", "spans": [{"start": 0, "end": 4, "type": "strong"}]}
            ],
            "cover": {"url": format!("https://images.prismic.io/blog/{}.png", uid)}
        }
    }))
    .expect("valid post fixture")
}
