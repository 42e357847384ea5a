//! Post view models

use chrono_tz::Tz;
use serde::Serialize;

use crate::cms::Document;
use crate::helpers::long_date;
use crate::richtext::{self, LinkResolver};

/// A post as shown on the listing page
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    /// Empty when the document has no UID
    pub slug: String,
    pub title: String,
    /// Plain text of the first description paragraph
    pub description: String,
    pub cover: String,
    /// Long-form date, or empty when the post was never published
    pub updated_at: String,
}

impl PostSummary {
    pub fn from_document(doc: &Document, tz: &Tz, language: &str) -> Self {
        Self {
            slug: doc.uid.clone().unwrap_or_default(),
            title: richtext::as_text(&doc.data.title),
            description: richtext::first_paragraph_text(&doc.data.description),
            cover: doc.data.cover.url.clone().unwrap_or_default(),
            updated_at: doc
                .last_publication_date
                .map(|d| long_date(&d, tz, language))
                .unwrap_or_default(),
        }
    }

    /// Whether a link to the post can be rendered
    pub fn has_slug(&self) -> bool {
        !self.slug.is_empty()
    }
}

/// A post as shown on its own page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub slug: String,
    pub title: String,
    /// The whole description rendered as HTML
    pub description: String,
    pub cover: String,
    pub updated_at: Option<String>,
}

impl PostDetail {
    pub fn from_document(
        slug: &str,
        doc: &Document,
        tz: &Tz,
        language: &str,
        links: &LinkResolver,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            title: richtext::as_text(&doc.data.title),
            description: richtext::as_html(&doc.data.description, links),
            cover: doc.data.cover.url.clone().unwrap_or_default(),
            updated_at: doc
                .last_publication_date
                .map(|d| long_date(&d, tz, language)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::memory::post;

    fn doc(json: serde_json::Value) -> Document {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_summary_from_document() {
        let summary = PostSummary::from_document(
            &post("primeiro-post", "Primeiro post"),
            &chrono_tz::America::Sao_Paulo,
            "pt-BR",
        );
        assert_eq!(
            summary,
            PostSummary {
                slug: "primeiro-post".to_string(),
                title: "Primeiro post".to_string(),
                description: "Resumo de Primeiro post".to_string(),
                cover: "https://images.prismic.io/blog/primeiro-post.png".to_string(),
                updated_at: "02 de maio de 2021".to_string(),
            }
        );
        assert!(summary.has_slug());
    }

    #[test]
    fn test_summary_defaults() {
        let summary = PostSummary::from_document(
            &doc(serde_json::json!({
                "id": "x",
                "uid": null,
                "type": "post",
                "data": {
                    "title": [{"type": "heading1", "text": "Sem slug"}],
                    "description": [{"type": "paragraph", "text": "", "spans": []}],
                    "cover": {}
                }
            })),
            &chrono_tz::UTC,
            "pt-BR",
        );
        assert_eq!(summary.slug, "");
        assert!(!summary.has_slug());
        assert_eq!(summary.title, "Sem slug");
        assert_eq!(summary.description, "");
        assert_eq!(summary.cover, "");
        assert_eq!(summary.updated_at, "");
    }

    #[test]
    fn test_summary_description_skips_non_paragraphs() {
        let summary = PostSummary::from_document(
            &doc(serde_json::json!({
                "id": "x",
                "uid": "a",
                "type": "post",
                "data": {
                    "description": [
                        {"type": "heading2", "text": "Intro"},
                        {"type": "paragraph", "text": "Texto"}
                    ]
                }
            })),
            &chrono_tz::UTC,
            "pt-BR",
        );
        assert_eq!(summary.description, "Texto");
    }

    #[test]
    fn test_detail_from_document() {
        let detail = PostDetail::from_document(
            "primeiro-post",
            &post("primeiro-post", "Primeiro post"),
            &chrono_tz::UTC,
            "pt-BR",
            &LinkResolver::default(),
        );
        assert_eq!(detail.slug, "primeiro-post");
        assert_eq!(detail.title, "Primeiro post");
        assert_eq!(
            detail.description,
            "<p>Resumo de Primeiro post</p><p><strong>Mais</strong> texto</p>"
        );
        assert_eq!(detail.updated_at.as_deref(), Some("02 de maio de 2021"));
    }

    #[test]
    fn test_detail_links_to_other_posts() {
        let detail = PostDetail::from_document(
            "primeiro-post",
            &doc(serde_json::json!({
                "id": "x",
                "uid": "primeiro-post",
                "type": "post",
                "data": {
                    "description": [{
                        "type": "paragraph",
                        "text": "Leia a parte 2",
                        "spans": [{
                            "start": 5,
                            "end": 14,
                            "type": "hyperlink",
                            "data": {"link_type": "Document", "type": "post", "uid": "parte-2"}
                        }]
                    }]
                }
            })),
            &chrono_tz::UTC,
            "pt-BR",
            &LinkResolver::new("/", "/posts", "post"),
        );
        assert_eq!(
            detail.description,
            r#"<p>Leia <a href="/posts/parte-2">a parte 2</a></p>"#
        );
    }

    #[test]
    fn test_detail_without_publication_date() {
        let detail = PostDetail::from_document(
            "rascunho",
            &doc(serde_json::json!({"id": "x", "uid": "rascunho", "type": "post"})),
            &chrono_tz::UTC,
            "pt-BR",
            &LinkResolver::default(),
        );
        assert_eq!(detail.updated_at, None);
        assert_eq!(detail.description, "");
        assert_eq!(detail.title, "");
    }
}
