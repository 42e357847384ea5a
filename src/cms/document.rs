//! Prismic API v2 response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::richtext::RichText;

/// API descriptor returned by the entry point
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDescriptor {
    #[serde(default)]
    pub refs: Vec<ApiRef>,
}

impl ApiDescriptor {
    /// The ref identifying the currently published content
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// One page of search results
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub total_results_size: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<Document>,
}

/// A CMS document of the post type
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "prismic_date")]
    pub last_publication_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: PostFields,
}

/// Fields of a post; only the projected ones are present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: RichText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: RichText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: ImageField,
}

/// Image field; an unset image is an empty object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageField {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse timestamps like `2021-05-02T12:00:00+0000`, also accepting RFC 3339
fn prismic_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    DateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(&raw))
        .map(|d| Some(d.with_timezone(&Utc)))
        .map_err(|e| serde::de::Error::custom(format!("invalid date {:?}: {}", raw, e)))
}
