//! Prismic structured text
//!
//! Rich text arrives from the CMS as an array of blocks. Each text-bearing
//! block carries its raw text plus a list of spans (bold, italic, links,
//! labels) addressed by offsets into that text. This module decodes the
//! blocks and converts them to plain text or HTML.

mod html;
mod links;

use serde::{Deserialize, Serialize};

pub use html::as_html;
pub use links::LinkResolver;

/// A rich text field: an ordered list of blocks
pub type RichText = Vec<Block>;

/// A single structured-text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "heading1")]
    Heading1(TextBlock),
    #[serde(rename = "heading2")]
    Heading2(TextBlock),
    #[serde(rename = "heading3")]
    Heading3(TextBlock),
    #[serde(rename = "heading4")]
    Heading4(TextBlock),
    #[serde(rename = "heading5")]
    Heading5(TextBlock),
    #[serde(rename = "heading6")]
    Heading6(TextBlock),
    #[serde(rename = "paragraph")]
    Paragraph(TextBlock),
    #[serde(rename = "preformatted")]
    Preformatted(TextBlock),
    #[serde(rename = "list-item")]
    ListItem(TextBlock),
    #[serde(rename = "o-list-item")]
    OrderedListItem(TextBlock),
    #[serde(rename = "image")]
    Image(ImageBlock),
    #[serde(rename = "embed")]
    Embed(EmbedBlock),
    /// Block types this renderer does not know about
    #[serde(other)]
    Unknown,
}

impl Block {
    /// Text content of text-bearing blocks
    pub fn text(&self) -> Option<&TextBlock> {
        match self {
            Block::Heading1(t)
            | Block::Heading2(t)
            | Block::Heading3(t)
            | Block::Heading4(t)
            | Block::Heading5(t)
            | Block::Heading6(t)
            | Block::Paragraph(t)
            | Block::Preformatted(t)
            | Block::ListItem(t)
            | Block::OrderedListItem(t) => Some(t),
            Block::Image(_) | Block::Embed(_) | Block::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Custom block label, rendered as a CSS class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TextBlock {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            spans: Vec::new(),
            label: None,
        }
    }
}

/// Inline formatting applied to `[start, end)` of a block's text.
///
/// Offsets count UTF-16 code units, as produced by the CMS editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

/// Span payload: link details for hyperlinks, the name for labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanData {
    /// `Web`, `Media` or `Document`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Type of the linked document
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Set when the linked document no longer exists
    #[serde(rename = "isBroken", default)]
    pub is_broken: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedBlock {
    #[serde(default)]
    pub oembed: Oembed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Oembed {
    #[serde(default)]
    pub embed_url: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Plain text of every text-bearing block, joined by a single space
pub fn as_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(Block::text)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first paragraph block, or an empty string when there is none
pub fn first_paragraph_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .find_map(|block| match block {
            Block::Paragraph(t) => Some(t.text.clone()),
            _ => None,
        })
        .unwrap_or_default()
}
