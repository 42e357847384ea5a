//! Structured text to HTML serialization

use super::{Block, EmbedBlock, ImageBlock, LinkResolver, Span, TextBlock};
use crate::helpers::html_escape;

/// Render rich text blocks as HTML
///
/// Consecutive list items are grouped into a single `<ul>` or `<ol>`.
/// Hyperlinks get their `href` from `links`.
pub fn as_html(blocks: &[Block], links: &LinkResolver) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list = match block {
            Block::ListItem(_) => Some("ul"),
            Block::OrderedListItem(_) => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        html.push_str(&block_html(block, links));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn block_html(block: &Block, links: &LinkResolver) -> String {
    match block {
        Block::Heading1(t) => text_element("h1", t, links),
        Block::Heading2(t) => text_element("h2", t, links),
        Block::Heading3(t) => text_element("h3", t, links),
        Block::Heading4(t) => text_element("h4", t, links),
        Block::Heading5(t) => text_element("h5", t, links),
        Block::Heading6(t) => text_element("h6", t, links),
        Block::Paragraph(t) => text_element("p", t, links),
        Block::Preformatted(t) => text_element("pre", t, links),
        Block::ListItem(t) | Block::OrderedListItem(t) => text_element("li", t, links),
        Block::Image(img) => image_html(img),
        Block::Embed(embed) => embed_html(embed),
        Block::Unknown => String::new(),
    }
}

fn text_element(tag: &str, block: &TextBlock, links: &LinkResolver) -> String {
    let class = block
        .label
        .as_ref()
        .map(|l| format!(r#" class="{}""#, html_escape(l)))
        .unwrap_or_default();
    format!(
        "<{tag}{class}>{}</{tag}>",
        render_spans(&block.text, &block.spans, links)
    )
}

fn image_html(img: &ImageBlock) -> String {
    let copyright = img
        .copyright
        .as_ref()
        .map(|c| format!(r#" copyright="{}""#, html_escape(c)))
        .unwrap_or_default();
    format!(
        r#"<p class="block-img"><img src="{}" alt="{}"{} /></p>"#,
        html_escape(&img.url),
        html_escape(img.alt.as_deref().unwrap_or("")),
        copyright
    )
}

fn embed_html(embed: &EmbedBlock) -> String {
    let oembed = &embed.oembed;
    let mut attrs = format!(r#" data-oembed="{}""#, html_escape(&oembed.embed_url));
    if let Some(kind) = &oembed.kind {
        attrs.push_str(&format!(r#" data-oembed-type="{}""#, html_escape(kind)));
    }
    if let Some(provider) = &oembed.provider_name {
        attrs.push_str(&format!(
            r#" data-oembed-provider="{}""#,
            html_escape(provider)
        ));
    }
    format!(
        "<div{}>{}</div>",
        attrs,
        oembed.html.as_deref().unwrap_or("")
    )
}

/// A span with offsets converted to char indices and clamped to the text
#[derive(Clone, Copy)]
struct Range<'a> {
    start: usize,
    end: usize,
    span: &'a Span,
}

fn render_spans(text: &str, spans: &[Span], links: &LinkResolver) -> String {
    let chars: Vec<char> = text.chars().collect();
    let index = Utf16Index::new(&chars);

    let mut ranges: Vec<Range> = spans
        .iter()
        .map(|span| Range {
            start: index.char_offset(span.start),
            end: index.char_offset(span.end),
            span,
        })
        .filter(|r| r.start < r.end)
        .collect();
    // Outer spans first so they can enclose the ones that start with them
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::new();
    write_range(&mut out, &chars, 0, chars.len(), &ranges, links);
    out
}

fn write_range(
    out: &mut String,
    chars: &[char],
    from: usize,
    to: usize,
    ranges: &[Range],
    links: &LinkResolver,
) {
    let mut pos = from;
    let mut i = 0;

    while i < ranges.len() {
        let mut current = ranges[i];
        i += 1;

        // Overlaps an earlier sibling: keep only the uncovered tail
        current.start = current.start.max(pos);
        if current.start >= current.end {
            continue;
        }

        let mut children = Vec::new();
        while i < ranges.len() && ranges[i].start < current.end {
            let mut child = ranges[i];
            child.end = child.end.min(current.end);
            children.push(child);
            i += 1;
        }

        write_text(out, &chars[pos..current.start]);
        let (open, close) = span_tags(current.span, links);
        out.push_str(&open);
        write_range(out, chars, current.start, current.end, &children, links);
        out.push_str(&close);
        pos = current.end;
    }

    write_text(out, &chars[pos..to]);
}

fn write_text(out: &mut String, chars: &[char]) {
    let text: String = chars.iter().collect();
    out.push_str(&html_escape(&text).replace('\n', "<br />"));
}

fn span_tags(span: &Span, links: &LinkResolver) -> (String, String) {
    let data = span.data.as_ref();
    match span.kind.as_str() {
        "strong" => ("<strong>".to_string(), "</strong>".to_string()),
        "em" => ("<em>".to_string(), "</em>".to_string()),
        "hyperlink" => match data.and_then(|d| links.resolve(d)) {
            Some(url) => {
                let target = data
                    .and_then(|d| d.target.as_deref())
                    .map(|t| format!(r#" target="{}" rel="noopener""#, html_escape(t)))
                    .unwrap_or_default();
                (
                    format!(r#"<a href="{}"{}>"#, html_escape(&url), target),
                    "</a>".to_string(),
                )
            }
            None => (String::new(), String::new()),
        },
        "label" => {
            let label = data.and_then(|d| d.label.as_deref()).unwrap_or("");
            (
                format!(r#"<span class="{}">"#, html_escape(label)),
                "</span>".to_string(),
            )
        }
        other => {
            tracing::debug!("Unsupported span type: {}", other);
            (String::new(), String::new())
        }
    }
}

/// Maps UTF-16 code unit offsets onto char indices
struct Utf16Index {
    /// `starts[i]` is the UTF-16 offset where char `i` begins
    starts: Vec<usize>,
    len: usize,
}

impl Utf16Index {
    fn new(chars: &[char]) -> Self {
        let mut starts = Vec::with_capacity(chars.len());
        let mut offset = 0;
        for c in chars {
            starts.push(offset);
            offset += c.len_utf16();
        }
        Self {
            starts,
            len: offset,
        }
    }

    fn char_offset(&self, utf16: usize) -> usize {
        if utf16 >= self.len {
            return self.starts.len();
        }
        match self.starts.binary_search(&utf16) {
            Ok(i) => i,
            // Inside a surrogate pair: round up to the next char
            Err(i) => i,
        }
    }
}
