//! Anchor extraction for gallery listings
//!
//! Gallery index pages are plain directory listings: every `<a>` start tag is
//! a child node, except the "parent directory" style links that point back at
//! the listing itself. Listings are read as a token stream rather than a
//! document tree, so misnested markup never duplicates an anchor.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use thiserror::Error;

/// Errors raised while reading a listing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No url for {0}")]
    MissingHref(String),
}

/// Links found in a listing, up to the first malformed anchor
#[derive(Debug, Default)]
pub struct Anchors {
    /// Hrefs in document order, self links removed
    pub links: Vec<String>,
    /// Set when an anchor without `href` ended the scan
    pub malformed: Option<ParseError>,
}

impl Anchors {
    /// Fails if the listing was malformed, otherwise returns the links
    pub fn into_result(self) -> Result<Vec<String>, ParseError> {
        match self.malformed {
            Some(e) => Err(e),
            None => Ok(self.links),
        }
    }
}

/// Collects `<a>` start tags as the tokenizer emits them
struct AnchorSink<'a> {
    remote_path: &'a str,
    anchors: Anchors,
}

impl TokenSink for AnchorSink<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if self.anchors.malformed.is_some() {
            return TokenSinkResult::Continue;
        }

        if let TagToken(tag) = token {
            if tag.kind == TagKind::StartTag && &*tag.name == "a" {
                self.visit_anchor(&tag);
            }
        }

        TokenSinkResult::Continue
    }
}

impl AnchorSink<'_> {
    fn visit_anchor(&mut self, tag: &Tag) {
        let href = tag
            .attrs
            .iter()
            .find(|attr| &*attr.name.local == "href")
            .map(|attr| attr.value.to_string());

        match href {
            Some(href) if self.remote_path.contains(href.as_str()) => {}
            Some(href) => self.anchors.links.push(href),
            None => self.anchors.malformed = Some(ParseError::MissingHref(render_tag(tag))),
        }
    }
}

fn render_tag(tag: &Tag) -> String {
    let attrs: String = tag
        .attrs
        .iter()
        .map(|attr| format!(" {}=\"{}\"", &*attr.name.local, attr.value))
        .collect();
    format!("<{}{}>", &*tag.name, attrs)
}

/// Scans a gallery listing for child links, in document order
///
/// # Link Extraction Rules
///
/// - Every `<a>` start tag must carry an `href`; the first one without it
///   stops the scan and is reported in [`Anchors::malformed`], after the
///   links that precede it
/// - A link is skipped when `remote_path` contains it as a substring. This
///   drops self and parent links such as `/var/albums/` on
///   `/var/albums/2019`, but it is a loose rule: a child whose name happens
///   to occur inside the current path is skipped too
///
/// # Arguments
///
/// * `html` - The listing body
/// * `remote_path` - Server-side path of the listing, e.g. `/var/albums/2019`
pub fn scan_anchors(html: &str, remote_path: &str) -> Anchors {
    let sink = AnchorSink {
        remote_path,
        anchors: Anchors::default(),
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.anchors
}

/// Extracts child links from a gallery listing, failing on any anchor
/// without `href`
///
/// # Example
///
/// ```
/// use pho::crawler::extract_anchors;
///
/// let html = r#"<a href="/var/albums/">Parent</a><a href="beach.jpg">beach</a>"#;
/// let links = extract_anchors(html, "/var/albums/2019").unwrap();
/// assert_eq!(links, vec!["beach.jpg".to_string()]);
/// ```
pub fn extract_anchors(html: &str, remote_path: &str) -> Result<Vec<String>, ParseError> {
    scan_anchors(html, remote_path).into_result()
}
