//! pho: a scraper for hierarchical photo galleries
//!
//! This crate walks a gallery server whose paths are either HTML directory
//! listings (index pages) or image resources (leaf pages), handing every
//! discovered node to a pluggable [`visitor::Visitor`].

pub mod config;
pub mod crawler;
pub mod url;
pub mod visitor;

use thiserror::Error;

/// Main error type for pho operations
#[derive(Debug, Error)]
pub enum PhoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("gallery url must be provided (--url or PHOTO_GALLERY_URL)")]
    MissingAddress,

    #[error("Invalid gallery url: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Outcome of a failed walk
///
/// A `Fatal` error aborts the whole traversal. A `Leaf` error only concerns
/// the node that produced it: the walker logs it one level up and moves on to
/// the next sibling, so it only reaches the caller when the root itself was
/// a leaf.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error(transparent)]
    Fatal(#[from] FatalError),

    #[error(transparent)]
    Leaf(#[from] LeafError),
}

impl WalkError {
    /// Returns true if this error is contained to a single leaf node
    pub fn is_leaf(&self) -> bool {
        matches!(self, WalkError::Leaf(_))
    }
}

/// Errors that abort the entire walk
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Failed to read listing {url} ({status}): {source}")]
    Body {
        url: String,
        status: u16,
        source: reqwest::Error,
    },

    #[error("Malformed listing {url} ({status}): {source}")]
    MalformedListing {
        url: String,
        status: u16,
        source: crawler::ParseError,
    },

    #[error("Index error at {url} ({status}): {source}")]
    Index {
        url: String,
        status: u16,
        source: visitor::VisitError,
    },
}

/// A leaf visitor failure, contained to the node at `url`
#[derive(Debug, Error)]
#[error("Leaf error at {url} ({status} {content_type}): {source}")]
pub struct LeafError {
    pub url: String,
    pub status: u16,
    pub content_type: String,
    pub source: visitor::VisitError,
}

/// Result type alias for pho operations
pub type Result<T> = std::result::Result<T, PhoError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Fetcher, Page, RetryPolicy, Walker};
pub use crate::url::Site;
pub use visitor::{DiffVisitor, FetchVisitor, ListVisitor, VisitError, Visitor};
