//! Crawler module for walking a gallery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with unbounded exponential-backoff retry
//! - Anchor extraction from gallery listings
//! - The depth-first walk and its error containment policy

mod fetcher;
mod parser;
mod retry;
mod walker;

pub use fetcher::{build_http_client, content_type_of, Fetcher, Page, Transport, INDEX_CONTENT_TYPE};
pub use parser::{extract_anchors, scan_anchors, Anchors, ParseError};
pub use retry::{Backoff, RetryPolicy};
pub use walker::Walker;

use crate::config::Config;
use crate::url::Site;

/// Builds a walker from the effective configuration
///
/// This constructs the one HTTP client used by every request of the walk.
///
/// # Arguments
///
/// * `config` - Resolved configuration; must carry a gallery address
/// * `recurse` - Whether to descend into child links
///
/// # Returns
///
/// * `Ok(Walker)` - Ready to walk
/// * `Err(PhoError)` - No address configured, or the client could not be built
pub fn walker_from_config(config: &Config, recurse: bool) -> crate::Result<Walker> {
    let address = config
        .address()
        .ok_or(crate::ConfigError::MissingAddress)?;
    let client = build_http_client(config.timeout())?;
    let fetcher = Fetcher::new(client, config.retry_policy());
    let site = Site::new(address, config.gallery.album_prefix.clone());

    Ok(Walker::new(fetcher, site, recurse))
}
