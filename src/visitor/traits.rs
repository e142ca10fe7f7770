//! Visitor trait and error types
//!
//! A visitor is what a command plugs into the walker: it decides what happens
//! with every discovered child link and every leaf resource.

use crate::crawler::Page;
use std::future::Future;
use thiserror::Error;

/// Errors a visitor can report back to the walker
#[derive(Debug, Error)]
pub enum VisitError {
    #[error("Unknown content type {content_type}:{path}")]
    UnknownContentType { content_type: String, path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read response body: {0}")]
    Body(#[from] reqwest::Error),
}

/// Result type for visitor callbacks
pub type VisitResult = Result<(), VisitError>;

/// Callbacks invoked by the walker
///
/// A failing [`Visitor::on_index`] aborts the whole walk. A failing
/// [`Visitor::on_leaf`] only abandons that leaf: the walker logs it and moves
/// on to its siblings.
pub trait Visitor {
    /// Called once per child link of an index page, before the child is
    /// fetched
    ///
    /// # Arguments
    ///
    /// * `base` - Remote path of the listing the link was found on
    /// * `node` - The link as written in the listing
    /// * `depth` - 0 for links on the root listing, +1 per level below
    fn on_index(&mut self, base: &str, node: &str, depth: usize) -> VisitResult;

    /// Called once per non-HTML response
    ///
    /// The visitor owns `page` and either reads its body or drops it.
    ///
    /// # Arguments
    ///
    /// * `page` - The open response
    /// * `base` - Remote path of the leaf
    fn on_leaf(&mut self, page: Page, base: &str) -> impl Future<Output = VisitResult>;
}
