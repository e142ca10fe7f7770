//! Depth-first walk over a gallery
//!
//! The walker fetches a remote path, dispatches on its content type, and
//! descends into child listings when recursion is enabled. Pending listings
//! are kept on an explicit stack rather than the call stack, so arbitrarily
//! deep galleries do not grow the native stack.

use crate::crawler::fetcher::{Fetcher, Transport};
use crate::crawler::parser::{scan_anchors, ParseError};
use crate::url::{join_path, Site};
use crate::visitor::Visitor;
use crate::{FatalError, LeafError, WalkError};
use reqwest::Client;
use std::vec::IntoIter;

/// A fetched listing whose child links are still being visited
struct Listing {
    base: String,
    depth: usize,
    url: String,
    status: u16,
    links: IntoIter<String>,
    malformed: Option<ParseError>,
}

/// Walks the gallery tree below a remote path
pub struct Walker<T = Client> {
    fetcher: Fetcher<T>,
    site: Site,
    recurse: bool,
}

impl<T: Transport> Walker<T> {
    /// Creates a walker
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetcher used for every request of the walk
    /// * `site` - Gallery address and album prefix
    /// * `recurse` - Whether to descend into child links
    pub fn new(fetcher: Fetcher<T>, site: Site, recurse: bool) -> Self {
        Self {
            fetcher,
            site,
            recurse,
        }
    }

    /// Walks the tree rooted at `base`
    ///
    /// # Traversal Order
    ///
    /// Strictly depth-first: links are visited in document order and each
    /// child's subtree is finished before `on_index` runs for the next
    /// sibling.
    ///
    /// # Error Handling
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | Fetch fails | Abort with `Fatal` |
    /// | Listing unreadable | Abort with `Fatal` |
    /// | Anchor without href | Abort with `Fatal` once the links before it are done |
    /// | `on_index` fails | Abort with `Fatal` |
    /// | `on_leaf` fails below the root | Logged, walk continues |
    /// | `on_leaf` fails for the root itself | Returned as `Leaf` |
    pub async fn walk<V: Visitor>(&self, base: &str, visitor: &mut V) -> Result<(), WalkError> {
        let mut stack = match self.visit(base, 0, visitor).await? {
            Some(listing) => vec![listing],
            None => return Ok(()),
        };

        while let Some(listing) = stack.last_mut() {
            let Some(node) = listing.links.next() else {
                if let Some(source) = listing.malformed.take() {
                    return Err(FatalError::MalformedListing {
                        url: listing.url.clone(),
                        status: listing.status,
                        source,
                    }
                    .into());
                }
                stack.pop();
                continue;
            };

            let base = listing.base.clone();
            let depth = listing.depth;

            if let Err(source) = visitor.on_index(&base, &node, depth) {
                return Err(FatalError::Index {
                    url: listing.url.clone(),
                    status: listing.status,
                    source,
                }
                .into());
            }

            if !self.recurse {
                continue;
            }

            let next = join_path(&[&base, &node]);
            match self.visit(&next, depth + 1, visitor).await {
                Ok(Some(child)) => stack.push(child),
                Ok(None) => {}
                Err(WalkError::Leaf(e)) => tracing::warn!("{}", e),
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Fetches one node and dispatches it
    ///
    /// Returns the listing for index pages so the caller can visit its
    /// links; leaf pages are handed to the visitor right away.
    async fn visit<V: Visitor>(
        &self,
        base: &str,
        depth: usize,
        visitor: &mut V,
    ) -> Result<Option<Listing>, WalkError> {
        let url = self.site.url_for(base);
        let page = self.fetcher.fetch(&url).await?;
        let status = page.status().as_u16();

        if page.is_index() {
            let body = page.text().await.map_err(|source| FatalError::Body {
                url: url.clone(),
                status,
                source,
            })?;

            let anchors = scan_anchors(&body, &self.site.remote_path(base));

            tracing::debug!("{} {} text/html ({} links)", url, status, anchors.links.len());

            return Ok(Some(Listing {
                base: base.to_string(),
                depth,
                url,
                status,
                links: anchors.links.into_iter(),
                malformed: anchors.malformed,
            }));
        }

        let content_type = page.content_type().to_string();
        if let Err(source) = visitor.on_leaf(page, base).await {
            return Err(LeafError {
                url,
                status,
                content_type,
                source,
            }
            .into());
        }

        tracing::debug!("{} {} {}", url, status, content_type);
        Ok(None)
    }
}
