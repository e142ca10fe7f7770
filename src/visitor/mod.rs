//! Visitors for the three gallery commands
//!
//! Each command plugs one of these into the walker:
//! - [`ListVisitor`] prints the remote tree
//! - [`DiffVisitor`] prints remote nodes missing locally
//! - [`FetchVisitor`] downloads images into a local mirror

mod diff;
mod fetch;
mod list;
mod traits;

pub use diff::DiffVisitor;
pub use fetch::FetchVisitor;
pub use list::ListVisitor;
pub use traits::{VisitError, VisitResult, Visitor};

use crate::url::join_path;
use std::path::{Path, PathBuf};

/// Maps a remote path onto the local mirror rooted at `root`
///
/// The remote elements are joined as a rooted path first, so `..` segments
/// coming from the server cannot climb above `root`.
///
/// # Examples
///
/// ```
/// use pho::visitor::local_path;
/// use std::path::{Path, PathBuf};
///
/// let path = local_path(Path::new("mirror"), &["/2019", "beach.jpg"]);
/// assert_eq!(path, PathBuf::from("mirror/2019/beach.jpg"));
/// ```
pub fn local_path(root: &Path, remote: &[&str]) -> PathBuf {
    let mut elements = vec!["/"];
    elements.extend_from_slice(remote);

    let joined = join_path(&elements);
    match joined.trim_start_matches('/') {
        "" => root.to_path_buf(),
        relative => root.join(relative),
    }
}
