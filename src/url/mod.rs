//! URL handling module for pho
//!
//! Remote paths are plain slash-separated strings relative to the gallery's
//! album prefix; this module joins and cleans them and turns them into request
//! URLs.

mod normalize;

// Re-export main functions
pub use normalize::{clean_path, join_path};

/// A gallery server: base address plus the prefix all albums live under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    address: String,
    album_prefix: String,
}

impl Site {
    /// Creates a site from a base address such as `http://gallery.local`
    pub fn new(address: impl Into<String>, album_prefix: impl Into<String>) -> Self {
        let address: String = address.into();
        Self {
            address: address.trim_end_matches('/').to_string(),
            album_prefix: album_prefix.into(),
        }
    }

    /// Server-side path of a node, e.g. `/var/albums/2019`
    pub fn remote_path(&self, base: &str) -> String {
        join_path(&[&self.album_prefix, base])
    }

    /// Full request URL for a node
    ///
    /// # Examples
    ///
    /// ```
    /// use pho::url::Site;
    ///
    /// let site = Site::new("http://gallery.local/", "/var/albums");
    /// assert_eq!(site.url_for("2019/"), "http://gallery.local/var/albums/2019");
    /// ```
    pub fn url_for(&self, base: &str) -> String {
        format!("{}{}", self.address, self.remote_path(base))
    }
}
