//! Configuration module for pho
//!
//! Settings come from an optional TOML file, with the gallery address
//! overridable from the command line or the `PHOTO_GALLERY_URL` environment
//! variable.
//!
//! # Example
//!
//! ```no_run
//! use pho::config::resolve_config;
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("pho.toml")), None).unwrap();
//! println!("Crawling {}", config.address().unwrap());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, GalleryConfig, RetryConfig};

// Re-export parser functions
pub use parser::{load_config, resolve_config};
