use crate::crawler::Page;
use crate::visitor::local_path;
use crate::visitor::traits::{VisitError, VisitResult, Visitor};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Content types saved by the fetch command
pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Downloads image leaves into a local mirror of the gallery
///
/// Files that already exist locally are skipped. Bodies are streamed to a
/// `.part` file next to the destination and renamed into place once
/// complete, so an interrupted download never looks finished.
pub struct FetchVisitor<W> {
    local_root: PathBuf,
    out: W,
}

impl<W: Write> FetchVisitor<W> {
    /// Creates a visitor mirroring into `local_root`
    pub fn new(local_root: impl Into<PathBuf>, out: W) -> Self {
        Self {
            local_root: local_root.into(),
            out,
        }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for FetchVisitor<W> {
    fn on_index(&mut self, _base: &str, node: &str, _depth: usize) -> VisitResult {
        tracing::debug!("Traversing {}", node);
        Ok(())
    }

    async fn on_leaf(&mut self, page: Page, base: &str) -> VisitResult {
        if !IMAGE_CONTENT_TYPES.contains(&page.content_type()) {
            return Err(VisitError::UnknownContentType {
                content_type: page.content_type().to_string(),
                path: base.to_string(),
            });
        }

        let destination = local_path(&self.local_root, &[base]);
        if destination.try_exists()? {
            return Ok(());
        }

        if let Some(folder) = destination.parent() {
            fs::create_dir_all(folder).await?;
        }

        let written = download(page, &destination).await?;
        writeln!(
            self.out,
            "Downloaded {} bytes for {}",
            written,
            destination.display()
        )?;
        Ok(())
    }
}

/// Streams the body of `page` to `destination` through a `.part` file
async fn download(page: Page, destination: &Path) -> Result<u64, VisitError> {
    let partial = partial_path(destination)?;

    match write_body(page, &partial).await {
        Ok(written) => {
            fs::rename(&partial, destination).await?;
            Ok(written)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                tracing::debug!("Could not remove {}: {}", partial.display(), cleanup);
            }
            Err(e)
        }
    }
}

async fn write_body(page: Page, path: &Path) -> Result<u64, VisitError> {
    let mut output = File::create(path).await?;
    let mut response = page.into_response();
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        output.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    output.flush().await?;
    Ok(written)
}

fn partial_path(destination: &Path) -> io::Result<PathBuf> {
    let name = destination.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no file name in {}", destination.display()),
        )
    })?;

    let mut partial = name.to_os_string();
    partial.push(".part");
    Ok(destination.with_file_name(partial))
}
