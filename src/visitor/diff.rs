use crate::crawler::Page;
use crate::visitor::local_path;
use crate::visitor::traits::{VisitResult, Visitor};
use std::io::Write;
use std::path::PathBuf;

/// Reports remote index nodes that have no local counterpart
///
/// For every discovered node the mirrored local path is checked; missing
/// ones are printed, one per line. Leaves are ignored.
pub struct DiffVisitor<W> {
    local_root: PathBuf,
    out: W,
}

impl<W: Write> DiffVisitor<W> {
    /// Creates a visitor comparing against the mirror at `local_root`
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

impl<W: Write> Visitor for DiffVisitor<W> {
    fn on_index(&mut self, base: &str, node: &str, _depth: usize) -> VisitResult {
        let location = local_path(&self.local_root, &[base, node]);
        if !location.try_exists()? {
            writeln!(self.out, "{}", location.display())?;
        }
        Ok(())
    }

    async fn on_leaf(&mut self, _page: Page, _base: &str) -> VisitResult {
        Ok(())
    }
}
