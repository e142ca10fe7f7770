use crate::crawler::Page;
use crate::visitor::traits::{VisitResult, Visitor};
use std::io::Write;

/// Prints every index node as a tab-indented tree
///
/// Leaves are ignored; local storage is never touched.
pub struct ListVisitor<W> {
    out: W,
}

impl<W: Write> ListVisitor<W> {
    /// Creates a visitor printing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for ListVisitor<W> {
    fn on_index(&mut self, _base: &str, node: &str, depth: usize) -> VisitResult {
        writeln!(self.out, "{}{}", "\t".repeat(depth), node)?;
        Ok(())
    }

    async fn on_leaf(&mut self, _page: Page, _base: &str) -> VisitResult {
        Ok(())
    }
}
