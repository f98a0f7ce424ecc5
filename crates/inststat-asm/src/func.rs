//! Functions and blocks recovered from an assembly listing.

use std::collections::BTreeMap;

use inststat_ir::{LineRange, LineStat, SourceLoc};

/// Name of the block holding instructions that precede the first label.
pub const IMPLICIT_ENTRY: &str = "entry";

/// A labelled run of instructions inside an assembly function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsmBlock {
    /// Label number; `None` for the implicit entry block.
    pub id: Option<u32>,
    /// IR block name from the label comment (`bb.<id>` when absent).
    pub name: String,
    /// Source lines covered, from `.loc` directives in the function's file.
    pub range: Option<LineRange>,
    /// All instructions of the block.
    pub stat: LineStat,
}

impl AsmBlock {
    pub fn new(id: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Grow the block's source range to include `line`.
    pub fn cover(&mut self, line: u32) {
        match &mut self.range {
            Some(range) => range.extend(line),
            None => self.range = Some(LineRange::point(line)),
        }
    }
}

/// An assembly function between its begin and end markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsmFunc {
    pub name: String,
    /// Source file from the first `.loc` (empty if there was none).
    pub file: String,
    /// Source line from the first `.loc` (0 if there was none).
    pub at: u32,
    pub blocks: Vec<AsmBlock>,
    /// Instruction costs per source line of `file`.
    pub lines: BTreeMap<u32, LineStat>,
}

impl AsmFunc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn loc(&self) -> SourceLoc {
        SourceLoc::new(self.file.clone(), self.at)
    }

    /// Sum over all blocks.
    #[must_use]
    pub fn total(&self) -> LineStat {
        let mut total = LineStat::default();
        for block in &self.blocks {
            total += block.stat;
        }
        total
    }
}
