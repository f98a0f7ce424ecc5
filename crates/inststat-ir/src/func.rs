//! Functions and basic blocks as described by a bbinfo file.

use std::collections::BTreeMap;
use std::fmt;

use crate::{LineRange, LineStat, SourceLoc};

/// How a function's blocks carry statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// `size`/`from`/`to` plus one aggregate `stat` per block.
    Block,
    /// One stat entry per source line inside each block.
    #[default]
    Line,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Line => write!(f, "line"),
        }
    }
}

/// A basic block of the compiler's intermediate representation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockStat {
    pub name: String,
    /// Exception-handling blocks are flagged and never emitted.
    pub skip: bool,
    pub size: Option<u32>,
    pub from: Option<SourceLoc>,
    pub to: Option<SourceLoc>,
    /// Block aggregate (block layout).
    pub stat: LineStat,
    /// Per-line stats (line layout), keyed by source line.
    pub lines: BTreeMap<u32, LineStat>,
}

impl BlockStat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Block-layout block spanning `from..=to`.
    #[must_use]
    pub fn with_span(mut self, size: u32, from: SourceLoc, to: SourceLoc) -> Self {
        self.size = Some(size);
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Line-layout block with the given (initially empty) lines.
    #[must_use]
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = u32>) -> Self {
        self.lines
            .extend(lines.into_iter().map(|line| (line, LineStat::default())));
        self
    }

    /// Source interval of the block.
    ///
    /// Uses `from`/`to` when both carry a valid line, otherwise the first and
    /// last recorded line. Line 0 never counts.
    #[must_use]
    pub fn range(&self) -> Option<LineRange> {
        if let (Some(from), Some(to)) = (&self.from, &self.to)
            && from.is_valid()
            && to.is_valid()
        {
            return Some(LineRange::new(from.line, to.line));
        }

        let mut lines = self.lines.range(1..).map(|(&line, _)| line);
        let first = lines.next()?;
        let last = lines.next_back().unwrap_or(first);
        Some(LineRange::new(first, last))
    }

    /// First recorded non-zero line (line layout).
    #[must_use]
    pub fn first_line(&self) -> Option<u32> {
        self.lines.range(1..).next().map(|(&line, _)| line)
    }

    /// Aggregate plus all per-line stats.
    #[must_use]
    pub fn total(&self) -> LineStat {
        let mut total = self.stat;
        for stat in self.lines.values() {
            total += *stat;
        }
        total
    }
}

/// A function and its blocks, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuncStat {
    pub name: String,
    pub file: String,
    pub at: u32,
    pub layout: Layout,
    pub blocks: Vec<BlockStat>,
}

impl FuncStat {
    pub fn new(name: impl Into<String>, loc: SourceLoc) -> Self {
        Self {
            name: name.into(),
            file: loc.file,
            at: loc.line,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: BlockStat) -> Self {
        self.blocks.push(block);
        self
    }

    #[must_use]
    pub fn loc(&self) -> SourceLoc {
        SourceLoc::new(self.file.clone(), self.at)
    }

    /// Sum over all non-skipped blocks.
    #[must_use]
    pub fn total(&self) -> LineStat {
        let mut total = LineStat::default();
        for block in self.blocks.iter().filter(|b| !b.skip) {
            total += block.total();
        }
        total
    }
}
