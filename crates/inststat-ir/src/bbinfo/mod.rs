//! bbinfo loader.
//!
//! The bbinfo file lists every function of a module with its basic blocks:
//!
//! ```text
//! func: main
//!  at: main.c:3
//!  block: entry
//!   size: 4
//!   from: main.c:3
//!   to: main.c:5
//! ```
//!
//! or, in line layout, one `  <line>:` entry per source line of each block.
//! Parsing is a small state machine over [`LineKind`] tokens; the first blank
//! line ends the input.

mod token;

pub use token::*;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{BlockStat, FuncStat, Layout, LoadError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Func,
    FuncAt,
    Block,
    BlockSize,
    BlockFrom,
    BlockTo,
    BlockStat,
    BlockLines,
}

impl State {
    const fn expected(self) -> &'static str {
        match self {
            Self::Idle => "`func:`",
            Self::Func => "` at:`",
            Self::FuncAt => "` block:` or `func:`",
            Self::Block => "`  size:`, a line entry, ` block:` or `func:`",
            Self::BlockSize => "`  from:`",
            Self::BlockFrom => "`  to:`",
            Self::BlockTo => "`  stat:`, ` block:` or `func:`",
            Self::BlockStat => "` block:` or `func:`",
            Self::BlockLines => "a line entry, ` block:` or `func:`",
        }
    }

    /// Whether the input may end here.
    const fn is_complete(self) -> bool {
        matches!(
            self,
            Self::Idle
                | Self::FuncAt
                | Self::Block
                | Self::BlockTo
                | Self::BlockStat
                | Self::BlockLines
        )
    }

    fn next(self, kind: &LineKind<'_>) -> Option<Self> {
        let closed = matches!(
            self,
            Self::Block | Self::BlockTo | Self::BlockStat | Self::BlockLines
        );
        match kind {
            // A function may have no blocks left once excluded ones are dropped.
            LineKind::Func(_) if closed || matches!(self, Self::Idle | Self::FuncAt) => {
                Some(Self::Func)
            }
            LineKind::Block(_) if closed || self == Self::FuncAt => Some(Self::Block),
            LineKind::At(_) if self == Self::Func => Some(Self::FuncAt),
            LineKind::Size(_) if self == Self::Block => Some(Self::BlockSize),
            LineKind::From(_) if self == Self::BlockSize => Some(Self::BlockFrom),
            LineKind::To(_) if self == Self::BlockFrom => Some(Self::BlockTo),
            LineKind::Stat(_) if self == Self::BlockTo => Some(Self::BlockStat),
            LineKind::Entry { .. } if matches!(self, Self::Block | Self::BlockLines) => {
                Some(Self::BlockLines)
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Loader {
    state: State,
    funcs: Vec<FuncStat>,
    /// Layout of the current function once a block has shown its shape.
    layout: Option<Layout>,
}

impl Loader {
    const fn new() -> Self {
        Self {
            state: State::Idle,
            funcs: Vec::new(),
            layout: None,
        }
    }

    fn feed(&mut self, line: usize, text: &str, kind: LineKind<'_>) -> Result<()> {
        let next = self.state.next(&kind).ok_or_else(|| LoadError::Syntax {
            line,
            expected: self.state.expected(),
            found: text.to_string(),
        })?;

        match kind {
            LineKind::Func(name) => {
                self.layout = None;
                self.funcs.push(FuncStat {
                    name: name.to_string(),
                    ..FuncStat::default()
                });
            }
            LineKind::At(loc) => {
                if let Some(func) = self.funcs.last_mut() {
                    func.file = loc.file;
                    func.at = loc.line;
                }
            }
            LineKind::Block(name) => {
                if let Some(func) = self.funcs.last_mut() {
                    func.blocks.push(BlockStat::new(name));
                }
            }
            LineKind::Size(size) => {
                self.set_layout(line, Layout::Block)?;
                if let Some(block) = self.block_mut() {
                    block.size = Some(size);
                }
            }
            LineKind::From(loc) => {
                if let Some(block) = self.block_mut() {
                    block.from = Some(loc);
                }
            }
            LineKind::To(loc) => {
                if let Some(block) = self.block_mut() {
                    block.to = Some(loc);
                }
            }
            LineKind::Stat(stat) => {
                if let Some(block) = self.block_mut() {
                    block.stat += stat;
                }
            }
            LineKind::Entry { line: src, stat } => {
                self.set_layout(line, Layout::Line)?;
                if let Some(block) = self.block_mut() {
                    *block.lines.entry(src).or_default() += stat.unwrap_or_default();
                }
            }
            LineKind::Blank | LineKind::Unknown => {}
        }

        self.state = next;
        Ok(())
    }

    fn block_mut(&mut self) -> Option<&mut BlockStat> {
        self.funcs.last_mut()?.blocks.last_mut()
    }

    fn set_layout(&mut self, line: usize, layout: Layout) -> Result<()> {
        match self.layout {
            Some(current) if current != layout => {
                let block = self.block_mut().map(|b| b.name.clone()).unwrap_or_default();
                Err(LoadError::LayoutMismatch { line, block })
            }
            Some(_) => Ok(()),
            None => {
                self.layout = Some(layout);
                if let Some(func) = self.funcs.last_mut() {
                    func.layout = layout;
                }
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<Vec<FuncStat>> {
        if !self.state.is_complete() {
            return Err(LoadError::UnexpectedEnd {
                expected: self.state.expected(),
            });
        }
        Ok(self.funcs)
    }
}

/// Parse bbinfo text. Everything after the first blank line is ignored.
///
/// # Errors
///
/// Returns an error on any format violation, with the 1-based line number.
pub fn parse_str(input: &str) -> Result<Vec<FuncStat>> {
    let mut loader = Loader::new();
    for (idx, text) in input.lines().enumerate() {
        let line = idx + 1;
        let kind = LineKind::parse(text).map_err(|InvalidPayload(bad)| LoadError::InvalidNumber {
            line,
            text: bad.to_string(),
        })?;
        if kind == LineKind::Blank {
            break;
        }
        loader.feed(line, text, kind)?;
    }
    loader.finish()
}

/// Load a bbinfo file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load(path: &Path) -> Result<Vec<FuncStat>> {
    let input = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let funcs = parse_str(&input)?;
    debug!(
        path = %path.display(),
        functions = funcs.len(),
        blocks = funcs.iter().map(|f| f.blocks.len()).sum::<usize>(),
        "loaded bbinfo"
    );
    Ok(funcs)
}
