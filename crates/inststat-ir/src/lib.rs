//! Basic-block statistics.
//!
//! [`FuncStat`]/[`BlockStat`] describe the functions of a module as the
//! compiler's IR sees them: named basic blocks with source ranges or per-line
//! entries. [`load`] reads them from a bbinfo file, the matcher fills in
//! [`LineStat`] costs, and [`save`] writes the result.

mod bbinfo;
mod func;
mod stat;
mod writer;

pub use bbinfo::*;
pub use func::*;
pub use stat::*;
pub use writer::*;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// bbinfo loading errors. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected {expected}, found `{found}`")]
    Syntax {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("line {line}: invalid number or location `{text}`")]
    InvalidNumber { line: usize, text: String },
    #[error("line {line}: block `{block}` mixes block and line statistics")]
    LayoutMismatch { line: usize, block: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
}

/// inststat writing errors.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
