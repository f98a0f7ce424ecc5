//! Instruction costs from compiler assembly output.
//!
//! Reads the `.s` listing the compiler produced for a module and, for every
//! function, classifies each instruction with a cost table. Costs are kept
//! both per labelled block and per source line (from `.loc` directives), so
//! the result can be merged into either bbinfo layout.

mod func;
mod line;
mod parser;

pub use func::*;
pub use line::*;
pub use parser::*;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Assembly parsing errors. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum AsmError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("function `{name}` has no end marker")]
    UnterminatedFunction { name: String },
    #[error("line {line}: function `{name}` begins inside another function")]
    NestedFunction { line: usize, name: String },
}

pub type Result<T> = std::result::Result<T, AsmError>;
