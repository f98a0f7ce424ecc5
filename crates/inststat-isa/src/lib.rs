//! Instruction cost tables for statically estimating execution cost.
//!
//! A [`CostTable`] maps assembly mnemonics to an instruction [`Category`] and a
//! cycle cost for one CPU microarchitecture. Tables are plain data
//! ([`RuleSpec`] slices under `profiles/`) compiled into anchored,
//! case-insensitive patterns grouped by the mnemonic's first letter.
//! A [`CostCatalog`] holds the known tables and resolves a CPU name to one of
//! them, falling back to a default profile.

mod catalog;
pub mod profiles;
mod table;
mod types;

pub use catalog::*;
pub use table::*;
pub use types::*;

use thiserror::Error;

/// Cost table construction errors.
#[derive(Error, Debug)]
pub enum IsaError {
    #[error("invalid mnemonic pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("mnemonic pattern `{0}` does not start with a letter or digit")]
    UnkeyedPattern(String),
    #[error("duplicate CPU profile `{0}`")]
    DuplicateProfile(String),
    #[error("unknown CPU profile `{0}`")]
    UnknownProfile(String),
    #[error("cost catalog has no profiles")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, IsaError>;
