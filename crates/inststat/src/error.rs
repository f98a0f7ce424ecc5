use std::fmt;

use thiserror::Error;

use crate::MergeError;

/// Pipeline errors, one variant per failing stage.
#[derive(Error, Debug)]
pub enum Error {
    #[error("bbinfo error: {0}")]
    Load(#[from] inststat_ir::LoadError),
    #[error("cost table error: {0}")]
    CostTable(#[from] inststat_isa::IsaError),
    #[error("assembly error: {0}")]
    Parse(#[from] inststat_asm::AsmError),
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),
    #[error("output error: {0}")]
    Save(#[from] inststat_ir::SaveError),
}

impl Error {
    /// The stage that failed.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Load(_) => Stage::Load,
            Self::CostTable(_) | Self::Parse(_) => Stage::Parse,
            Self::Merge(_) => Stage::Merge,
            Self::Save(_) => Stage::Save,
        }
    }
}

/// Pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Load,
    Parse,
    Merge,
    Save,
}

impl Stage {
    /// Process exit code for a failure in this stage.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Load => 1,
            Self::Parse => 2,
            Self::Merge => 3,
            Self::Save => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Parse => write!(f, "parse"),
            Self::Merge => write!(f, "merge"),
            Self::Save => write!(f, "save"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
