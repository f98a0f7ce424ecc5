//! inststat - static instruction cost statistics
//!
//! Combines the basic-block description the compiler wrote for a module
//! (`<module>.bbinfo.txt`) with the module's assembly listing and writes
//! per-block or per-line instruction counts and estimated cycles to
//! `<module>.inststat.txt`.
//!
//! # Example
//!
//! ```ignore
//! use inststat::{StatOptions, run};
//!
//! let summary = run(Path::new("build/foo.ll"), &StatOptions::new().with_cpu("cortex-a57"))?;
//! println!("{} cycles", summary.total.cycles);
//! ```

// Re-export from sub-crates
pub use inststat_asm::{AsmBlock, AsmError, AsmFunc, ParseOptions};
pub use inststat_ir::{
    BlockStat, FuncStat, Layout, LineRange, LineStat, LoadError, SaveError, SourceLoc,
};
pub use inststat_isa::{
    Category, Classification, CostCatalog, CostTable, IsaError, RuleSpec, profiles,
};

mod error;
mod merge;
pub mod metrics;
mod options;
mod pipeline;

pub use error::*;
pub use merge::*;
pub use options::*;
pub use pipeline::*;
