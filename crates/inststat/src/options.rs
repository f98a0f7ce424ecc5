//! Run configuration and file naming.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use inststat_asm::ParseOptions;

use crate::{DEFAULT_SKIP_PREFIXES, MergeOptions};

/// Suffix of the basic-block description read for a module.
pub const BBINFO_SUFFIX: &str = ".bbinfo.txt";
/// Suffix of the statistics written for a module.
pub const INSTSTAT_SUFFIX: &str = ".inststat.txt";
/// Default suffix of the assembly listing.
pub const DEFAULT_ASM_SUFFIX: &str = ".s";

/// Options for [`crate::run`].
#[derive(Clone, Debug)]
pub struct StatOptions {
    /// Appended to the module name to locate the assembly listing.
    pub asm_suffix: String,
    /// CPU profile overriding any `.cpu` directive.
    pub cpu: Option<String>,
    /// Block-name prefixes excluded from the output.
    pub skip_prefixes: Vec<String>,
    /// Where to write the output (next to the inputs if unset).
    pub output_dir: Option<PathBuf>,
}

impl Default for StatOptions {
    fn default() -> Self {
        Self {
            asm_suffix: DEFAULT_ASM_SUFFIX.to_string(),
            cpu: None,
            skip_prefixes: DEFAULT_SKIP_PREFIXES.iter().map(ToString::to_string).collect(),
            output_dir: None,
        }
    }
}

impl StatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_asm_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.asm_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    /// Exclude blocks starting with `prefix`, in addition to the defaults.
    #[must_use]
    pub fn with_skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new();
        match &self.cpu {
            Some(cpu) => options.with_cpu(cpu.clone()),
            None => options,
        }
    }

    #[must_use]
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions::new().with_skip_prefixes(self.skip_prefixes.iter().cloned())
    }
}

/// Input and output paths derived from a module name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePaths {
    pub bbinfo: PathBuf,
    pub asm: PathBuf,
    pub output: PathBuf,
}

impl ModulePaths {
    #[must_use]
    pub fn new(module: &Path, options: &StatOptions) -> Self {
        let output = match (&options.output_dir, module.file_name()) {
            (Some(dir), Some(name)) => dir.join(with_suffix(Path::new(name), INSTSTAT_SUFFIX)),
            _ => with_suffix(module, INSTSTAT_SUFFIX),
        };
        Self {
            bbinfo: with_suffix(module, BBINFO_SUFFIX),
            asm: with_suffix(module, &options.asm_suffix),
            output,
        }
    }
}

/// Append `suffix` to the whole path (not as an extension).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
