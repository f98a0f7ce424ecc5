//! CLI definitions.

use std::path::PathBuf;

use clap::Parser;
use inststat::StatOptions;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failures outside the pipeline stages.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "inststat")]
#[command(about = "Estimate per-line instruction costs from bbinfo and assembly listings")]
#[command(version)]
pub struct Cli {
    /// Module base name; reads <MODULE>.bbinfo.txt and <MODULE><ASM_SUFFIX>
    #[arg(value_name = "MODULE", required_unless_present = "list_cpus")]
    pub module: Option<PathBuf>,

    /// Suffix appended to MODULE to find the assembly listing
    #[arg(long, default_value = inststat::DEFAULT_ASM_SUFFIX)]
    pub asm_suffix: String,

    /// CPU cost profile, overriding the listing's .cpu directive
    #[arg(long, value_name = "NAME")]
    pub cpu: Option<String>,

    /// Also exclude blocks whose name starts with PREFIX (repeatable)
    #[arg(long = "skip-prefix", value_name = "PREFIX")]
    pub skip_prefixes: Vec<String>,

    /// Write <MODULE>.inststat.txt into DIR instead of next to the inputs
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// List the built-in CPU profiles and exit
    #[arg(long)]
    pub list_cpus: bool,

    /// Show metrics summary after execution
    #[arg(long)]
    pub metrics: bool,

    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub silent: bool,
}

impl Cli {
    pub fn stat_options(&self) -> StatOptions {
        let mut options = StatOptions::new().with_asm_suffix(self.asm_suffix.as_str());
        if let Some(cpu) = &self.cpu {
            options = options.with_cpu(cpu.as_str());
        }
        if let Some(dir) = &self.output_dir {
            options = options.with_output_dir(dir.as_path());
        }
        self.skip_prefixes
            .iter()
            .fold(options, |options, prefix| options.with_skip_prefix(prefix.as_str()))
    }

    pub const fn log_directive(&self) -> &'static str {
        if self.verbose {
            "inststat=debug"
        } else if self.silent {
            "inststat=error"
        } else {
            "inststat=info"
        }
    }
}
