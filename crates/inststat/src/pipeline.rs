//! Load, parse, merge, save.

use std::path::Path;

use inststat_asm::AsmFunc;
use inststat_ir::{FuncStat, LineStat};
use inststat_isa::CostCatalog;
use tracing::{debug, info};

use crate::{MergeReport, ModulePaths, Result, StatOptions, merge, metrics};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub paths: ModulePaths,
    pub report: MergeReport,
    /// Functions as written to the output.
    pub functions: Vec<FuncStat>,
    /// Sum over all emitted blocks.
    pub total: LineStat,
}

/// Produce `<module>.inststat.txt` from `<module>.bbinfo.txt` and the
/// module's assembly listing, using the built-in cost tables.
///
/// # Errors
///
/// Returns the first failing stage's error. Nothing is written unless every
/// earlier stage succeeded.
pub fn run(module: &Path, options: &StatOptions) -> Result<RunSummary> {
    let catalog = CostCatalog::builtin()?;
    run_with_catalog(module, &catalog, options)
}

/// Like [`run`], with caller-provided cost tables.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_catalog(
    module: &Path,
    catalog: &CostCatalog,
    options: &StatOptions,
) -> Result<RunSummary> {
    let paths = ModulePaths::new(module, options);

    info!(path = %paths.bbinfo.display(), "loading bbinfo");
    let mut functions = inststat_ir::load(&paths.bbinfo)?;

    info!(path = %paths.asm.display(), "parsing assembly");
    let asm: Vec<AsmFunc> = inststat_asm::parse(&paths.asm, catalog, &options.parse_options())?;

    let report = merge(&mut functions, &asm, &options.merge_options())?;
    info!(
        matched = report.functions_matched,
        unmatched = report.functions_unmatched,
        fallback = report.blocks_fallback,
        unresolved = report.blocks_unresolved,
        "merged"
    );

    let total = functions.iter().fold(LineStat::default(), |mut acc, func| {
        acc += func.total();
        acc
    });
    metrics::record_run(&module.display().to_string(), &report, &total);

    inststat_ir::save(&functions, &paths.output)?;
    info!(path = %paths.output.display(), cycles = total.cycles, "wrote statistics");
    debug!(functions = functions.len(), "run complete");

    Ok(RunSummary {
        paths,
        report,
        functions,
        total,
    })
}
