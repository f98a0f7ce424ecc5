//! Command implementations.

use std::path::Path;

use inststat::{CostCatalog, RunSummary, StatOptions};

use crate::cli::{Cli, EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Run the requested action and return the process exit code.
pub fn run_command(cli: &Cli) -> i32 {
    if cli.list_cpus {
        return list_cpus();
    }
    match &cli.module {
        Some(module) => stat(module, &cli.stat_options(), cli.silent),
        None => EXIT_FAILURE,
    }
}

fn list_cpus() -> i32 {
    let catalog = match CostCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(err) => {
            terminal::error(&format!("cost tables: {err}"));
            return EXIT_FAILURE;
        }
    };

    let default = catalog.default_table().name();
    for name in catalog.names() {
        if name == default {
            println!("{name} (default)");
        } else {
            println!("{name}");
        }
    }
    EXIT_SUCCESS
}

fn stat(module: &Path, options: &StatOptions, silent: bool) -> i32 {
    match inststat::run(module, options) {
        Ok(summary) => {
            if !silent {
                report(&summary);
            }
            EXIT_SUCCESS
        }
        Err(err) => {
            let stage = err.stage();
            terminal::error(&format!("{stage} failed: {err}"));
            stage.exit_code()
        }
    }
}

fn report(summary: &RunSummary) {
    let report = &summary.report;
    if report.functions_unmatched > 0 {
        terminal::warning(&format!(
            "{} function(s) had no assembly",
            report.functions_unmatched
        ));
    }
    if report.blocks_unresolved > 0 {
        terminal::warning(&format!(
            "{} block(s) left without costs",
            report.blocks_unresolved
        ));
    }
    terminal::success(&format!(
        "{} function(s), {} instruction(s), {} cycle(s)",
        summary.functions.len(),
        summary.total.instructions(),
        summary.total.cycles
    ));
    terminal::path_output(&summary.paths.output);
}
