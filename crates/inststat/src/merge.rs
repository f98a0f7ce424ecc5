//! Reconciling IR blocks with assembly costs.
//!
//! Functions are paired by name and declaration line. Block-layout functions
//! take costs from assembly blocks of the same name whose source interval lies
//! inside the IR block's interval. Line-layout functions take costs line by
//! line; each assembly line is handed out at most once.

use std::collections::BTreeMap;

use inststat_asm::AsmFunc;
use inststat_ir::{FuncStat, Layout, LineRange, LineStat, RangeRelation};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Block-name prefixes of exception-handling and cleanup paths.
pub const DEFAULT_SKIP_PREFIXES: &[&str] = &["lpad", "ehcleanup", "eh.", "terminate.", "cleanup"];

/// Matcher configuration.
#[derive(Clone, Debug)]
pub struct MergeOptions {
    /// Blocks whose name starts with one of these are never emitted.
    pub skip_prefixes: Vec<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            skip_prefixes: DEFAULT_SKIP_PREFIXES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl MergeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skip prefix to the defaults.
    #[must_use]
    pub fn with_skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    /// Replace the skip prefixes.
    #[must_use]
    pub fn with_skip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_skipped(&self, block: &str) -> bool {
        self.skip_prefixes.iter().any(|p| block.starts_with(p.as_str()))
    }
}

/// What the matcher did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub functions_matched: u64,
    pub functions_unmatched: u64,
    /// Blocks that received costs directly.
    pub blocks_matched: u64,
    /// Line-layout blocks that received costs through the range fallback.
    pub blocks_fallback: u64,
    /// Blocks of matched functions left without costs.
    pub blocks_unresolved: u64,
    pub blocks_skipped: u64,
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("assembly defines function `{name}` at line {at} more than once")]
    DuplicateFunction { name: String, at: u32 },
}

/// Merge assembly costs into `funcs` in place.
///
/// Unmatched functions and unresolvable blocks are reported, not fatal.
///
/// # Errors
///
/// Returns an error if two assembly functions share a name and line.
pub fn merge(
    funcs: &mut [FuncStat],
    asm: &[AsmFunc],
    options: &MergeOptions,
) -> Result<MergeReport, MergeError> {
    let mut index: FxHashMap<(&str, u32), &AsmFunc> = FxHashMap::default();
    for func in asm {
        if index.insert((func.name.as_str(), func.at), func).is_some() {
            return Err(MergeError::DuplicateFunction {
                name: func.name.clone(),
                at: func.at,
            });
        }
    }

    let mut report = MergeReport::default();
    for func in funcs.iter_mut() {
        for block in &mut func.blocks {
            block.skip = options.is_skipped(&block.name);
            if block.skip {
                report.blocks_skipped += 1;
            }
        }

        let Some(asm_func) = index.get(&(func.name.as_str(), func.at)) else {
            warn!(function = %func.name, at = %func.loc(), "no assembly for function");
            report.functions_unmatched += 1;
            continue;
        };

        report.functions_matched += 1;
        match func.layout {
            Layout::Block => merge_blocks(func, asm_func, &mut report),
            Layout::Line => merge_lines(func, asm_func, &mut report),
        }
    }

    debug!(?report, "merged statistics");
    Ok(report)
}

fn merge_blocks(func: &mut FuncStat, asm: &AsmFunc, report: &mut MergeReport) {
    for block in func.blocks.iter_mut().filter(|b| !b.skip) {
        let Some(range) = block.range() else {
            warn!(function = %func.name, block = %block.name, "block has no source range");
            report.blocks_unresolved += 1;
            continue;
        };

        // An exact match takes precedence over contained fragments.
        let mut exact = None;
        let mut contained = None;
        for candidate in asm.blocks.iter().filter(|b| b.name == block.name) {
            let Some(inner) = candidate.range else {
                warn!(
                    function = %func.name,
                    block = %block.name,
                    "assembly block has no source range"
                );
                continue;
            };
            match range.relation(&inner) {
                RangeRelation::Equal => {
                    exact.get_or_insert(candidate.stat);
                }
                RangeRelation::Contains => {
                    *contained.get_or_insert_with(LineStat::default) += candidate.stat;
                }
                RangeRelation::Other => warn!(
                    function = %func.name,
                    block = %block.name,
                    ir = %range,
                    asm = %inner,
                    "assembly block range crosses IR block range"
                ),
            }
        }

        match (exact, contained) {
            (Some(stat), _) => {
                block.stat = stat;
                report.blocks_matched += 1;
            }
            (None, Some(sum)) => {
                block.stat += sum;
                report.blocks_matched += 1;
            }
            (None, None) => report.blocks_unresolved += 1,
        }
    }
}

fn merge_lines(func: &mut FuncStat, asm: &AsmFunc, report: &mut MergeReport) {
    let mut lines = asm.lines.clone();

    let mut starved = Vec::new();
    for (idx, block) in func.blocks.iter_mut().enumerate() {
        if block.skip {
            continue;
        }
        let mut hit = false;
        for (line, stat) in block.lines.range_mut(1..) {
            if let Some(taken) = lines.get_mut(line).and_then(LineStat::take) {
                *stat += taken;
                hit = true;
            }
        }
        if hit {
            report.blocks_matched += 1;
        } else {
            starved.push(idx);
        }
    }

    let ranges: Vec<Option<LineRange>> = func
        .blocks
        .iter()
        .map(|b| if b.skip { None } else { b.range() })
        .collect();

    for idx in starved {
        let block = &mut func.blocks[idx];
        let (Some(range), Some(first)) = (ranges[idx], block.first_line()) else {
            debug!(function = %func.name, block = %block.name, "block has no source lines");
            report.blocks_unresolved += 1;
            continue;
        };

        let found = consume_range(&mut lines, range).or_else(|| {
            let enclosing = ranges
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != idx)
                .filter_map(|(_, r)| *r)
                .filter(|r| r.strictly_contains(&range))
                .min_by_key(LineRange::span)?;
            consume_range(&mut lines, enclosing)
        });

        if let Some(sum) = found {
            debug!(
                function = %func.name,
                block = %block.name,
                line = first,
                cycles = sum.cycles,
                "attributed costs by range"
            );
            *block.lines.entry(first).or_default() += sum;
            report.blocks_fallback += 1;
        } else {
            debug!(function = %func.name, block = %block.name, "no assembly costs for block");
            report.blocks_unresolved += 1;
        }
    }
}

/// Take every unconsumed line inside `range`.
fn consume_range(lines: &mut BTreeMap<u32, LineStat>, range: LineRange) -> Option<LineStat> {
    let mut sum = LineStat::default();
    for (_, stat) in lines.range_mut(range.begin..=range.end) {
        if let Some(taken) = stat.take() {
            sum += taken;
        }
    }
    (!sum.is_empty()).then_some(sum)
}
