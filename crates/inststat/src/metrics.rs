//! Run counters on top of metrics-rs.
//!
//! The pipeline records what the matcher did through the `metrics` facade.
//! With no recorder installed the calls are no-ops; the CLI installs
//! [`CliRecorder`] when asked to print a summary.

use std::collections::HashMap;
use std::sync::Arc;

use metrics::{
    Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit, counter,
    describe_counter,
};
use parking_lot::RwLock;

use crate::MergeReport;
use inststat_ir::LineStat;

pub const FUNCTIONS_MATCHED: &str = "inststat_functions_matched_total";
pub const FUNCTIONS_UNMATCHED: &str = "inststat_functions_unmatched_total";
pub const BLOCKS_MATCHED: &str = "inststat_blocks_matched_total";
pub const BLOCKS_FALLBACK: &str = "inststat_blocks_fallback_total";
pub const BLOCKS_UNRESOLVED: &str = "inststat_blocks_unresolved_total";
pub const BLOCKS_SKIPPED: &str = "inststat_blocks_skipped_total";
pub const INSTRUCTIONS: &str = "inststat_instructions_total";
pub const CYCLES: &str = "inststat_cycles_total";

/// Register metric descriptions. Call once after installing a recorder.
pub fn init() {
    describe_counter!(FUNCTIONS_MATCHED, Unit::Count, "IR functions paired with assembly");
    describe_counter!(FUNCTIONS_UNMATCHED, Unit::Count, "IR functions with no assembly");
    describe_counter!(BLOCKS_MATCHED, Unit::Count, "Blocks given costs directly");
    describe_counter!(
        BLOCKS_FALLBACK,
        Unit::Count,
        "Line-layout blocks given costs through the range fallback"
    );
    describe_counter!(BLOCKS_UNRESOLVED, Unit::Count, "Blocks left without costs");
    describe_counter!(BLOCKS_SKIPPED, Unit::Count, "Blocks excluded by name prefix");
    describe_counter!(INSTRUCTIONS, Unit::Count, "Counted instructions written");
    describe_counter!(CYCLES, Unit::Count, "Estimated cycles written");
}

/// Record the outcome of one module run.
pub fn record_run(module: &str, report: &MergeReport, total: &LineStat) {
    let labels = [("module", module.to_string())];

    counter!(FUNCTIONS_MATCHED, &labels).increment(report.functions_matched);
    counter!(FUNCTIONS_UNMATCHED, &labels).increment(report.functions_unmatched);
    counter!(BLOCKS_MATCHED, &labels).increment(report.blocks_matched);
    counter!(BLOCKS_FALLBACK, &labels).increment(report.blocks_fallback);
    counter!(BLOCKS_UNRESOLVED, &labels).increment(report.blocks_unresolved);
    counter!(BLOCKS_SKIPPED, &labels).increment(report.blocks_skipped);
    counter!(INSTRUCTIONS, &labels).increment(total.instructions());
    counter!(CYCLES, &labels).increment(total.cycles);
}

#[derive(Default)]
struct CounterStorage {
    values: RwLock<HashMap<String, u64>>,
}

struct CliCounter {
    key: String,
    storage: Arc<CounterStorage>,
}

impl metrics::CounterFn for CliCounter {
    fn increment(&self, value: u64) {
        let mut values = self.storage.values.write();
        *values.entry(self.key.clone()).or_insert(0) += value;
    }

    fn absolute(&self, value: u64) {
        self.storage.values.write().insert(self.key.clone(), value);
    }
}

/// In-memory recorder printed at the end of a CLI run.
///
/// Only counters are kept; the pipeline records nothing else.
#[derive(Default)]
pub struct CliRecorder {
    counters: Arc<CounterStorage>,
}

impl CliRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle reading this recorder's values.
    #[must_use]
    pub fn handle(&self) -> CliRecorderHandle {
        CliRecorderHandle {
            counters: Arc::clone(&self.counters),
        }
    }

    /// Install as the global recorder. Returns `None` if one is already set.
    #[must_use]
    pub fn install(self) -> Option<CliRecorderHandle> {
        let handle = self.handle();
        metrics::set_global_recorder(self).ok()?;
        Some(handle)
    }
}

fn key_to_string(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|l| format!("{}={}", l.key(), l.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for CliRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(CliCounter {
            key: key_to_string(key),
            storage: Arc::clone(&self.counters),
        }))
    }

    fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

/// Read access to the values of a [`CliRecorder`].
pub struct CliRecorderHandle {
    counters: Arc<CounterStorage>,
}

impl CliRecorderHandle {
    #[must_use]
    pub fn get_counter(&self, key: &str) -> Option<u64> {
        self.counters.values.read().get(key).copied()
    }

    #[must_use]
    pub fn all_counters(&self) -> HashMap<String, u64> {
        self.counters.values.read().clone()
    }

    /// Print collected counters to stdout.
    pub fn print_summary(&self) {
        let counters = self.counters.values.read();
        if counters.is_empty() {
            println!("No metrics collected.");
            return;
        }

        println!();
        println!("## Metrics Summary");
        println!();
        println!("### Counters");
        let mut keys: Vec<_> = counters.keys().collect();
        keys.sort();
        for key in keys {
            println!("  {key}: {}", counters[key]);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::Label;

    #[test]
    fn test_key_to_string() {
        let key = Key::from_name("blocks");
        assert_eq!(key_to_string(&key), "blocks");

        let key = Key::from_parts(
            "blocks",
            vec![Label::new("module", "foo.ll"), Label::new("layout", "line")],
        );
        assert_eq!(key_to_string(&key), "blocks{module=foo.ll,layout=line}");
    }

    #[test]
    fn test_cli_counter_storage() {
        let recorder = CliRecorder::new();
        let counter = CliCounter {
            key: "c".to_string(),
            storage: Arc::clone(&recorder.counters),
        };
        metrics::CounterFn::increment(&counter, 5);
        metrics::CounterFn::increment(&counter, 2);
        assert_eq!(recorder.handle().get_counter("c"), Some(7));
        metrics::CounterFn::absolute(&counter, 1);
        assert_eq!(recorder.handle().get_counter("c"), Some(1));
    }

    #[test]
    fn test_record_run() {
        let recorder = CliRecorder::new();
        let handle = recorder.handle();
        let report = MergeReport {
            functions_matched: 2,
            blocks_fallback: 1,
            ..MergeReport::default()
        };
        let total = LineStat::new([1, 1, 0, 0, 0, 0], 5);

        metrics::with_local_recorder(&recorder, || record_run("m", &report, &total));

        assert_eq!(handle.get_counter("inststat_functions_matched_total{module=m}"), Some(2));
        assert_eq!(handle.get_counter("inststat_blocks_fallback_total{module=m}"), Some(1));
        assert_eq!(handle.get_counter("inststat_instructions_total{module=m}"), Some(2));
        assert_eq!(handle.get_counter("inststat_cycles_total{module=m}"), Some(5));
        assert_eq!(handle.all_counters().len(), 8);
    }
}
