//! End-to-end runs over on-disk fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use inststat::{LineStat, Stage, StatOptions, run};
use tempfile::TempDir;

const BBINFO: &str = "\
func: foo
 at: a.c:10
 block: entry
  10:
  11:
 block: lpad
  13:
";

const LISTING: &str = "\
\t.text
\t.file\t\"a.c\"
\t.globl\tfoo                             // -- Begin function foo
\t.p2align\t2
\t.type\tfoo,@function
foo:                                    // @foo
.Lfunc_begin0:
\t.loc\t1 10 0                          // a.c:10:0
\t.cfi_startproc
// %bb.0:                               // %entry
\t.loc\t1 10 3 prologue_end             // a.c:10:3
\tadd\tw0, w0, #1
\t.loc\t1 11 3                          // a.c:11:3
\tldr\tw1, [x0]
\t.loc\t1 12 1                          // a.c:12:1
\tret
.Lfunc_end0:
\t.size\tfoo, .Lfunc_end0-foo
\t.cfi_endproc
                                        // -- End function
";

fn fixture(bbinfo: Option<&str>, asm: Option<&str>) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let module = dir.path().join("foo.ll");
    if let Some(text) = bbinfo {
        fs::write(dir.path().join("foo.ll.bbinfo.txt"), text).unwrap();
    }
    if let Some(text) = asm {
        fs::write(dir.path().join("foo.ll.s"), text).unwrap();
    }
    (dir, module)
}

fn output_of(module: &Path) -> PathBuf {
    let mut name = module.as_os_str().to_owned();
    name.push(".inststat.txt");
    PathBuf::from(name)
}

fn a57() -> StatOptions {
    StatOptions::new().with_cpu("cortex-a57")
}

#[test]
fn test_line_costs_written() {
    let (_dir, module) = fixture(Some(BBINFO), Some(LISTING));
    let summary = run(&module, &a57()).unwrap();

    let output = fs::read_to_string(output_of(&module)).unwrap();
    assert_eq!(
        output,
        "func: foo\n at: a.c:10\n block: entry\n  10: 0, 0, 0, 1, 0, 0, 1\n  11: 0, 1, 0, 0, 0, 0, 4\n"
    );

    assert_eq!(summary.paths.output, output_of(&module));
    assert_eq!(summary.report.functions_matched, 1);
    assert_eq!(summary.report.blocks_skipped, 1);
    assert_eq!(summary.total, LineStat::new([0, 1, 0, 1, 0, 0], 5));
}

#[test]
fn test_output_reloads() {
    let (_dir, module) = fixture(Some(BBINFO), Some(LISTING));
    run(&module, &a57()).unwrap();

    let funcs = inststat_ir::load(&output_of(&module)).unwrap();
    assert_eq!(funcs.len(), 1);
    assert_eq!(funcs[0].blocks.len(), 1);
    assert_eq!(funcs[0].blocks[0].lines[&11].cycles, 4);
}

#[test]
fn test_missing_bbinfo_writes_nothing() {
    let (_dir, module) = fixture(None, Some(LISTING));
    let err = run(&module, &a57()).unwrap_err();

    assert_eq!(err.stage(), Stage::Load);
    assert_eq!(err.stage().exit_code(), 1);
    assert!(!output_of(&module).exists());
}

#[test]
fn test_failed_parse_keeps_previous_output() {
    let (_dir, module) = fixture(Some(BBINFO), Some("// -- Begin function foo\n\tnop\n"));
    fs::write(output_of(&module), "previous\n").unwrap();

    let err = run(&module, &a57()).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert_eq!(fs::read_to_string(output_of(&module)).unwrap(), "previous\n");
}

#[test]
fn test_extra_skip_prefix() {
    let (_dir, module) = fixture(Some(BBINFO), Some(LISTING));
    let summary = run(&module, &a57().with_skip_prefix("entry")).unwrap();

    assert_eq!(summary.report.blocks_skipped, 2);
    let output = fs::read_to_string(output_of(&module)).unwrap();
    assert_eq!(output, "func: foo\n at: a.c:10\n");

    let reloaded = inststat_ir::load(&output_of(&module)).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded[0].blocks.is_empty());
}

#[test]
fn test_output_dir() {
    let (dir, module) = fixture(Some(BBINFO), Some(LISTING));
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let summary = run(&module, &a57().with_output_dir(&out)).unwrap();
    assert_eq!(summary.paths.output, out.join("foo.ll.inststat.txt"));
    assert!(summary.paths.output.exists());
    assert!(!output_of(&module).exists());
}

#[test]
fn test_unmatched_function_still_written() {
    let bbinfo = format!("{BBINFO}func: bar\n at: a.c:20\n block: entry\n  20:\n");
    let (_dir, module) = fixture(Some(&bbinfo), Some(LISTING));
    let summary = run(&module, &a57()).unwrap();

    assert_eq!(summary.report.functions_unmatched, 1);
    let output = fs::read_to_string(output_of(&module)).unwrap();
    assert!(output.ends_with("func: bar\n at: a.c:20\n block: entry\n"));
}
