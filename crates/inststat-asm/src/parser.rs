//! Assembly listing parser.

use std::fs;
use std::path::Path;

use inststat_isa::{CostCatalog, CostTable};
use tracing::debug;

use crate::{AsmBlock, AsmError, AsmFunc, AsmLine, IMPLICIT_ENTRY, Result};

/// Parser configuration.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// CPU profile to use regardless of `.cpu` directives.
    pub cpu: Option<String>,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }
}

/// A function between its begin and end markers.
struct OpenFunc<'c> {
    func: AsmFunc,
    table: &'c CostTable,
    /// Last source line seen in the function's own file.
    row: Option<u32>,
}

impl<'c> OpenFunc<'c> {
    fn new(name: &str, table: &'c CostTable) -> Self {
        Self {
            func: AsmFunc::new(name),
            table,
            row: None,
        }
    }

    /// Apply a `.loc`. Locations in other files or on line 0 leave the
    /// current line unchanged.
    fn locate(&mut self, file: &str, row: u32) {
        if row == 0 {
            return;
        }
        if self.func.file.is_empty() {
            self.func.file = file.to_string();
            self.func.at = row;
        }
        if file != self.func.file {
            return;
        }

        self.row = Some(row);
        if let Some(block) = self.func.blocks.last_mut() {
            block.cover(row);
        }
    }

    fn open_block(&mut self, id: u32, name: Option<&str>) {
        let name = name.map_or_else(|| format!("bb.{id}"), str::to_string);
        self.func.blocks.push(AsmBlock::new(Some(id), name));
    }

    fn record(&mut self, mnemonic: &str) {
        let class = self.table.classify(mnemonic);
        if self.func.blocks.is_empty() {
            self.func.blocks.push(AsmBlock::new(None, IMPLICIT_ENTRY));
        }
        if let Some(block) = self.func.blocks.last_mut() {
            block.stat.record(class);
        }
        if let Some(row) = self.row
            && class.is_counted()
        {
            self.func.lines.entry(row).or_default().record(class);
        }
    }

    fn finish(mut self) -> AsmFunc {
        let at = self.func.at;
        if let Some(entry) = self.func.blocks.first_mut()
            && entry.range.is_none()
            && at > 0
        {
            entry.cover(at);
        }

        debug!(
            function = %self.func.name,
            at = %self.func.loc(),
            blocks = self.func.blocks.len(),
            cycles = self.func.total().cycles,
            "parsed function"
        );
        self.func
    }
}

struct Parser<'c> {
    catalog: &'c CostCatalog,
    table: Option<&'c CostTable>,
    overridden: bool,
    open: Option<OpenFunc<'c>>,
    funcs: Vec<AsmFunc>,
}

impl<'c> Parser<'c> {
    fn new(catalog: &'c CostCatalog, options: &ParseOptions) -> Self {
        let table = options.cpu.as_deref().map(|cpu| catalog.select(cpu));
        Self {
            catalog,
            table,
            overridden: table.is_some(),
            open: None,
            funcs: Vec::new(),
        }
    }

    fn feed(&mut self, line: usize, token: AsmLine<'_>) -> Result<()> {
        match token {
            AsmLine::Cpu(cpu) => self.select_cpu(line, cpu),
            AsmLine::BeginFunction(name) => {
                if self.open.is_some() {
                    return Err(AsmError::NestedFunction {
                        line,
                        name: name.to_string(),
                    });
                }
                let table = match self.table {
                    Some(table) => table,
                    None => {
                        let table = self.catalog.default_table();
                        debug!(cpu = table.name(), "no .cpu directive, using default profile");
                        self.table = Some(table);
                        table
                    }
                };
                self.open = Some(OpenFunc::new(name, table));
            }
            AsmLine::EndFunction => match self.open.take() {
                Some(open) => self.funcs.push(open.finish()),
                None => debug!(line, "end-of-function marker outside a function"),
            },
            AsmLine::Loc { file, line: row } => {
                if let Some(open) = &mut self.open {
                    open.locate(file, row);
                }
            }
            AsmLine::Label { id, name } => {
                if let Some(open) = &mut self.open {
                    open.open_block(id, name);
                }
            }
            AsmLine::Instruction(mnemonic) => {
                if let Some(open) = &mut self.open {
                    open.record(mnemonic);
                }
            }
            AsmLine::Other => {}
        }
        Ok(())
    }

    fn select_cpu(&mut self, line: usize, cpu: &str) {
        if self.overridden {
            debug!(line, cpu, "ignoring .cpu directive, profile set explicitly");
        } else if let Some(table) = self.table {
            debug!(line, cpu, active = table.name(), "ignoring late .cpu directive");
        } else {
            let table = self.catalog.select(cpu);
            debug!(cpu, profile = table.name(), "selected CPU profile");
            self.table = Some(table);
        }
    }

    fn finish(self) -> Result<Vec<AsmFunc>> {
        if let Some(open) = self.open {
            return Err(AsmError::UnterminatedFunction {
                name: open.func.name,
            });
        }
        Ok(self.funcs)
    }
}

/// Parse assembly text.
///
/// # Errors
///
/// Returns an error if a function is left open or nested.
pub fn parse_str(
    input: &str,
    catalog: &CostCatalog,
    options: &ParseOptions,
) -> Result<Vec<AsmFunc>> {
    let mut parser = Parser::new(catalog, options);
    for (idx, text) in input.lines().enumerate() {
        parser.feed(idx + 1, AsmLine::parse(text))?;
    }
    parser.finish()
}

/// Parse an assembly file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_str`] fails.
pub fn parse(path: &Path, catalog: &CostCatalog, options: &ParseOptions) -> Result<Vec<AsmFunc>> {
    let input = fs::read_to_string(path).map_err(|source| AsmError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let funcs = parse_str(&input, catalog, options)?;
    debug!(path = %path.display(), functions = funcs.len(), "parsed assembly");
    Ok(funcs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inststat_ir::{LineRange, LineStat};

    const LISTING: &str = r#"	.text
	.syntax unified
	.eabi_attribute	67, "2.09"
	.cpu	cortex-r52
	.file	"f.c"
	.globl	f                               @ -- Begin function f
	.p2align	2
	.type	f,%function
	.code	32                              @ @f
f:
.Lfunc_begin0:
	.loc	1 10 0                          @ f.c:10:0
	.fnstart
@ %bb.0:                                @ %entry
	.loc	1 10 3 prologue_end             @ f.c:10:3
	add	r0, r0, #1
	.loc	1 11 3                          @ f.c:11:3
	ldr	r1, [r0]
.LBB0_1:                                @ %if.then
	.loc	1 12 5                          @ f.c:12:5
	bx	lr
.Lfunc_end0:
	.size	f, .Lfunc_end0-f
	.fnend
                                        @ -- End function
"#;

    fn catalog() -> CostCatalog {
        CostCatalog::builtin().unwrap()
    }

    fn parse_listing(input: &str) -> Vec<AsmFunc> {
        parse_str(input, &catalog(), &ParseOptions::new()).unwrap()
    }

    #[test]
    fn test_parse_function() {
        let funcs = parse_listing(LISTING);
        assert_eq!(funcs.len(), 1);

        let f = &funcs[0];
        assert_eq!(f.name, "f");
        assert_eq!(f.file, "f.c");
        assert_eq!(f.at, 10);
        assert_eq!(f.blocks.len(), 2);

        let entry = &f.blocks[0];
        assert_eq!(entry.id, Some(0));
        assert_eq!(entry.name, "entry");
        assert_eq!(entry.range, Some(LineRange::new(10, 11)));
        assert_eq!(entry.stat, LineStat::new([0, 1, 0, 1, 0, 0], 3));

        let then = &f.blocks[1];
        assert_eq!(then.name, "if.then");
        assert_eq!(then.range, Some(LineRange::point(12)));
        assert_eq!(then.stat, LineStat::new([1, 0, 0, 0, 0, 0], 1));

        assert_eq!(f.lines[&10], LineStat::new([0, 0, 0, 1, 0, 0], 1));
        assert_eq!(f.lines[&11], LineStat::new([0, 1, 0, 0, 0, 0], 2));
        assert_eq!(f.lines[&12], LineStat::new([1, 0, 0, 0, 0, 0], 1));
    }

    #[test]
    fn test_explicit_cpu_wins() {
        let options = ParseOptions::new().with_cpu("cortex-a57");
        let funcs = parse_str(LISTING, &catalog(), &options).unwrap();
        assert_eq!(funcs[0].lines[&11], LineStat::new([0, 1, 0, 0, 0, 0], 4));
    }

    #[test]
    fn test_unknown_cpu_uses_default() {
        let listing = LISTING.replace("cortex-r52", "cortex-m0");
        let funcs = parse_listing(&listing);
        assert_eq!(funcs[0].lines[&11].cycles, 2);
    }

    #[test]
    fn test_late_cpu_directive_ignored() {
        let listing = format!(
            "{LISTING}\t.cpu\tcortex-a57\n@ -- Begin function g\n\t.loc\t1 20 0 @ f.c:20:0\n\tldr\tr0, [r0]\n@ -- End function\n"
        );
        let funcs = parse_listing(&listing);
        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs[1].lines[&20].cycles, 2);
    }

    #[test]
    fn test_implicit_entry_block() {
        let listing = "@ -- Begin function g\n\t.loc\t1 5 0 @ g.c:5:0\n\tpush\t{r4, lr}\n.LBB1_1: @ %loop\n\tbx\tlr\n@ -- End function\n";
        let funcs = parse_listing(listing);
        let g = &funcs[0];
        assert_eq!(g.blocks[0].id, None);
        assert_eq!(g.blocks[0].name, IMPLICIT_ENTRY);
        assert_eq!(g.blocks[0].range, Some(LineRange::point(5)));
        assert_eq!(g.blocks[1].name, "loop");
    }

    #[test]
    fn test_foreign_file_and_line_zero_keep_current_line() {
        let listing = "\
@ -- Begin function h
\t.loc\t1 30 0 @ h.c:30:0
@ %bb.0: @ %entry
\t.loc\t1 31 3 @ h.c:31:3
\tadd\tr0, r0, r1
\t.loc\t2 5 0 @ util.h:5:0
\tadd\tr0, r0, r1
\t.loc\t1 0 0 @ h.c:0:0
\tsub\tr0, r0, r1
@ -- End function
";
        let funcs = parse_listing(listing);
        let h = &funcs[0];
        assert_eq!(h.file, "h.c");
        assert_eq!(h.at, 30);
        assert_eq!(h.lines.len(), 1);
        assert_eq!(h.lines[&31].arithmetic, 3);
        assert_eq!(h.blocks[0].range, Some(LineRange::point(31)));
    }

    #[test]
    fn test_function_location_skips_line_zero() {
        let listing = "@ -- Begin function z\n\t.loc\t1 0 0 @ z.c:0:0\n\t.loc\t1 7 0 @ z.c:7:0\n\tnop\n@ -- End function\n";
        let funcs = parse_listing(listing);
        assert_eq!(funcs[0].loc().to_string(), "z.c:7");
    }

    #[test]
    fn test_block_extent_starts_at_own_location() {
        let listing = "\
@ -- Begin function f
\t.loc\t1 10 0 @ f.c:10:0
@ %bb.0: @ %entry
\t.loc\t1 11 3 @ f.c:11:3
\tadd\tr0, r0, #1
.LBB0_1: @ %if.then
\tmov\tr1, r0
\t.loc\t1 12 5 @ f.c:12:5
\tbx\tlr
@ -- End function
";
        let funcs = parse_listing(listing);
        let f = &funcs[0];
        assert_eq!(f.blocks[0].range, Some(LineRange::point(11)));
        assert_eq!(f.blocks[1].name, "if.then");
        assert_eq!(f.blocks[1].range, Some(LineRange::point(12)));
        assert_eq!(f.blocks[1].stat.instructions(), 2);
        // The mov still belongs to the last location seen.
        assert_eq!(f.lines[&11].arithmetic, 2);
    }

    #[test]
    fn test_block_without_location_has_no_extent() {
        let listing = "@ -- Begin function f\n\t.loc\t1 4 0 @ f.c:4:0\n@ %bb.0: @ %entry\n\t.loc\t1 4 3 @ f.c:4:3\n\tnop\n.LBB0_2: @ %exit\n\tbx\tlr\n@ -- End function\n";
        let funcs = parse_listing(listing);
        assert_eq!(funcs[0].blocks[1].range, None);
    }

    #[test]
    fn test_unnamed_label() {
        let listing = "@ -- Begin function k\n.LBB2_4:\n\tnop\n@ -- End function\n";
        assert_eq!(parse_listing(listing)[0].blocks[0].name, "bb.4");
    }

    #[test]
    fn test_unterminated_function() {
        let err = parse_str("@ -- Begin function f\n\tnop\n", &catalog(), &ParseOptions::new())
            .unwrap_err();
        assert!(matches!(err, AsmError::UnterminatedFunction { ref name } if name == "f"));
    }

    #[test]
    fn test_nested_function() {
        let err = parse_str(
            "@ -- Begin function f\n@ -- Begin function g\n",
            &catalog(),
            &ParseOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AsmError::NestedFunction { line: 2, .. }));
    }

    #[test]
    fn test_instructions_outside_functions_ignored() {
        assert!(parse_listing("\tnop\n\tadd\tr0, r0, r0\n").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse(&dir.path().join("m.s"), &catalog(), &ParseOptions::new()).unwrap_err();
        assert!(matches!(err, AsmError::Io { .. }));
    }
}
