//! Assembly line tokenizer.

use std::sync::OnceLock;

use regex::Regex;

/// One classified line of compiler assembly output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsmLine<'a> {
    /// `.cpu <name>`
    Cpu(&'a str),
    /// `@ -- Begin function <name>`
    BeginFunction(&'a str),
    /// `@ -- End function`
    EndFunction,
    /// `.loc` with its `file:line[:col]` comment.
    Loc { file: &'a str, line: u32 },
    /// Basic-block label, `@ %bb.<n>:` or `.LBB<f>_<n>:`, with its IR name.
    Label { id: u32, name: Option<&'a str> },
    /// An instruction mnemonic.
    Instruction(&'a str),
    Other,
}

static CPU_PATTERN: OnceLock<Regex> = OnceLock::new();
static BEGIN_PATTERN: OnceLock<Regex> = OnceLock::new();
static END_PATTERN: OnceLock<Regex> = OnceLock::new();
static LOC_PATTERN: OnceLock<Regex> = OnceLock::new();
static BB_PATTERN: OnceLock<Regex> = OnceLock::new();
static LBB_PATTERN: OnceLock<Regex> = OnceLock::new();
static INST_PATTERN: OnceLock<Regex> = OnceLock::new();

impl<'a> AsmLine<'a> {
    /// Classify one line of assembly.
    ///
    /// Comments may use `#`, `@` or `//` as leader, depending on the target.
    pub fn parse(line: &'a str) -> Self {
        let cpu = CPU_PATTERN.get_or_init(|| Regex::new(r#"^\s+\.cpu\s+"?([^"\s]+)"?"#).unwrap());
        if let Some(caps) = cpu.captures(line) {
            return caps.get(1).map_or(Self::Other, |m| Self::Cpu(m.as_str()));
        }

        let begin = BEGIN_PATTERN
            .get_or_init(|| Regex::new(r"(?:[#@]|//) -- Begin function (\S+)").unwrap());
        if let Some(caps) = begin.captures(line) {
            return caps.get(1).map_or(Self::Other, |m| Self::BeginFunction(m.as_str()));
        }

        let end = END_PATTERN.get_or_init(|| Regex::new(r"(?:[#@]|//) -- End function").unwrap());
        if end.is_match(line) {
            return Self::EndFunction;
        }

        let loc = LOC_PATTERN.get_or_init(|| {
            Regex::new(r"^\s+\.loc\s+\d+\s+\d+\s+\d+.*?\s(?:[#@]|//) (.+?):(\d+)(?::\d+)?\s*$").unwrap()
        });
        if let Some(caps) = loc.captures(line) {
            let row = caps.get(2).and_then(|m| m.as_str().parse().ok());
            return match (caps.get(1), row) {
                (Some(file), Some(line)) => Self::Loc {
                    file: file.as_str(),
                    line,
                },
                _ => Self::Other,
            };
        }

        let bb = BB_PATTERN.get_or_init(|| {
            Regex::new(r"^\s*(?:[#@]|//) %bb\.(\d+):\s*(?:(?:[#@]|//) %(.+?))?\s*$").unwrap()
        });
        let lbb = LBB_PATTERN.get_or_init(|| {
            Regex::new(r"^\.LBB\d+_(\d+):\s*(?:(?:[#@]|//) %(.+?))?\s*$").unwrap()
        });
        if let Some(caps) = bb.captures(line).or_else(|| lbb.captures(line)) {
            let Some(id) = caps.get(1).and_then(|m| m.as_str().parse().ok()) else {
                return Self::Other;
            };
            let name = caps.get(2).map(|m| m.as_str());
            return Self::Label { id, name };
        }

        let inst = INST_PATTERN
            .get_or_init(|| Regex::new(r"^\s+([A-Za-z_][\w.]*)(?:\s|$)").unwrap());
        inst.captures(line)
            .and_then(|caps| caps.get(1))
            .map_or(Self::Other, |m| Self::Instruction(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_directive() {
        assert_eq!(AsmLine::parse("\t.cpu\tcortex-r52"), AsmLine::Cpu("cortex-r52"));
        assert_eq!(AsmLine::parse("\t.cpu \"cortex-a57\""), AsmLine::Cpu("cortex-a57"));
    }

    #[test]
    fn test_function_markers() {
        assert_eq!(
            AsmLine::parse("\t@ -- Begin function main"),
            AsmLine::BeginFunction("main")
        );
        assert_eq!(
            AsmLine::parse("\t.p2align\t2 // -- Begin function f"),
            AsmLine::BeginFunction("f")
        );
        assert_eq!(
            AsmLine::parse("\t.p2align\t2 # -- Begin function _Z3fooi"),
            AsmLine::BeginFunction("_Z3fooi")
        );
        assert_eq!(AsmLine::parse("@ -- End function"), AsmLine::EndFunction);
    }

    #[test]
    fn test_loc_uses_comment_location() {
        assert_eq!(
            AsmLine::parse("\t.loc\t1 10 3 prologue_end    @ main.c:10:3"),
            AsmLine::Loc { file: "main.c", line: 10 }
        );
        assert_eq!(
            AsmLine::parse("\t.loc\t2 7 0 # C:/src/util.h:7"),
            AsmLine::Loc { file: "C:/src/util.h", line: 7 }
        );
        // No location comment.
        assert_eq!(AsmLine::parse("\t.loc\t1 10 3"), AsmLine::Other);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            AsmLine::parse("@ %bb.0:                                @ %entry"),
            AsmLine::Label { id: 0, name: Some("entry") }
        );
        assert_eq!(
            AsmLine::parse(".LBB0_3:                                @ %for.body"),
            AsmLine::Label { id: 3, name: Some("for.body") }
        );
        assert_eq!(
            AsmLine::parse("// %bb.1:                               // %if.then"),
            AsmLine::Label { id: 1, name: Some("if.then") }
        );
        assert_eq!(AsmLine::parse(".LBB1_2:"), AsmLine::Label { id: 2, name: None });
    }

    #[test]
    fn test_instructions() {
        assert_eq!(AsmLine::parse("\tldr\tr0, [r1]"), AsmLine::Instruction("ldr"));
        assert_eq!(AsmLine::parse("\tvadd.f32\ts0, s0, s1"), AsmLine::Instruction("vadd.f32"));
        assert_eq!(AsmLine::parse("\tbx\tlr"), AsmLine::Instruction("bx"));
        assert_eq!(AsmLine::parse("\tnop"), AsmLine::Instruction("nop"));
        assert_eq!(AsmLine::parse("\tret"), AsmLine::Instruction("ret"));
    }

    #[test]
    fn test_ignored_lines() {
        assert_eq!(AsmLine::parse("\t.p2align\t2"), AsmLine::Other);
        assert_eq!(AsmLine::parse("\t@ InlineAsm Start"), AsmLine::Other);
        assert_eq!(AsmLine::parse("\t// comment"), AsmLine::Other);
        assert_eq!(AsmLine::parse("main:"), AsmLine::Other);
        assert_eq!(AsmLine::parse(""), AsmLine::Other);
    }
}
