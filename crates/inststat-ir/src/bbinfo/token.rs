//! Line tokenizer for the bbinfo format.
//!
//! Prefixes are indentation-sensitive: ` at:` and ` block:` are indented by one
//! space, block fields and line entries by two.

use crate::{LineStat, SourceLoc};

/// One classified bbinfo line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Func(&'a str),
    At(SourceLoc),
    Block(&'a str),
    Size(u32),
    From(SourceLoc),
    To(SourceLoc),
    Stat(LineStat),
    /// `  <line>:` with optional counters.
    Entry { line: u32, stat: Option<LineStat> },
    Blank,
    Unknown,
}

/// A recognised prefix followed by a payload that does not parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPayload<'a>(pub &'a str);

impl<'a> LineKind<'a> {
    /// Classify one line (without its terminator).
    ///
    /// # Errors
    ///
    /// Returns the offending payload if a known prefix carries malformed data.
    pub fn parse(text: &'a str) -> Result<Self, InvalidPayload<'a>> {
        let text = text.strip_suffix('\r').unwrap_or(text);
        if text.trim().is_empty() {
            return Ok(Self::Blank);
        }

        if let Some(name) = text.strip_prefix("func: ") {
            return name_of(name).map(Self::Func);
        }
        if let Some(loc) = text.strip_prefix(" at: ") {
            return loc_of(loc).map(Self::At);
        }
        if let Some(name) = text.strip_prefix(" block: ") {
            return name_of(name).map(Self::Block);
        }

        let Some(field) = text.strip_prefix("  ") else {
            return Ok(Self::Unknown);
        };
        if let Some(size) = field.strip_prefix("size: ") {
            return size.trim().parse().map(Self::Size).map_err(|_| InvalidPayload(size));
        }
        if let Some(loc) = field.strip_prefix("from: ") {
            return loc_of(loc).map(Self::From);
        }
        if let Some(loc) = field.strip_prefix("to: ") {
            return loc_of(loc).map(Self::To);
        }
        if let Some(stat) = field.strip_prefix("stat: ") {
            return stat.parse().map(Self::Stat).map_err(|_| InvalidPayload(stat));
        }

        entry_of(field)
    }
}

fn name_of(name: &str) -> Result<&str, InvalidPayload<'_>> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(InvalidPayload(name))
    } else {
        Ok(trimmed)
    }
}

fn loc_of(text: &str) -> Result<SourceLoc, InvalidPayload<'_>> {
    SourceLoc::parse(text.trim_end()).ok_or(InvalidPayload(text))
}

fn entry_of(field: &str) -> Result<LineKind<'_>, InvalidPayload<'_>> {
    let Some((number, rest)) = field.split_once(':') else {
        return Ok(LineKind::Unknown);
    };
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(LineKind::Unknown);
    }

    let line = number.parse().map_err(|_| InvalidPayload(number))?;
    let rest = rest.trim();
    let stat = if rest.is_empty() {
        None
    } else {
        Some(rest.parse().map_err(|_| InvalidPayload(rest))?)
    };
    Ok(LineKind::Entry { line, stat })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        assert_eq!(LineKind::parse("func: main"), Ok(LineKind::Func("main")));
        assert_eq!(
            LineKind::parse(" at: src/a.c:10"),
            Ok(LineKind::At(SourceLoc::new("src/a.c", 10)))
        );
        assert_eq!(LineKind::parse(" block: for.body"), Ok(LineKind::Block("for.body")));
    }

    #[test]
    fn test_block_fields() {
        assert_eq!(LineKind::parse("  size: 12"), Ok(LineKind::Size(12)));
        assert_eq!(
            LineKind::parse("  from: a.c:3"),
            Ok(LineKind::From(SourceLoc::new("a.c", 3)))
        );
        assert_eq!(LineKind::parse("  to: a.c:9"), Ok(LineKind::To(SourceLoc::new("a.c", 9))));
        assert_eq!(
            LineKind::parse("  stat: 1, 0, 0, 2, 0, 0, 5"),
            Ok(LineKind::Stat(LineStat::new([1, 0, 0, 2, 0, 0], 5)))
        );
    }

    #[test]
    fn test_entries() {
        assert_eq!(
            LineKind::parse("  10:"),
            Ok(LineKind::Entry { line: 10, stat: None })
        );
        assert_eq!(
            LineKind::parse("  11: 0, 1, 0, 0, 0, 0, 4"),
            Ok(LineKind::Entry {
                line: 11,
                stat: Some(LineStat::new([0, 1, 0, 0, 0, 0], 4)),
            })
        );
    }

    #[test]
    fn test_indentation_matters() {
        assert_eq!(LineKind::parse("at: a.c:1"), Ok(LineKind::Unknown));
        assert_eq!(LineKind::parse("block: x"), Ok(LineKind::Unknown));
        assert_eq!(LineKind::parse(" size: 3"), Ok(LineKind::Unknown));
        assert_eq!(LineKind::parse("  foo: bar"), Ok(LineKind::Unknown));
        assert_eq!(LineKind::parse("   "), Ok(LineKind::Blank));
        assert_eq!(LineKind::parse(""), Ok(LineKind::Blank));
    }

    #[test]
    fn test_malformed_payloads() {
        assert_eq!(LineKind::parse("  size: many"), Err(InvalidPayload("many")));
        assert_eq!(LineKind::parse(" at: nowhere"), Err(InvalidPayload("nowhere")));
        assert_eq!(LineKind::parse("  10: 1, 2"), Err(InvalidPayload("1, 2")));
        assert_eq!(LineKind::parse("func: "), Err(InvalidPayload("")));
        assert!(LineKind::parse("  99999999999:").is_err());
    }
}
