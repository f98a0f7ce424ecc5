//! Core classification types.

use std::fmt;

/// Instruction category used for counting.
///
/// `Ignore` covers everything a table does not know about (pseudo-ops,
/// directives, unsupported opcodes); those are never counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Branch,
    Load,
    Store,
    Arithmetic,
    FloatingPoint,
    Other,
    Ignore,
}

impl Category {
    /// Counted categories, in serialization order.
    pub const COUNTED: [Self; 6] = [
        Self::Branch,
        Self::Load,
        Self::Store,
        Self::Arithmetic,
        Self::FloatingPoint,
        Self::Other,
    ];

    /// Whether instructions of this category contribute to statistics.
    #[must_use]
    pub const fn is_counted(self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Branch => "branch",
            Self::Load => "load",
            Self::Store => "store",
            Self::Arithmetic => "arithmetic",
            Self::FloatingPoint => "floating-point",
            Self::Other => "other",
            Self::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Result of classifying one mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Classification {
    pub category: Category,
    pub cycles: u32,
}

impl Classification {
    /// Classification for mnemonics no rule matches.
    pub const IGNORE: Self = Self {
        category: Category::Ignore,
        cycles: 0,
    };

    pub const fn new(category: Category, cycles: u32) -> Self {
        Self { category, cycles }
    }

    #[must_use]
    pub const fn is_counted(self) -> bool {
        self.category.is_counted()
    }
}

/// Declarative cost rule: mnemonic pattern, category, cycle cost.
///
/// The pattern is a regular expression matched against the whole mnemonic,
/// ignoring case.
#[derive(Clone, Copy, Debug)]
pub struct RuleSpec {
    pub pattern: &'static str,
    pub category: Category,
    pub cycles: u32,
}

impl RuleSpec {
    pub const fn new(pattern: &'static str, category: Category, cycles: u32) -> Self {
        Self {
            pattern,
            category,
            cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_is_not_counted() {
        assert!(!Category::Ignore.is_counted());
        assert!(!Classification::IGNORE.is_counted());
        assert!(Category::COUNTED.iter().all(|c| c.is_counted()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::FloatingPoint.to_string(), "floating-point");
        assert_eq!(Category::Load.to_string(), "load");
    }
}
