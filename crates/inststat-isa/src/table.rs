//! Compiled cost tables.

use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;

use crate::{Classification, IsaError, Result, RuleSpec};

/// A compiled cost rule.
#[derive(Clone, Debug)]
pub struct CostRule {
    key: char,
    pattern: &'static str,
    regex: Regex,
    classification: Classification,
}

impl CostRule {
    /// Compile a rule. The pattern is anchored to the whole mnemonic.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regex or does not start
    /// with an alphanumeric character (which is used as the lookup key).
    pub fn compile(spec: &RuleSpec) -> Result<Self> {
        let key = spec
            .pattern
            .chars()
            .next()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| IsaError::UnkeyedPattern(spec.pattern.to_string()))?;

        let regex = RegexBuilder::new(&format!("^(?:{})$", spec.pattern))
            .case_insensitive(true)
            .build()
            .map_err(|source| IsaError::InvalidPattern {
                pattern: spec.pattern.to_string(),
                source,
            })?;

        Ok(Self {
            key,
            pattern: spec.pattern,
            regex,
            classification: Classification::new(spec.category, spec.cycles),
        })
    }

    /// Upper-cased first letter of the mnemonics this rule can match.
    #[must_use]
    pub const fn key(&self) -> char {
        self.key
    }

    /// Pattern source text, as declared.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    /// Whether the rule matches the whole mnemonic.
    #[must_use]
    pub fn matches(&self, mnemonic: &str) -> bool {
        self.regex.is_match(mnemonic)
    }
}

/// Cost table for one CPU profile.
///
/// Rules are grouped by the first letter of the mnemonic. Within a group they
/// are tried in declaration order and the first match wins, so specific
/// patterns must come before general ones.
#[derive(Clone, Debug)]
pub struct CostTable {
    name: String,
    groups: FxHashMap<char, Vec<CostRule>>,
    len: usize,
}

impl CostTable {
    /// Compile a table from rule specs.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails to compile.
    pub fn new(name: impl Into<String>, rules: &[RuleSpec]) -> Result<Self> {
        let mut groups: FxHashMap<char, Vec<CostRule>> = FxHashMap::default();
        for spec in rules {
            let rule = CostRule::compile(spec)?;
            groups.entry(rule.key()).or_default().push(rule);
        }

        Ok(Self {
            name: name.into(),
            groups,
            len: rules.len(),
        })
    }

    /// Profile name (e.g. `cortex-a57`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rules sharing a first letter, in declaration order.
    pub fn candidates(&self, first: char) -> &[CostRule] {
        self.groups
            .get(&first.to_ascii_uppercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Classify a mnemonic.
    ///
    /// Unknown mnemonics are [`Classification::IGNORE`]; this is not an error.
    #[must_use]
    pub fn classify(&self, mnemonic: &str) -> Classification {
        let Some(first) = mnemonic.chars().next() else {
            return Classification::IGNORE;
        };

        self.candidates(first)
            .iter()
            .find(|rule| rule.matches(mnemonic))
            .map_or(Classification::IGNORE, CostRule::classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    const RULES: &[RuleSpec] = &[
        RuleSpec::new(r"B\.(EQ|NE)", Category::Branch, 1),
        RuleSpec::new("B", Category::Branch, 1),
        RuleSpec::new("BLR", Category::Branch, 2),
        RuleSpec::new("LDR(B|H)?", Category::Load, 4),
        RuleSpec::new("L.*", Category::Other, 9),
    ];

    fn table() -> CostTable {
        CostTable::new("test", RULES).unwrap()
    }

    #[test]
    fn test_full_token_match() {
        let table = table();
        assert_eq!(table.classify("B").category, Category::Branch);
        // "B" must not match as a prefix of "BX"
        assert_eq!(table.classify("BX"), Classification::IGNORE);
        assert_eq!(table.classify("BLR").cycles, 2);
    }

    #[test]
    fn test_case_insensitive() {
        let table = table();
        assert_eq!(
            table.classify("ldrb"),
            Classification::new(Category::Load, 4)
        );
        assert_eq!(table.classify("b.eq").category, Category::Branch);
    }

    #[test]
    fn test_declaration_order_wins() {
        let table = table();
        assert_eq!(table.classify("LDRH").category, Category::Load);
        assert_eq!(
            table.classify("LSL"),
            Classification::new(Category::Other, 9)
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        let table = table();
        assert_eq!(table.classify(""), Classification::IGNORE);
        assert_eq!(table.classify("ZZZ"), Classification::IGNORE);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = CostTable::new("bad", &[RuleSpec::new("A(", Category::Other, 1)]).unwrap_err();
        assert!(matches!(err, IsaError::InvalidPattern { .. }));

        let err = CostTable::new("bad", &[RuleSpec::new("(A)", Category::Other, 1)]).unwrap_err();
        assert!(matches!(err, IsaError::UnkeyedPattern(_)));
    }

    #[test]
    fn test_classify_is_pure() {
        let table = table();
        let first = table.classify("BLR");
        let _ = table.classify("LDR");
        let _ = table.classify("nope");
        assert_eq!(table.classify("BLR"), first);
    }
}
