//! CPU profile selection.

use tracing::debug;

use crate::{CostTable, IsaError, Result, profiles};

/// The set of cost tables available to a run.
///
/// Selection is an exact, case-sensitive name match; unknown names resolve to
/// the default profile instead of failing.
#[derive(Clone, Debug)]
pub struct CostCatalog {
    tables: Vec<CostTable>,
    default: usize,
}

impl CostCatalog {
    /// Create a catalog. The first table is the default.
    ///
    /// # Errors
    ///
    /// Returns an error if `tables` is empty or two tables share a name.
    pub fn new(tables: Vec<CostTable>) -> Result<Self> {
        if tables.is_empty() {
            return Err(IsaError::EmptyCatalog);
        }
        for (i, table) in tables.iter().enumerate() {
            if tables[..i].iter().any(|t| t.name() == table.name()) {
                return Err(IsaError::DuplicateProfile(table.name().to_string()));
            }
        }
        Ok(Self { tables, default: 0 })
    }

    /// Catalog with the built-in ARM profiles (`cortex-r52` is the default).
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in rule fails to compile.
    pub fn builtin() -> Result<Self> {
        Self::new(vec![
            CostTable::new(profiles::CORTEX_R52, profiles::cortex_r52::RULES)?,
            CostTable::new(profiles::CORTEX_A57, profiles::cortex_a57::RULES)?,
        ])
    }

    /// Add a table.
    ///
    /// # Errors
    ///
    /// Returns an error if a table with the same name already exists.
    pub fn with_table(mut self, table: CostTable) -> Result<Self> {
        if self.get(table.name()).is_some() {
            return Err(IsaError::DuplicateProfile(table.name().to_string()));
        }
        self.tables.push(table);
        Ok(self)
    }

    /// Change the default profile.
    ///
    /// # Errors
    ///
    /// Returns an error if no table has this name.
    pub fn with_default(mut self, name: &str) -> Result<Self> {
        self.default = self
            .tables
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| IsaError::UnknownProfile(name.to_string()))?;
        Ok(self)
    }

    /// Look up a table by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CostTable> {
        self.tables.iter().find(|t| t.name() == name)
    }

    #[must_use]
    pub fn default_table(&self) -> &CostTable {
        &self.tables[self.default]
    }

    /// Resolve a CPU name, falling back to the default profile.
    #[must_use]
    pub fn select(&self, name: &str) -> &CostTable {
        self.get(name).unwrap_or_else(|| {
            let fallback = self.default_table();
            debug!(cpu = name, fallback = fallback.name(), "no exact CPU profile match");
            fallback
        })
    }

    /// Profile names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(CostTable::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Classification, RuleSpec};

    #[test]
    fn test_builtin_profiles() {
        let catalog = CostCatalog::builtin().unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, [profiles::CORTEX_R52, profiles::CORTEX_A57]);
        assert_eq!(catalog.default_table().name(), profiles::CORTEX_R52);
    }

    #[test]
    fn test_select_exact_and_fallback() {
        let catalog = CostCatalog::builtin().unwrap();
        assert_eq!(catalog.select("cortex-a57").name(), "cortex-a57");
        // Case-sensitive: falls back to the default.
        assert_eq!(catalog.select("Cortex-A57").name(), "cortex-r52");
        assert_eq!(catalog.select("generic").name(), "cortex-r52");
    }

    #[test]
    fn test_custom_table_and_default() {
        let custom =
            CostTable::new("toy", &[RuleSpec::new("ADD", Category::Arithmetic, 7)]).unwrap();
        let catalog = CostCatalog::builtin()
            .unwrap()
            .with_table(custom)
            .unwrap()
            .with_default("toy")
            .unwrap();

        assert_eq!(
            catalog.select("unknown").classify("add"),
            Classification::new(Category::Arithmetic, 7)
        );
        assert!(matches!(
            catalog.clone().with_default("missing"),
            Err(IsaError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(matches!(CostCatalog::new(Vec::new()), Err(IsaError::EmptyCatalog)));

        let a = CostTable::new("a", &[]).unwrap();
        let b = CostTable::new("a", &[]).unwrap();
        assert!(matches!(
            CostCatalog::new(vec![a, b]),
            Err(IsaError::DuplicateProfile(_))
        ));
    }
}
