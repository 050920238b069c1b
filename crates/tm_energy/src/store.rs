use std::path::Path;

use ahash::AHashMap;
use log::debug;
use once_cell::sync::Lazy;

use crate::error::MeltingError;
use crate::tables::{ParamError, ParameterTable};

/// The parameter sets shipped with the crate, embedded at compile time.
const EMBEDDED: &[&str] = &[
    include_str!("../params/all97.par"),
    include_str!("../params/san04.par"),
    include_str!("../params/bre86.par"),
    include_str!("../params/sug96.par"),
    include_str!("../params/sug95.par"),
    include_str!("../params/xia98.par"),
    include_str!("../params/fre86.par"),
];

static BUILTIN: Lazy<ParameterStore> = Lazy::new(|| {
    let mut store = ParameterStore::new();
    for text in EMBEDDED {
        let table = ParameterTable::from_embedded(text)
            .unwrap_or_else(|e| panic!("shipped parameter file is invalid: {e}"));
        store.insert(table);
    }
    debug!("builtin parameter store ready: {}", store.names().join(", "));
    store
});

/// Loaded parameter tables, addressed by name.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    tables: AHashMap<String, ParameterTable>,
}

impl ParameterStore {
    pub fn new() -> Self {
        ParameterStore {
            tables: AHashMap::new(),
        }
    }

    /// The shipped reference tables, parsed once per process.
    pub fn builtin() -> &'static ParameterStore {
        &BUILTIN
    }

    /// Registers a table under its own name, replacing any previous one.
    pub fn insert(&mut self, table: ParameterTable) -> Option<ParameterTable> {
        self.tables.insert(table.name().to_string(), table)
    }

    /// Loads a user-supplied parameter file and returns the table name.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String, ParamError> {
        let table = ParameterTable::from_parameter_file(path)?;
        let name = table.name().to_string();
        self.insert(table);
        Ok(name)
    }

    pub fn get(&self, name: &str) -> Result<&ParameterTable, MeltingError> {
        self.tables
            .get(name)
            .ok_or_else(|| MeltingError::UnknownTable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_sequence::Hybridization;

    #[test]
    fn test_builtin_tables_present() {
        let store = ParameterStore::builtin();
        assert_eq!(
            store.names(),
            vec!["all97", "bre86", "fre86", "san04", "sug95", "sug96", "xia98"]
        );
    }

    #[test]
    fn test_builtin_hybridizations() {
        let store = ParameterStore::builtin();
        assert!(store.get("all97").unwrap().applies_to(Hybridization::DnaDna));
        assert!(store.get("all97").unwrap().applies_to(Hybridization::Hairpin));
        assert!(store.get("sug95").unwrap().applies_to(Hybridization::DnaRna));
        assert!(store.get("xia98").unwrap().applies_to(Hybridization::RnaRna));
        assert!(!store.get("bre86").unwrap().applies_to(Hybridization::RnaRna));
    }

    #[test]
    fn test_unknown_table() {
        let store = ParameterStore::builtin();
        let err = store.get("tur06").unwrap_err();
        assert!(matches!(err, MeltingError::UnknownTable(name) if name == "tur06"));
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut store = ParameterStore::new();
        let table = ParameterStore::builtin().get("all97").unwrap().clone();
        assert!(store.insert(table.clone()).is_none());
        assert!(store.insert(table).is_some());
        assert_eq!(store.names(), vec!["all97"]);
    }
}
