//! Equipment category encoding.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Bijective mapping between equipment names and small integer codes.
///
/// Codes are assigned in sorted-name order at fit time, so the assignment is
/// deterministic for a given set of names. They are stable only within one
/// artifact: refitting on a different name set may reassign every code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    codes: BTreeMap<String, u32>,
}

impl CategoryTable {
    /// Assign a code to every distinct name.
    pub(crate) fn fit<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let distinct: BTreeSet<&str> = names.into_iter().collect();
        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, name)| (name.to_string(), code as u32))
            .collect();
        Self { codes }
    }

    /// The code assigned to a name, if the name was seen at fit time.
    pub fn code(&self, name: &str) -> Option<u32> {
        self.codes.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// All known names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_assigned_in_sorted_order() {
        let table = CategoryTable::fit(["Tractor", "Baler", "Plough", "Baler"]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.code("Baler"), Some(0));
        assert_eq!(table.code("Plough"), Some(1));
        assert_eq!(table.code("Tractor"), Some(2));
    }

    #[test]
    fn test_assignment_is_insertion_order_independent() {
        let a = CategoryTable::fit(["Tractor", "Baler", "Plough"]);
        let b = CategoryTable::fit(["Plough", "Tractor", "Baler"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_name_has_no_code() {
        let table = CategoryTable::fit(["Tractor"]);
        assert_eq!(table.code("Harvester"), None);
        assert!(!table.contains("Harvester"));
    }

    #[test]
    fn test_codes_are_bijective() {
        let table = CategoryTable::fit(["Tractor", "Baler", "Plough"]);
        let codes: Vec<u32> = table.names().filter_map(|n| table.code(n)).collect();
        let mut deduped = codes.clone();
        deduped.dedup();
        assert_eq!(codes, deduped);
        assert_eq!(codes.len(), table.len());
    }
}
