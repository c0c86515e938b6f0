//! Shared search selection model and helpers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};


/// Name of the free-text parameter in a search URL. No facet may use it.
pub const QUERY_PARAM: &str = "q";

/// A facet value that trims to nothing. Such values never filter and never
/// survive the URL, so no mutator stores them.
pub fn is_blank_value(value: &str) -> bool {
    value.trim().is_empty()
}


/// The free-text query plus the active facet values driving a filtered view.
///
/// A facet key never maps to an empty set: an empty set means "no filter on
/// that key", so every mutation removes keys whose set drains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActiveSelection {
    pub query_string: String,
    pub facet_filters: BTreeMap<String, BTreeSet<String>>,
}

impl ActiveSelection {
    pub fn from_query(query_string: impl Into<String>) -> Self {
        Self { query_string: query_string.into(), facet_filters: BTreeMap::new() }
    }

    /// Builder-style helper, mostly for tests and seeded links.
    pub fn with_facet<I, V>(mut self, facet_key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.set_facet_values(facet_key, values);
        self
    }

    pub fn has_query(&self) -> bool {
        !self.query_string.trim().is_empty()
    }

    /// True when neither the query nor any facet constrains the view.
    pub fn is_empty(&self) -> bool {
        !self.has_query() && self.facet_filters.is_empty()
    }

    pub fn is_selected(&self, facet_key: &str, value: &str) -> bool {
        self.facet_filters.get(facet_key).is_some_and(|values| values.contains(value))
    }

    pub fn is_filtered(&self, facet_key: &str) -> bool {
        self.facet_filters.contains_key(facet_key)
    }

    pub fn active_values(&self, facet_key: &str) -> Option<&BTreeSet<String>> {
        self.facet_filters.get(facet_key)
    }

    /// Flips one chip. Returns whether the value is selected afterwards.
    /// Blank values are ignored.
    pub fn toggle_facet_value(&mut self, facet_key: &str, value: &str) -> bool {
        if is_blank_value(value) {
            return false;
        }
        let entry = self.facet_filters.entry(facet_key.to_string()).or_default();
        let should_add = !entry.contains(value);
        if should_add {
            entry.insert(value.to_string());
        } else {
            entry.remove(value);
        }
        if entry.is_empty() {
            self.facet_filters.remove(facet_key);
        }
        should_add
    }

    /// Replaces the whole value set of one facet; an empty iterator clears it.
    pub fn set_facet_values<I, V>(&mut self, facet_key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let facet_key = facet_key.into();
        let values = values.into_iter().map(Into::into).filter(|v: &String| !is_blank_value(v)).collect::<BTreeSet<_>>();
        if values.is_empty() {
            self.facet_filters.remove(&facet_key);
        } else {
            self.facet_filters.insert(facet_key, values);
        }
    }

    /// Returns whether the facet had any active values.
    pub fn clear_facet(&mut self, facet_key: &str) -> bool {
        self.facet_filters.remove(facet_key).is_some()
    }

    pub fn clear_all(&mut self) {
        self.query_string.clear();
        self.facet_filters.clear();
    }

    /// Drops facet keys the predicate rejects, e.g. keys no longer configured.
    /// Returns the dropped keys.
    pub fn retain_facets(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let dropped = self.facet_filters.keys().filter(|k| !keep(k.as_str())).cloned().collect::<Vec<_>>();
        for key in &dropped {
            self.facet_filters.remove(key);
        }
        dropped
    }

    /// Restores the no-empty-set invariant after direct field edits.
    pub fn normalize(&mut self) {
        for values in self.facet_filters.values_mut() {
            values.retain(|v| !is_blank_value(v));
        }
        self.facet_filters.retain(|_, values| !values.is_empty());
    }

    /// The selection with one facet key removed. Used for disjunctive facet counts.
    pub fn without_facet(&self, facet_key: &str) -> Self {
        let mut query = self.clone();
        query.facet_filters.remove(facet_key);
        query
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_last_value_removes_the_key() {
        let mut selection = ActiveSelection::default();
        assert!(selection.toggle_facet_value("sectors", "Governance"));
        assert!(selection.is_selected("sectors", "Governance"));

        assert!(!selection.toggle_facet_value("sectors", "Governance"));
        assert!(selection.facet_filters.is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_value_sets_are_never_stored() {
        let mut selection = ActiveSelection::from_query("dubai");
        selection.set_facet_values("sectors", Vec::<String>::new());
        assert!(!selection.is_filtered("sectors"));

        selection.set_facet_values("sectors", ["", " ", "Operations"]);
        assert_eq!(selection.active_values("sectors").map(|v| v.len()), Some(1));

        selection.facet_filters.insert("streams".to_string(), BTreeSet::new());
        selection.facet_filters.insert("locations".to_string(), BTreeSet::from(["\t".to_string()]));
        selection.normalize();
        assert!(!selection.is_filtered("streams"));
        assert!(!selection.is_filtered("locations"));
    }

    #[test]
    fn toggling_a_blank_value_changes_nothing() {
        let mut selection = ActiveSelection::default().with_facet("sectors", ["Governance"]);
        let before = selection.clone();
        for blank in ["", " ", "\t\n"] {
            assert!(!selection.toggle_facet_value("sectors", blank));
            assert!(!selection.toggle_facet_value("streams", blank));
        }
        assert_eq!(selection, before);
    }

    #[test]
    fn whitespace_query_is_not_a_query() {
        let selection = ActiveSelection::from_query("   ");
        assert!(!selection.has_query());
        assert!(selection.is_empty());
    }

    #[test]
    fn retain_facets_reports_dropped_keys() {
        let mut selection = ActiveSelection::default()
            .with_facet("sectors", ["Governance"])
            .with_facet("legacy", ["x"]);
        let dropped = selection.retain_facets(|key| key == "sectors");
        assert_eq!(dropped, vec!["legacy".to_string()]);
        assert!(selection.is_filtered("sectors"));
    }

    #[test]
    fn clear_all_resets_query_and_facets() {
        let mut selection = ActiveSelection::from_query("gov").with_facet("sectors", ["Platform"]);
        selection.clear_all();
        assert_eq!(selection, ActiveSelection::default());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let selection: ActiveSelection = serde_json::from_str(r#"{"query_string":"ai"}"#).unwrap();
        assert_eq!(selection.query_string, "ai");
        assert!(selection.facet_filters.is_empty());
    }
}
