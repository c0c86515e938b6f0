//! Distinct facet values and per-value record counts, used to drive filter chips.

use std::collections::{BTreeMap, BTreeSet};

use portal_common::search_query::ActiveSelection;
use portal_common::search_result::{FacetCounts, FacetOption, FacetOptionSort, SearchResultFacets, facet_options_from_counts};

use crate::search::search_config::FacetDefinition;


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    counts: FacetCounts,
}

impl FacetIndex {
    /// Counts, for every facet definition, how many records exhibit each value.
    ///
    /// Every defined key is present in the result, possibly with no values. A
    /// record counts once per distinct value, even if its list repeats one.
    pub fn build<R>(records: &[R], facets: &[FacetDefinition<R>]) -> Self {
        Self::build_from(records.iter(), facets)
    }

    pub fn build_from<'a, R: 'a>(records: impl IntoIterator<Item = &'a R>, facets: &[FacetDefinition<R>]) -> Self {
        let mut counts = facets
            .iter()
            .map(|facet| (facet.key().to_string(), BTreeMap::new()))
            .collect::<FacetCounts>();
        let mut seen = BTreeSet::new();
        for record in records {
            for facet in facets {
                let Some(values) = counts.get_mut(facet.key()) else { continue };
                seen.clear();
                for value in facet.resolve(record).values() {
                    if seen.insert(value) {
                        *values.entry(value.to_string()).or_insert(0_u64) += 1;
                    }
                }
            }
        }
        Self { counts }
    }

    pub fn from_counts(counts: FacetCounts) -> Self {
        Self { counts }
    }

    pub fn counts(&self, facet_key: &str) -> Option<&BTreeMap<String, u64>> {
        self.counts.get(facet_key)
    }

    pub fn count(&self, facet_key: &str, value: &str) -> u64 {
        self.counts(facet_key).and_then(|values| values.get(value)).copied().unwrap_or(0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &FacetCounts {
        &self.counts
    }

    pub fn into_map(self) -> FacetCounts {
        self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(BTreeMap::is_empty)
    }

    /// Replaces one facet's counts; used when each facet is counted over a different record set.
    pub fn insert_counts(&mut self, facet_key: impl Into<String>, values: BTreeMap<String, u64>) {
        self.counts.insert(facet_key.into(), values);
    }

    /// Chip list for one facet, with the selection's active values marked.
    pub fn options(&self, facet_key: &str, selection: &ActiveSelection, sort: FacetOptionSort) -> Vec<FacetOption> {
        facet_options_from_counts(self.counts(facet_key), selection.active_values(facet_key), sort)
    }

    pub fn facet_results(&self, selection: &ActiveSelection, sort: FacetOptionSort) -> Vec<SearchResultFacets> {
        self.keys()
            .map(|facet_field| SearchResultFacets {
                facet_field: facet_field.to_string(),
                facet_values: self.options(facet_field, selection, sort),
            })
            .collect()
    }
}
