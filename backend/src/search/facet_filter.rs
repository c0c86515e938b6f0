//! Facet filtering: AND across active facet keys, OR within one key's values.

use std::collections::{BTreeMap, BTreeSet};

use crate::search::search_config::FacetDefinition;


/// Whether `record` passes every active facet in `facet_filters`.
///
/// A key with an empty value set, or a key no definition declares, imposes no
/// constraint. A record with no value for an active key fails that key.
pub fn passes<R>(record: &R, facets: &[FacetDefinition<R>], facet_filters: &BTreeMap<String, BTreeSet<String>>) -> bool {
    facet_filters
        .iter()
        .filter(|(_, active)| !active.is_empty())
        .all(|(facet_key, active)| {
            let Some(facet) = facets.iter().find(|facet| facet.key() == facet_key.as_str()) else {
                tracing::trace!("ignoring filter on undeclared facet {facet_key}");
                return true;
            };
            passes_facet(record, facet, active)
        })
}

pub fn passes_facet<R>(record: &R, facet: &FacetDefinition<R>, active: &BTreeSet<String>) -> bool {
    facet.resolve(record).values().any(|value| active.contains(value))
}
