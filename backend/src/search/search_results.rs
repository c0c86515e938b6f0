//! Filtered result computation. Always recomputed from the full collection.

use portal_common::search_query::ActiveSelection;
use portal_common::search_result::FacetOptionPolicy;

use crate::search::facet_filter;
use crate::search::facet_index::FacetIndex;
use crate::search::query_matcher::{QueryMatcher, SearchableCorpus};
use crate::search::search_config::SearchConfig;


/// Positions of the records matching the query and every active facet, in collection order.
pub fn filter_indices<R>(records: &[R], config: &SearchConfig<R>, selection: &ActiveSelection) -> Vec<usize> {
    let matcher = QueryMatcher::new(&selection.query_string);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            matcher.matches(config, *record) && facet_filter::passes(*record, config.facets(), &selection.facet_filters)
        })
        .map(|(index, _)| index)
        .collect()
}

/// Same as [`filter_indices`], reading free text from a prebuilt corpus.
pub fn filter_corpus_indices<R>(
    records: &[R],
    corpus: &SearchableCorpus,
    config: &SearchConfig<R>,
    selection: &ActiveSelection,
) -> Vec<usize> {
    let matcher = QueryMatcher::new(&selection.query_string);
    records
        .iter()
        .enumerate()
        .filter(|(index, record)| {
            corpus.matches(&matcher, *index) && facet_filter::passes(*record, config.facets(), &selection.facet_filters)
        })
        .map(|(index, _)| index)
        .collect()
}

pub fn filter_records<'a, R>(records: &'a [R], config: &SearchConfig<R>, selection: &ActiveSelection) -> Vec<&'a R> {
    filter_indices(records, config, selection).into_iter().map(|index| &records[index]).collect()
}

/// Facet option counts under `policy`.
///
/// `full_index` is the index of the whole collection and `matching` the
/// current result positions; both are reused rather than recomputed.
pub fn facet_options_for_policy<R>(
    records: &[R],
    corpus: &SearchableCorpus,
    config: &SearchConfig<R>,
    selection: &ActiveSelection,
    matching: &[usize],
    full_index: &FacetIndex,
    policy: FacetOptionPolicy,
) -> FacetIndex {
    match policy {
        FacetOptionPolicy::FullCollection => full_index.clone(),
        FacetOptionPolicy::FilteredResults => {
            FacetIndex::build_from(matching.iter().map(|index| &records[*index]), config.facets())
        }
        FacetOptionPolicy::ExcludeOwnFacet => {
            let mut index = FacetIndex::default();
            for facet in config.facets() {
                let facet_key = facet.key();
                let counts = if selection.is_filtered(facet_key) {
                    let others = selection.without_facet(facet_key);
                    let positions = filter_corpus_indices(records, corpus, config, &others);
                    FacetIndex::build_from(positions.iter().map(|position| &records[*position]), std::slice::from_ref(facet))
                } else {
                    FacetIndex::build_from(matching.iter().map(|position| &records[*position]), std::slice::from_ref(facet))
                };
                index.insert_counts(facet_key, counts.into_map().remove(facet_key).unwrap_or_default());
            }
            index
        }
    }
}
