//! Client-side faceted search: free-text matching, facet counts and facet filtering.

pub mod search_config;
pub use search_config::{FacetDefinition, FieldValue, SearchConfig};

pub mod query_matcher;
pub use query_matcher::{QueryMatcher, SearchableCorpus, searchable_text};

pub mod facet_index;
pub use facet_index::FacetIndex;

pub mod facet_filter;

mod search_results;
pub use search_results::{facet_options_for_policy, filter_corpus_indices, filter_indices, filter_records};
