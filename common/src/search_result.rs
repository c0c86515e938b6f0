use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};


/// Distinct facet values with the number of records exhibiting each, per facet key.
pub type FacetCounts = BTreeMap<String, BTreeMap<String, u64>>;

/// One filter chip: a value, how many records carry it, and whether it is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub count: u64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultFacets {
    pub facet_field: String,
    pub facet_values: Vec<FacetOption>,
}

/// Which record set facet option counts are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FacetOptionPolicy {
    /// The full unfiltered collection: chips never disappear while narrowing.
    #[default]
    FullCollection,
    /// Only the records left after the current query and facets.
    FilteredResults,
    /// Records matching the query and every other active facet, so values of
    /// a facet stay selectable alongside the ones already picked.
    ExcludeOwnFacet,
}

impl std::str::FromStr for FacetOptionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full_collection" | "full" => Ok(Self::FullCollection),
            "filtered_results" | "filtered" => Ok(Self::FilteredResults),
            "exclude_own_facet" | "disjunctive" => Ok(Self::ExcludeOwnFacet),
            other => Err(format!("unknown facet option policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FacetOptionSort {
    /// Count descending, ties broken alphabetically.
    #[default]
    ByCount,
    Alphabetical,
}

impl std::str::FromStr for FacetOptionSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by_count" | "count" => Ok(Self::ByCount),
            "alphabetical" | "alpha" => Ok(Self::Alphabetical),
            other => Err(format!("unknown facet option sort: {other}")),
        }
    }
}

/// Turns the counts of one facet into a chip list.
///
/// Values that are selected but absent from `counts` are kept with a count of
/// zero, so an active chip can always be switched off again.
pub fn facet_options_from_counts(
    counts: Option<&BTreeMap<String, u64>>,
    selected: Option<&BTreeSet<String>>,
    sort: FacetOptionSort,
) -> Vec<FacetOption> {
    let is_selected = |value: &str| selected.is_some_and(|s| s.contains(value));
    let mut options = counts
        .into_iter()
        .flatten()
        .map(|(value, count)| FacetOption { value: value.clone(), count: *count, selected: is_selected(value.as_str()) })
        .collect::<Vec<_>>();

    if let Some(selected) = selected {
        for value in selected {
            if !counts.is_some_and(|c| c.contains_key(value)) {
                options.push(FacetOption { value: value.clone(), count: 0, selected: true });
            }
        }
    }

    match sort {
        FacetOptionSort::ByCount => options.sort_by_key(|item| (u64::MAX - item.count, item.value.clone())),
        FacetOptionSort::Alphabetical => options.sort_by(|a, b| a.value.cmp(&b.value)),
    }
    options
}


#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> BTreeMap<String, u64> {
        BTreeMap::from([("Governance".to_string(), 2), ("Platform".to_string(), 5), ("Delivery".to_string(), 2)])
    }

    #[test]
    fn options_sort_by_count_then_value() {
        let counts = counts();
        let options = facet_options_from_counts(Some(&counts), None, FacetOptionSort::ByCount);
        let values = options.iter().map(|o| o.value.as_str()).collect::<Vec<_>>();
        assert_eq!(values, vec!["Platform", "Delivery", "Governance"]);
        assert!(options.iter().all(|o| !o.selected));
    }

    #[test]
    fn selected_values_missing_from_counts_are_kept() {
        let counts = counts();
        let selected = BTreeSet::from(["Operations".to_string(), "Platform".to_string()]);
        let options = facet_options_from_counts(Some(&counts), Some(&selected), FacetOptionSort::Alphabetical);
        let values = options.iter().map(|o| (o.value.as_str(), o.count, o.selected)).collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                ("Delivery", 2, false),
                ("Governance", 2, false),
                ("Operations", 0, true),
                ("Platform", 5, true),
            ]
        );
    }

    #[test]
    fn no_counts_and_no_selection_is_empty() {
        assert!(facet_options_from_counts(None, None, FacetOptionSort::ByCount).is_empty());
    }

    #[test]
    fn policies_parse_from_env_style_strings() {
        assert_eq!("filtered".parse::<FacetOptionPolicy>(), Ok(FacetOptionPolicy::FilteredResults));
        assert_eq!("EXCLUDE_OWN_FACET".parse::<FacetOptionPolicy>(), Ok(FacetOptionPolicy::ExcludeOwnFacet));
        assert!("sometimes".parse::<FacetOptionPolicy>().is_err());
        assert_eq!("alpha".parse::<FacetOptionSort>(), Ok(FacetOptionSort::Alphabetical));
    }
}
