//! Free-text matching: case-insensitive substring containment over a
//! per-record text projection. No tokenization, no scoring.

use crate::search::search_config::SearchConfig;


/// Concatenates the configured text fields of a record, separated by single
/// spaces. Missing fields are skipped; list fields are joined with spaces.
pub fn searchable_text<R>(config: &SearchConfig<R>, record: &R) -> String {
    let mut text = String::new();
    for value in config.text_values(record).filter(|value| !value.is_missing()) {
        for part in value.values() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(part);
        }
    }
    text
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatcher {
    // lower-cased, trimmed; `None` matches everything
    needle: Option<String>,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        let needle = if query.is_empty() { None } else { Some(query.to_lowercase()) };
        Self { needle }
    }

    /// An empty or whitespace-only query is not "match nothing": it matches every record.
    pub fn is_match_all(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Same as [`QueryMatcher::matches_text`] for text that is already lower-cased.
    pub fn matches_lowercase(&self, lowercase_text: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => lowercase_text.contains(needle.as_str()),
        }
    }

    pub fn matches<R>(&self, config: &SearchConfig<R>, record: &R) -> bool {
        if self.is_match_all() {
            return true;
        }
        self.matches_lowercase(&searchable_text(config, record).to_lowercase())
    }
}


/// Lower-cased searchable text of every record in a collection, index-aligned
/// with it. Rebuilt only when the collection itself changes.
#[derive(Debug, Clone, Default)]
pub struct SearchableCorpus {
    texts: Vec<String>,
}

impl SearchableCorpus {
    pub fn build<R>(config: &SearchConfig<R>, records: &[R]) -> Self {
        let texts = records.iter().map(|record| searchable_text(config, record).to_lowercase()).collect();
        Self { texts }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(String::as_str)
    }

    pub fn matches(&self, matcher: &QueryMatcher, index: usize) -> bool {
        matcher.is_match_all() || self.text(index).is_some_and(|text| matcher.matches_lowercase(text))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search_config::FieldValue;

    struct Unit {
        name: String,
        sector: String,
        tags: Vec<String>,
        lead: Option<String>,
    }

    fn config() -> SearchConfig<Unit> {
        SearchConfig::<Unit>::new()
            .text_field(|u| FieldValue::from(&u.name))
            .text_field(|u| FieldValue::from(&u.lead))
            .text_field(|u| FieldValue::from(&u.tags))
            .text_field(|u| FieldValue::from(&u.sector))
    }

    fn units() -> Vec<Unit> {
        vec![
            Unit { name: "Governance Sector".into(), sector: "Governance".into(), tags: vec![], lead: None },
            Unit { name: "Platform Sector".into(), sector: "Platform".into(), tags: vec!["Cloud Ops".into(), "AI".into()], lead: Some("Mariam".into()) },
        ]
    }

    #[test]
    fn searchable_text_skips_missing_and_joins_lists() {
        let units = units();
        assert_eq!(searchable_text(&config(), &units[0]), "Governance Sector Governance");
        assert_eq!(searchable_text(&config(), &units[1]), "Platform Sector Mariam Cloud Ops AI Platform");
    }

    #[test]
    fn empty_query_matches_every_record() {
        let config = config();
        for query in ["", "   ", "\t\n"] {
            let matcher = QueryMatcher::new(query);
            assert!(matcher.is_match_all());
            assert!(units().iter().all(|u| matcher.matches(&config, u)));
        }
    }

    #[test]
    fn matching_ignores_case() {
        let config = config();
        let units = units();
        for query in ["gov", "cloud ops", "mariam", "sector", "ai", "xyz"] {
            let lower = units.iter().map(|u| QueryMatcher::new(query).matches(&config, u)).collect::<Vec<_>>();
            let upper = units.iter().map(|u| QueryMatcher::new(&query.to_uppercase()).matches(&config, u)).collect::<Vec<_>>();
            assert_eq!(lower, upper, "query {query:?}");
        }
    }

    #[test]
    fn substring_containment_only() {
        let config = config();
        let units = units();
        let matcher = QueryMatcher::new("gov");
        assert!(matcher.matches(&config, &units[0]));
        assert!(!matcher.matches(&config, &units[1]));
        // no tokenization: word order matters
        assert!(!QueryMatcher::new("sector platform").matches(&config, &units[1]));
        assert!(QueryMatcher::new("  platform sector ").matches(&config, &units[1]));
    }

    #[test]
    fn corpus_agrees_with_direct_matching() {
        let config = config();
        let units = units();
        let corpus = SearchableCorpus::build(&config, &units);
        assert_eq!(corpus.len(), 2);
        for query in ["GOV", "ops", "", "nothing"] {
            let matcher = QueryMatcher::new(query);
            for (index, unit) in units.iter().enumerate() {
                assert_eq!(corpus.matches(&matcher, index), matcher.matches(&config, unit));
            }
        }
        assert!(!corpus.matches(&QueryMatcher::new("gov"), 7));
    }
}
