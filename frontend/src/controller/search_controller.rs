//! The stateful search surface bound to one page: owns the active selection,
//! debounces typed text, recomputes results on every commit, and mirrors the
//! committed selection into the URL.

use std::sync::Arc;
use std::time::Instant;

use portal_backend::search::{FacetIndex, SearchConfig, SearchableCorpus, facet_options_for_policy, filter_corpus_indices};
use portal_common::search_query::{ActiveSelection, is_blank_value};
use portal_common::search_result::{FacetCounts, FacetOption, SearchResultFacets};

use crate::controller::query_debouncer::{DebounceState, QueryDebouncer};
use crate::data_definitions::controller_settings::ControllerSettings;
use crate::data_definitions::url_param::{QUERY_PARAM, selection_from_params, selection_to_params};
use crate::data_definitions::url_state::UrlStateAdapter;


pub struct SearchController<R, U: UrlStateAdapter> {
    records: Arc<[R]>,
    config: Arc<SearchConfig<R>>,
    settings: ControllerSettings,
    url_state: U,
    selection: ActiveSelection,
    debouncer: QueryDebouncer,
    // derived from `records`, rebuilt only when the collection is replaced
    corpus: SearchableCorpus,
    collection_index: FacetIndex,
    // derived from `records` + `selection`, recomputed on every commit
    results: Vec<usize>,
    facet_options: FacetIndex,
    commit_count: u64,
    torn_down: bool,
}

impl<R, U: UrlStateAdapter> SearchController<R, U> {
    /// Seeds the selection from the URL, drops facet keys the config does not
    /// declare, and computes the first results. Mounting does not write the URL.
    pub fn mount(
        records: impl Into<Arc<[R]>>,
        config: impl Into<Arc<SearchConfig<R>>>,
        settings: ControllerSettings,
        url_state: U,
    ) -> Self {
        let records = records.into();
        let config = config.into();
        let mut selection = selection_from_params(&url_state.read());
        let dropped = selection.retain_facets(|facet_key| config.has_facet(facet_key));
        if !dropped.is_empty() {
            tracing::debug!("ignoring unknown facet keys from url: {dropped:?}");
        }
        let corpus = SearchableCorpus::build(&config, &records);
        let collection_index = FacetIndex::build(&records, config.facets());

        let mut controller = Self {
            records,
            config,
            debouncer: QueryDebouncer::new(settings.debounce()),
            settings,
            url_state,
            selection,
            corpus,
            collection_index,
            results: Vec::new(),
            facet_options: FacetIndex::default(),
            commit_count: 0,
            torn_down: false,
        };
        controller.recompute();
        tracing::debug!(
            "search controller mounted with {} records, {} matching",
            controller.records.len(),
            controller.results.len()
        );
        controller
    }

    // --- input ---

    /// A text-box edit. Nothing is committed until the debounce window passes quietly.
    pub fn input_query(&mut self, text: impl Into<String>, now: Instant) {
        if self.torn_down {
            return;
        }
        self.debouncer.input(text, now);
    }

    /// Commits the pending text if its window has elapsed. Returns whether a commit happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        match self.debouncer.poll(now) {
            Some(query) => {
                self.selection.query_string = query;
                self.commit("query");
                true
            }
            None => false,
        }
    }

    /// Commits pending text right away (Enter key). Returns whether anything was pending.
    pub fn commit_query_now(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        match self.debouncer.flush() {
            Some(query) => {
                self.selection.query_string = query;
                self.commit("query");
                true
            }
            None => false,
        }
    }

    /// Flips one facet chip and commits immediately. Unknown facet keys and
    /// blank values are ignored.
    pub fn toggle_facet(&mut self, facet_key: &str, value: &str) -> bool {
        if self.torn_down || !self.is_known_facet(facet_key) {
            return false;
        }
        if is_blank_value(value) {
            tracing::debug!("ignoring blank value for facet {facet_key:?}");
            return false;
        }
        self.selection.toggle_facet_value(facet_key, value);
        self.commit("facet");
        true
    }

    pub fn set_facet_values<I, V>(&mut self, facet_key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        if self.torn_down || !self.is_known_facet(facet_key) {
            return false;
        }
        self.selection.set_facet_values(facet_key, values);
        self.commit("facet");
        true
    }

    pub fn clear_facet(&mut self, facet_key: &str) -> bool {
        if self.torn_down || !self.selection.clear_facet(facet_key) {
            return false;
        }
        self.commit("facet");
        true
    }

    /// Clears the query, every facet, and any text still waiting to be committed.
    pub fn clear_all(&mut self) {
        if self.torn_down {
            return;
        }
        self.debouncer.cancel();
        self.selection.clear_all();
        self.commit("clear");
    }

    /// Swaps in a new record collection. The same `Arc` again is a no-op;
    /// a new one rebuilds the corpus and facet index and recomputes results.
    pub fn set_records(&mut self, records: impl Into<Arc<[R]>>) -> bool {
        if self.torn_down {
            return false;
        }
        let records = records.into();
        if Arc::ptr_eq(&self.records, &records) {
            return false;
        }
        self.records = records;
        self.corpus = SearchableCorpus::build(&self.config, &self.records);
        self.collection_index = FacetIndex::build(&self.records, self.config.facets());
        self.recompute();
        tracing::debug!("record collection replaced: {} records, {} matching", self.records.len(), self.results.len());
        true
    }

    /// Cancels any pending commit. A torn-down controller never commits or writes the URL again.
    /// Returns whether a pending commit was dropped.
    pub fn teardown(&mut self) -> bool {
        let dropped_pending = self.debouncer.cancel();
        if dropped_pending {
            tracing::debug!("search controller torn down with a pending query commit, discarded");
        }
        self.torn_down = true;
        dropped_pending
    }

    // --- output ---

    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    /// What the text box shows: pending text if any, else the committed query.
    pub fn input_value(&self) -> &str {
        self.debouncer.pending().unwrap_or(&self.selection.query_string)
    }

    pub fn debounce_state(&self) -> &DebounceState {
        self.debouncer.state()
    }

    /// When the event loop should call [`SearchController::poll`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    pub fn records(&self) -> &Arc<[R]> {
        &self.records
    }

    pub fn config(&self) -> &SearchConfig<R> {
        &self.config
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn url_state(&self) -> &U {
        &self.url_state
    }

    pub fn result_indices(&self) -> &[usize] {
        &self.results
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn filtered_results(&self) -> Vec<&R> {
        self.results.iter().map(|index| &self.records[*index]).collect()
    }

    pub fn facet_options(&self) -> &FacetCounts {
        self.facet_options.as_map()
    }

    pub fn facet_option_list(&self, facet_key: &str) -> Vec<FacetOption> {
        self.facet_options.options(facet_key, &self.selection, self.settings.option_sort)
    }

    pub fn facet_option_lists(&self) -> Vec<SearchResultFacets> {
        self.facet_options.facet_results(&self.selection, self.settings.option_sort)
    }

    // --- internals ---

    fn is_known_facet(&self, facet_key: &str) -> bool {
        let known = self.config.has_facet(facet_key);
        if !known {
            tracing::debug!("ignoring change to undeclared facet {facet_key:?}");
        }
        known
    }

    fn recompute(&mut self) {
        self.results = filter_corpus_indices(&self.records, &self.corpus, &self.config, &self.selection);
        self.facet_options = facet_options_for_policy(
            &self.records,
            &self.corpus,
            &self.config,
            &self.selection,
            &self.results,
            &self.collection_index,
            self.settings.facet_option_policy,
        );
    }

    fn commit(&mut self, reason: &str) {
        self.recompute();
        self.commit_count += 1;
        self.write_url();
        tracing::debug!(
            "{reason} commit #{}: {} of {} records match",
            self.commit_count,
            self.results.len(),
            self.records.len()
        );
    }

    /// Replaces the search parameters in the URL, keeping parameters that belong to someone else.
    fn write_url(&mut self) {
        let mut params = self.url_state.read();
        let config = &self.config;
        params.retain(|key| key != QUERY_PARAM && !config.has_facet(key));
        params.extend(selection_to_params(&self.selection));
        tracing::trace!("replacing url query with {params}");
        self.url_state.write(params);
    }
}

impl<R, U: UrlStateAdapter> Drop for SearchController<R, U> {
    fn drop(&mut self) {
        self.teardown();
    }
}
