//! Tunables for a search controller, with environment overrides.

use std::time::Duration;

use portal_common::search_result::{FacetOptionPolicy, FacetOptionSort};
use serde::{Deserialize, Serialize};


pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

pub const DEBOUNCE_ENV: &str = "PORTAL_SEARCH_DEBOUNCE_MS";
pub const FACET_POLICY_ENV: &str = "PORTAL_SEARCH_FACET_POLICY";
pub const OPTION_SORT_ENV: &str = "PORTAL_SEARCH_OPTION_SORT";


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Quiescence window before typed text is committed.
    pub debounce_ms: u64,
    pub facet_option_policy: FacetOptionPolicy,
    pub option_sort: FacetOptionSort,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            facet_option_policy: FacetOptionPolicy::default(),
            option_sort: FacetOptionSort::default(),
        }
    }
}

impl ControllerSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`. Absent or malformed values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(raw) = lookup(DEBOUNCE_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(debounce_ms) => settings.debounce_ms = debounce_ms,
                Err(e) => tracing::warn!("ignoring {DEBOUNCE_ENV}={raw:?}: {e}"),
            }
        }
        if let Some(raw) = lookup(FACET_POLICY_ENV) {
            match raw.parse::<FacetOptionPolicy>() {
                Ok(policy) => settings.facet_option_policy = policy,
                Err(e) => tracing::warn!("ignoring {FACET_POLICY_ENV}: {e}"),
            }
        }
        if let Some(raw) = lookup(OPTION_SORT_ENV) {
            match raw.parse::<FacetOptionSort>() {
                Ok(sort) => settings.option_sort = sort,
                Err(e) => tracing::warn!("ignoring {OPTION_SORT_ENV}: {e}"),
            }
        }
        settings
    }
}
