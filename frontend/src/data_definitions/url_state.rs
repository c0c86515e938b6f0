//! Narrow access to the page location's query string.

use std::fmt::Display;

use crate::data_definitions::url_param::{decode_component, encode_component};


/// Query-string parameters in URL order. Keys are decoded; values stay
/// percent-encoded because facet values are split on commas before decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pairs: Vec<(String, String)>,
}

impl RawParams {
    /// Parses `?a=1&b=2` or `a=1&b=2`. Pieces with an empty or undecodable key are skipped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|piece| !piece.is_empty())
            .filter_map(|piece| {
                let (raw_key, raw_value) = piece.split_once('=').unwrap_or((piece, ""));
                let Some(key) = decode_component(raw_key).filter(|key| !key.is_empty()) else {
                    tracing::debug!("dropping url parameter with malformed key: {piece:?}");
                    return None;
                };
                Some((key, raw_value.to_string()))
            })
            .collect();
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// First raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends a parameter; `raw_value` must already be encoded.
    pub fn push(&mut self, key: impl Into<String>, raw_value: impl Into<String>) {
        self.pairs.push((key.into(), raw_value.into()));
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.pairs.retain(|(k, _)| keep(k));
    }

    pub fn extend(&mut self, other: RawParams) {
        self.pairs.extend(other.pairs);
    }
}

impl Display for RawParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (key, raw_value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode_component(key), raw_value)?;
        }
        Ok(())
    }
}


/// Where the controller reads its initial state from and writes committed state to.
///
/// `write` replaces the current query string; it must not add a history entry.
pub trait UrlStateAdapter {
    fn read(&self) -> RawParams;
    fn write(&mut self, params: RawParams);
}

impl<T: UrlStateAdapter + ?Sized> UrlStateAdapter for &mut T {
    fn read(&self) -> RawParams {
        (**self).read()
    }

    fn write(&mut self, params: RawParams) {
        (**self).write(params)
    }
}


/// In-memory location, for tests and headless use. Keeps a log of replacements.
#[derive(Debug, Clone, Default)]
pub struct MemoryUrlState {
    current: String,
    replacements: Vec<String>,
}

impl MemoryUrlState {
    pub fn new(query: impl Into<String>) -> Self {
        Self { current: query.into(), replacements: Vec::new() }
    }

    /// The current query string, without a leading `?`.
    pub fn query(&self) -> &str {
        self.current.strip_prefix('?').unwrap_or(&self.current)
    }

    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }

    pub fn write_count(&self) -> usize {
        self.replacements.len()
    }
}

impl UrlStateAdapter for MemoryUrlState {
    fn read(&self) -> RawParams {
        RawParams::parse(&self.current)
    }

    fn write(&mut self, params: RawParams) {
        self.current = params.to_string();
        self.replacements.push(self.current.clone());
    }
}
