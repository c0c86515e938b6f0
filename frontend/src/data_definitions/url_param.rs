//! URL parameter helpers and the query-string form of an [`ActiveSelection`].
//!
//! `q=<free text>` plus one `<facet key>=<v1>,<v2>` per active facet. Each
//! value is percent-encoded on its own, so commas inside values survive.

use std::{convert::Infallible, fmt::Display, str::FromStr};

pub use portal_common::search_query::QUERY_PARAM;
use portal_common::search_query::{ActiveSelection, is_blank_value};
use serde::{Deserialize, Serialize};

use crate::data_definitions::url_state::RawParams;


const VALUE_SEPARATOR: char = ',';


pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Percent-decodes one component, treating `+` as a space.
/// Returns `None` for broken escapes or bytes that are not UTF-8.
pub fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let escape = bytes.get(index + 1..index + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            index += 3;
        } else {
            index += 1;
        }
    }
    urlencoding::decode(&raw.replace('+', " ")).ok().map(|decoded| decoded.into_owned())
}

pub fn selection_to_params(selection: &ActiveSelection) -> RawParams {
    let mut params = RawParams::default();
    if selection.has_query() {
        params.push(QUERY_PARAM, encode_component(&selection.query_string));
    }
    for (facet_key, values) in &selection.facet_filters {
        if facet_key == QUERY_PARAM {
            tracing::warn!("facet key {QUERY_PARAM:?} collides with the query parameter, not written to the url");
            continue;
        }
        let raw_values = values
            .iter()
            .filter(|value| !is_blank_value(value))
            .map(|value| encode_component(value))
            .collect::<Vec<_>>();
        if raw_values.is_empty() {
            continue;
        }
        params.push(facet_key.as_str(), raw_values.join(","));
    }
    params
}

/// Reads a selection back from URL parameters. Never fails: malformed
/// values are dropped, and a facet left with no valid values is omitted.
/// Every non-`q` key is kept as a facet; callers drop the ones they do not know.
pub fn selection_from_params(params: &RawParams) -> ActiveSelection {
    let mut selection = ActiveSelection::default();
    let mut seen_query = false;
    for (key, raw_value) in params.iter() {
        if key == QUERY_PARAM {
            if seen_query {
                continue;
            }
            match decode_component(raw_value) {
                Some(query) => {
                    selection.query_string = query;
                    seen_query = true;
                }
                None => tracing::debug!("dropping malformed query parameter {raw_value:?}"),
            }
            continue;
        }
        let values = raw_value
            .split(VALUE_SEPARATOR)
            .filter_map(|raw| {
                let decoded = decode_component(raw);
                if decoded.is_none() {
                    tracing::debug!("dropping malformed value {raw:?} for facet {key:?}");
                }
                decoded
            })
            .filter(|value| !is_blank_value(value))
            .collect::<Vec<_>>();
        if values.is_empty() {
            continue;
        }
        let entry = selection.facet_filters.entry(key.to_string()).or_default();
        entry.extend(values);
    }
    selection
}


/// Newtype carrying a value through the URL via `Display` and `FromStr`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlParam<T>(pub T);

impl<T> From<T> for UrlParam<T> {
    fn from(value: T) -> Self {
        UrlParam(value)
    }
}

impl Display for UrlParam<ActiveSelection> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", selection_to_params(&self.0))
    }
}

impl FromStr for UrlParam<ActiveSelection> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UrlParam(selection_from_params(&RawParams::parse(s))))
    }
}
