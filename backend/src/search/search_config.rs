//! Per-entity search configuration: which fields feed free-text matching and
//! which fields are facets.

use std::fmt;

use portal_common::search_query::QUERY_PARAM;


/// What an accessor found on a record: nothing, one value, or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValue<'r> {
    #[default]
    Missing,
    One(&'r str),
    Many(&'r [String]),
}

impl<'r> FieldValue<'r> {
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Every value carried by the field. Empty for `Missing`.
    pub fn values(self) -> impl Iterator<Item = &'r str> {
        const NONE: &[String] = &[];
        let (one, many): (Option<&'r str>, &'r [String]) = match self {
            Self::Missing => (None, NONE),
            Self::One(value) => (Some(value), NONE),
            Self::Many(values) => (None, values),
        };
        one.into_iter().chain(many.iter().map(String::as_str))
    }
}

impl<'r> From<&'r str> for FieldValue<'r> {
    fn from(value: &'r str) -> Self {
        Self::One(value)
    }
}

impl<'r> From<&'r String> for FieldValue<'r> {
    fn from(value: &'r String) -> Self {
        Self::One(value.as_str())
    }
}

impl<'r> From<&'r Option<String>> for FieldValue<'r> {
    fn from(value: &'r Option<String>) -> Self {
        match value {
            Some(value) => Self::One(value.as_str()),
            None => Self::Missing,
        }
    }
}

impl<'r> From<Option<&'r str>> for FieldValue<'r> {
    fn from(value: Option<&'r str>) -> Self {
        value.map_or(Self::Missing, Self::One)
    }
}

impl<'r> From<&'r [String]> for FieldValue<'r> {
    fn from(values: &'r [String]) -> Self {
        Self::Many(values)
    }
}

impl<'r> From<&'r Vec<String>> for FieldValue<'r> {
    fn from(values: &'r Vec<String>) -> Self {
        Self::Many(values.as_slice())
    }
}


type Accessor<R> = Box<dyn for<'r> Fn(&'r R) -> FieldValue<'r> + Send + Sync>;

/// A named facet and how to read its value(s) from a record.
pub struct FacetDefinition<R> {
    key: String,
    accessor: Accessor<R>,
}

impl<R> FacetDefinition<R> {
    pub fn new<F>(key: impl Into<String>, accessor: F) -> Self
    where
        F: for<'r> Fn(&'r R) -> FieldValue<'r> + Send + Sync + 'static,
    {
        Self { key: key.into(), accessor: Box::new(accessor) }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn resolve<'r>(&self, record: &'r R) -> FieldValue<'r> {
        (self.accessor)(record)
    }
}

impl<R> fmt::Debug for FacetDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetDefinition").field("key", &self.key).finish_non_exhaustive()
    }
}


/// Declares, for one record type, the ordered free-text fields and the facets.
///
/// Supplied once per search surface; the engine never hard-codes entity fields.
pub struct SearchConfig<R> {
    text_fields: Vec<Accessor<R>>,
    facets: Vec<FacetDefinition<R>>,
}

impl<R> Default for SearchConfig<R> {
    fn default() -> Self {
        Self { text_fields: Vec::new(), facets: Vec::new() }
    }
}

impl<R> SearchConfig<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field to the searchable text projection.
    pub fn text_field<F>(mut self, accessor: F) -> Self
    where
        F: for<'r> Fn(&'r R) -> FieldValue<'r> + Send + Sync + 'static,
    {
        self.text_fields.push(Box::new(accessor));
        self
    }

    /// Declares a facet. A later definition with the same key replaces the earlier one.
    ///
    /// # Panics
    ///
    /// If `key` is empty or is the free-text URL parameter `q`; neither could
    /// be written to the URL.
    pub fn facet<F>(mut self, key: impl Into<String>, accessor: F) -> Self
    where
        F: for<'r> Fn(&'r R) -> FieldValue<'r> + Send + Sync + 'static,
    {
        let definition = FacetDefinition::new(key, accessor);
        assert!(
            !definition.key.is_empty() && definition.key != QUERY_PARAM,
            "facet key {:?} is reserved or empty",
            definition.key
        );
        self.facets.retain(|existing| existing.key != definition.key);
        self.facets.push(definition);
        self
    }

    pub fn facets(&self) -> &[FacetDefinition<R>] {
        &self.facets
    }

    pub fn facet_definition(&self, key: &str) -> Option<&FacetDefinition<R>> {
        self.facets.iter().find(|facet| facet.key == key)
    }

    pub fn has_facet(&self, key: &str) -> bool {
        self.facet_definition(key).is_some()
    }

    pub fn facet_keys(&self) -> impl Iterator<Item = &str> {
        self.facets.iter().map(|facet| facet.key.as_str())
    }

    pub(crate) fn text_values<'r>(&self, record: &'r R) -> impl Iterator<Item = FieldValue<'r>> {
        self.text_fields.iter().map(move |accessor| accessor(record))
    }
}

impl<R> fmt::Debug for SearchConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("text_fields", &self.text_fields.len())
            .field("facets", &self.facets)
            .finish()
    }
}
