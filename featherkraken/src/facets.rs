//! Facet derivation.
//!
//! A facet is a filterable dimension of the result (airline, source
//! airport) with one toggle per observed value. Facets are rebuilt from
//! scratch for every new result; toggles never carry over.

use indexmap::IndexMap;

use crate::domain::SearchResult;

/// Enabled state per facet value, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetSelection {
    entries: IndexMap<String, bool>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key as enabled, unless it is already present.
    fn insert_enabled(&mut self, key: &str) {
        if !self.entries.contains_key(key) {
            self.entries.insert(key.to_string(), true);
        }
    }

    /// Enabled state of a key, or `None` if the key is not a facet value.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// Update a known key.
    ///
    /// Returns false, and changes nothing, if the key is unknown.
    pub fn set(&mut self, key: &str, enabled: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(value) => {
                *value = enabled;
                true
            }
            None => false,
        }
    }

    /// Facet values in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values with their enabled state.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if no value is disabled.
    pub fn all_enabled(&self) -> bool {
        self.entries.values().all(|&enabled| enabled)
    }

    /// Returns true if there is more than one value to choose between.
    ///
    /// A single-valued facet cannot narrow anything useful, so it is not
    /// offered as a filter.
    pub fn offers_choice(&self) -> bool {
        self.entries.len() > 1
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for FacetSelection {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Distinct airline codes across all trips, each enabled.
///
/// Trips without an airline list contribute nothing.
pub fn build_airline_facets(result: &SearchResult) -> FacetSelection {
    let mut selection = FacetSelection::new();
    for trip in &result.trips {
        for code in trip.airline_codes() {
            selection.insert_enabled(code);
        }
    }
    selection
}

/// The result's source airports by name, each enabled.
///
/// Built from `source_airports`, not from the trips' routes.
pub fn build_airport_facets(result: &SearchResult) -> FacetSelection {
    let mut selection = FacetSelection::new();
    for airport in &result.source_airports {
        if !airport.name.is_empty() {
            selection.insert_enabled(&airport.name);
        }
    }
    selection
}

/// Both facets of one result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetIndex {
    pub airlines: FacetSelection,
    pub airports: FacetSelection,
}

impl FacetIndex {
    /// Derive fresh, all-enabled facets from a result.
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            airlines: build_airline_facets(result),
            airports: build_airport_facets(result),
        }
    }
}
