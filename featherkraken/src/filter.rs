//! Trip filtering by facet selections.
//!
//! The visible trip list is a pure function of the trips and the two facet
//! selections. Output order is input order, and trips are returned by
//! reference (or index), never copied.

use crate::domain::Trip;
use crate::facets::FacetSelection;

fn enabled(filter: &FacetSelection, key: &str) -> bool {
    filter.get(key).unwrap_or(true)
}

/// Whether a trip passes the airline and airport facets.
///
/// A value missing from its facet counts as enabled on both axes. Only an
/// explicit `false` excludes a trip.
pub fn keeps(trip: &Trip, airline_filter: &FacetSelection, airport_filter: &FacetSelection) -> bool {
    let mut keep = trip
        .airline_codes()
        .iter()
        .all(|code| enabled(airline_filter, code));

    // Outward leg: the airport the trip starts from
    if let Some(origin) = trip.outward_flight.origin() {
        keep &= enabled(airport_filter, &origin.name);
    }

    // Return leg: the airport the trip comes back to
    if let Some(destination) = trip.return_flight.as_ref().and_then(|f| f.destination()) {
        keep &= enabled(airport_filter, &destination.name);
    }

    keep
}

/// Indices of the trips that pass the filters, in input order.
pub fn visible_indices(
    trips: &[Trip],
    airline_filter: &FacetSelection,
    airport_filter: &FacetSelection,
) -> Vec<usize> {
    trips
        .iter()
        .enumerate()
        .filter(|(_, trip)| keeps(trip, airline_filter, airport_filter))
        .map(|(idx, _)| idx)
        .collect()
}

/// The trips that pass the filters, in input order.
pub fn apply<'a>(
    trips: &'a [Trip],
    airline_filter: &FacetSelection,
    airport_filter: &FacetSelection,
) -> Vec<&'a Trip> {
    trips
        .iter()
        .filter(|trip| keeps(trip, airline_filter, airport_filter))
        .collect()
}
