//! Search results: trips, flights and route segments.

use serde::{Deserialize, Serialize};

use super::Airport;

/// One leg of a flight between two airports.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Airport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Airport>,
}

impl RouteSegment {
    pub fn new(source: Airport, target: Airport) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
        }
    }
}

/// A flight in one direction, made of one or more segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flight {
    /// Total duration as reported by the backend (e.g. "7h 25m").
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub route: Vec<RouteSegment>,
}

impl Flight {
    /// The airport the flight departs from.
    pub fn origin(&self) -> Option<&Airport> {
        self.route.first()?.source.as_ref()
    }

    /// The airport the flight finally arrives at.
    pub fn destination(&self) -> Option<&Airport> {
        self.route.last()?.target.as_ref()
    }

    /// Number of intermediate stops.
    pub fn stops(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

/// One priced itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub outward_flight: Flight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_flight: Option<Flight>,
    /// Price in euros.
    pub price: f64,
    /// Booking link.
    #[serde(default)]
    pub link: String,
    /// Airline codes operating any segment of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airlines: Option<Vec<String>>,
}

impl Trip {
    /// Airline codes of this trip; empty when the backend sent none.
    pub fn airline_codes(&self) -> &[String] {
        self.airlines.as_deref().unwrap_or_default()
    }
}

/// Response of `/flights`.
///
/// Replaced wholesale by every new search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub trips: Vec<Trip>,
    /// All airports within the search radius of the requested source.
    #[serde(default)]
    pub source_airports: Vec<Airport>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
