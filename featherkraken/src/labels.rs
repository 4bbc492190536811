//! Display strings for the search form and result list.

use crate::domain::{Airport, ClassType, Flight, LIMIT_STEP, MAX_LIMIT, Trip, TripType};

/// Base URL of the airline logo images, keyed by airline code.
const AIRLINE_LOGO_BASE: &str = "https://images.kiwi.com/airlines/64";

/// Title of the passenger count input.
///
/// An unset (or zero) count shows the bare noun.
///
/// # Examples
///
/// ```
/// use featherkraken::labels::passenger_title;
///
/// assert_eq!(passenger_title(Some(1)), "1 Passenger");
/// assert_eq!(passenger_title(Some(3)), "3 Passengers");
/// assert_eq!(passenger_title(None), "Passengers");
/// ```
pub fn passenger_title(passengers: Option<u32>) -> String {
    match passengers {
        None | Some(0) => "Passengers".to_string(),
        Some(1) => "1 Passenger".to_string(),
        Some(n) => format!("{n} Passengers"),
    }
}

/// Title of the result limit input.
pub fn limit_title(limit: u32) -> String {
    format!("{limit} Results")
}

/// Values offered by the result limit input, from 0 to the maximum.
pub fn limit_options() -> impl Iterator<Item = u32> {
    (0..=MAX_LIMIT).step_by(LIMIT_STEP as usize)
}

/// Entries of the trip type dropdown, in display order.
pub fn trip_type_options() -> Vec<(TripType, &'static str)> {
    TripType::ALL.iter().map(|t| (*t, t.label())).collect()
}

/// Entries of the cabin class dropdown, in display order.
pub fn class_type_options() -> Vec<(ClassType, &'static str)> {
    ClassType::ALL.iter().map(|c| (*c, c.label())).collect()
}

/// Label of an airport in the typeahead options.
pub fn airport_label(airport: &Airport) -> String {
    airport.to_string()
}

/// Logo image URL for an airline code.
pub fn airline_logo_url(code: &str) -> String {
    format!("{AIRLINE_LOGO_BASE}/{code}.png")
}

/// Airports along a flight, e.g. "VIE - FRA - JFK".
///
/// Segments with missing airports are skipped.
pub fn route_label(flight: &Flight) -> String {
    let mut stops: Vec<&str> = Vec::with_capacity(flight.route.len() + 1);
    if let Some(origin) = flight.origin() {
        stops.push(&origin.name);
    }
    for segment in &flight.route {
        if let Some(target) = &segment.target {
            stops.push(&target.name);
        }
    }
    stops.join(" - ")
}

/// Price in euros, as the backend sent it.
pub fn price_label(price: f64) -> String {
    format!("{price} €")
}

/// One-line summary of a trip for the result list.
pub fn trip_summary(trip: &Trip) -> String {
    let mut line = format!(
        "DEPARTURE {} ({})",
        route_label(&trip.outward_flight),
        trip.outward_flight.duration
    );

    if let Some(back) = &trip.return_flight {
        line.push_str(&format!(" | RETURN {} ({})", route_label(back), back.duration));
    }

    if !trip.airline_codes().is_empty() {
        line.push_str(&format!(" | {}", trip.airline_codes().join(", ")));
    }

    line.push_str(&format!(" | {} | {}", price_label(trip.price), trip.link));
    line
}
