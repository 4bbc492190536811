//! Domain types for flight search.
//!
//! Value types exchanged with the search backend: airports, travel dates,
//! the search request and the search result. Dates are typed internally and
//! only cross the wire as `DD.MM.YYYY` strings.

mod airport;
mod date;
mod request;
mod trip;

pub use airport::Airport;
pub use date::{InvalidDate, Timespan, TravelDate};
pub use request::{
    ClassType, DEFAULT_LIMIT, LIMIT_STEP, MAX_LIMIT, MAX_STOPS, RequestError, RequestField,
    SearchRequest, TripType, UnknownVariant,
};
pub use trip::{Flight, RouteSegment, SearchResult, Trip};
