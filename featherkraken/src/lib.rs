//! Flight search core.
//!
//! Builds search requests from incremental form edits, keeps return dates
//! from preceding departures, derives airline and airport facets from a
//! result, and filters the result's trips by those facets without asking
//! the backend again.

pub mod api;
pub mod builder;
pub mod cache;
pub mod dates;
pub mod domain;
pub mod facets;
pub mod filter;
pub mod labels;
pub mod session;
