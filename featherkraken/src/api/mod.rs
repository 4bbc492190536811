//! Flight search API.
//!
//! The backend is an external collaborator modelled as two request/response
//! contracts. [`FlightApi`] is the seam the session talks through;
//! [`FlightClient`] is the HTTP implementation.

mod client;
mod config;
mod error;

pub use client::FlightClient;
pub use config::{API_URL_VAR, ApiConfig, ConfigError, TIMEOUT_VAR};
pub use error::{ApiError, ErrorKind};

use crate::domain::{Airport, SearchRequest, SearchResult};

/// Trait for the search backend.
///
/// This abstraction allows the session to be tested with mock data.
#[allow(async_fn_in_trait)]
pub trait FlightApi {
    /// Airports matching free text typed by the user.
    async fn search_airports(&self, query: &str) -> Result<Vec<Airport>, ApiError>;

    /// Trips matching a complete search request.
    async fn search_flights(&self, request: &SearchRequest) -> Result<SearchResult, ApiError>;
}
