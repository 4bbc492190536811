//! Airport typeahead options.

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::domain::Airport;

use super::sequence::{Completion, LookupTicket, RequestSequence};

/// Shortest query that triggers a lookup.
pub const MIN_QUERY_CHARS: usize = 2;

/// Options offered by the airport typeahead.
///
/// Lookups may resolve out of order; only the latest issued lookup may
/// replace the options.
#[derive(Debug, Clone, Default)]
pub struct AirportLookup {
    sequence: RequestSequence,
    options: Vec<Airport>,
}

impl AirportLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current options.
    pub fn options(&self) -> &[Airport] {
        &self.options
    }

    /// Start a lookup for `query`.
    ///
    /// Returns `None` if the query is too short to look up.
    pub fn begin(&mut self, query: &str) -> Option<LookupTicket> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return None;
        }

        let seq = self.sequence.issue();
        Some(LookupTicket::new(seq, query.to_string()))
    }

    /// Apply a lookup response if it answers the latest lookup.
    ///
    /// A stale response is dropped whether it succeeded or failed. A failed
    /// latest lookup leaves the current options in place.
    pub fn complete(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<Vec<Airport>, ApiError>,
    ) -> Result<Completion, ApiError> {
        if !self.sequence.is_latest(ticket.seq) {
            debug!(seq = ticket.seq, query = ticket.query(), "dropping stale airport lookup");
            return Ok(Completion::Discarded);
        }

        match outcome {
            Ok(airports) => {
                debug!(query = ticket.query(), count = airports.len(), "airport options updated");
                self.options = airports;
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(query = ticket.query(), error = %e, "airport lookup failed");
                Err(e)
            }
        }
    }
}
