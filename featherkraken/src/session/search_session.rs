//! Search session state machine.
//!
//! Ties the request builder, the search API, facet derivation and trip
//! filtering together. All handlers run on one logical thread; the only
//! suspension points are the API calls, which are modelled as a
//! begin/complete pair so out-of-order completions can be detected.

use tracing::{debug, warn};

use crate::api::{ApiError, ErrorKind, FlightApi};
use crate::builder::SearchRequestBuilder;
use crate::domain::{Airport, RequestError, SearchRequest, SearchResult, Trip};
use crate::facets::FacetIndex;
use crate::filter::visible_indices;

use super::lookup::AirportLookup;
use super::sequence::{Completion, LookupTicket, RequestSequence, SearchTicket};

/// Error surfaced by the session.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The request is incomplete or out of range
    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// The search API failed
    #[error("search API failed: {0}")]
    Api(#[from] ApiError),
}

impl SessionError {
    /// The API failure class, if this error came from the API.
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Api(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Where the session is in the search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A search with this sequence number is in flight.
    Searching { seq: u64 },
}

/// One user's search form, result and facet state.
#[derive(Debug, Default)]
pub struct SearchSession {
    builder: SearchRequestBuilder,
    state: SessionState,
    searches: RequestSequence,
    result: Option<SearchResult>,
    facets: FacetIndex,
    visible: Vec<usize>,
    lookup: AirportLookup,
    last_error: Option<SessionError>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an existing request.
    pub fn with_request(request: SearchRequest) -> Self {
        Self {
            builder: SearchRequestBuilder::from_request(request),
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.state, SessionState::Searching { .. })
    }

    pub fn request(&self) -> &SearchRequest {
        self.builder.request()
    }

    pub fn builder(&self) -> &SearchRequestBuilder {
        &self.builder
    }

    /// Edit the request. Edits are allowed in any state and never affect a
    /// search already in flight.
    pub fn builder_mut(&mut self) -> &mut SearchRequestBuilder {
        &mut self.builder
    }

    /// The most recent successful result.
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    /// Trips of the current result that pass the facets, in result order.
    pub fn filtered_trips(&self) -> Vec<&Trip> {
        match &self.result {
            Some(result) => self.visible.iter().map(|&i| &result.trips[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Error of the most recent search, cleared when the next one starts.
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Airport typeahead options.
    pub fn options(&self) -> &[Airport] {
        self.lookup.options()
    }

    /// Start a search with a snapshot of the current request.
    ///
    /// A search already in flight is superseded: its ticket stops being the
    /// latest, so its response is discarded when it arrives. An incomplete
    /// request returns `InvalidRequest` and changes nothing.
    pub fn begin_search(&mut self) -> Result<SearchTicket, SessionError> {
        let request = self.builder.snapshot();
        request.validate()?;

        if let SessionState::Searching { seq } = self.state {
            debug!(seq, "superseding search in flight");
        }

        let seq = self.searches.issue();
        self.state = SessionState::Searching { seq };
        self.last_error = None;
        debug!(seq, "search started");

        Ok(SearchTicket::new(seq, request))
    }

    /// Abandon a search without a response.
    ///
    /// Returns the session to idle if `ticket` is the search in flight.
    /// Returns false, and changes nothing, for a superseded or completed
    /// ticket.
    pub fn cancel_search(&mut self, ticket: &SearchTicket) -> bool {
        self.cancel_seq(ticket.seq)
    }

    fn cancel_seq(&mut self, seq: u64) -> bool {
        match self.state {
            SessionState::Searching { seq: current } if current == seq => {
                debug!(seq, "search cancelled");
                self.state = SessionState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Apply the response to a search.
    ///
    /// On success the result replaces the previous one, facets are rebuilt
    /// all-enabled and every trip becomes visible. On failure the previous
    /// result and visible trips are kept and the error is returned. Either
    /// way the session goes back to idle.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<SearchResult, ApiError>,
    ) -> Result<Completion, SessionError> {
        let current = matches!(self.state, SessionState::Searching { seq } if seq == ticket.seq);
        if !current || !self.searches.is_latest(ticket.seq) {
            debug!(seq = ticket.seq, "dropping stale search response");
            return Ok(Completion::Discarded);
        }

        self.state = SessionState::Idle;

        match outcome {
            Ok(result) => {
                debug!(
                    seq = ticket.seq,
                    trips = result.trips.len(),
                    "search result applied"
                );
                self.facets = FacetIndex::from_result(&result);
                self.visible = (0..result.trips.len()).collect();
                self.result = Some(result);
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(seq = ticket.seq, kind = %e.kind(), error = %e, "search failed");
                let err = SessionError::Api(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Run one search against `api`.
    ///
    /// If the returned future is dropped before the response arrives, the
    /// search is cancelled and the session is idle again.
    pub async fn submit<A: FlightApi>(&mut self, api: &A) -> Result<Completion, SessionError> {
        let ticket = self.begin_search()?;
        let pending = PendingSearch {
            seq: ticket.seq,
            session: self,
        };
        let outcome = api.search_flights(ticket.request()).await;
        pending.session.complete_search(ticket, outcome)
    }

    /// Enable or disable one airline and refilter.
    ///
    /// Returns false if the code is not an airline of the current result.
    pub fn toggle_airline_facet(&mut self, code: &str, enabled: bool) -> bool {
        let known = self.facets.airlines.set(code, enabled);
        if !known {
            debug!(code, "ignoring toggle of unknown airline");
        }
        self.refilter();
        known
    }

    /// Enable or disable one source airport and refilter.
    ///
    /// Returns false if the name is not a source airport of the current result.
    pub fn toggle_airport_facet(&mut self, name: &str, enabled: bool) -> bool {
        let known = self.facets.airports.set(name, enabled);
        if !known {
            debug!(name, "ignoring toggle of unknown airport");
        }
        self.refilter();
        known
    }

    fn refilter(&mut self) {
        if let Some(result) = &self.result {
            self.visible =
                visible_indices(&result.trips, &self.facets.airlines, &self.facets.airports);
        }
    }

    /// Start an airport lookup. Returns `None` for queries under two characters.
    pub fn begin_lookup(&mut self, query: &str) -> Option<LookupTicket> {
        self.lookup.begin(query)
    }

    /// Apply an airport lookup response if it answers the latest lookup.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<Vec<Airport>, ApiError>,
    ) -> Result<Completion, SessionError> {
        Ok(self.lookup.complete(ticket, outcome)?)
    }

    /// Look up airports for `query` and return the resulting options.
    ///
    /// Short queries make no request and return the current options.
    pub async fn lookup_airports<A: FlightApi>(
        &mut self,
        api: &A,
        query: &str,
    ) -> Result<&[Airport], SessionError> {
        if let Some(ticket) = self.begin_lookup(query) {
            let outcome = api.search_airports(ticket.query()).await;
            self.complete_lookup(ticket, outcome)?;
        }
        Ok(self.options())
    }
}

/// Cancels its search on drop unless the search has completed.
struct PendingSearch<'a> {
    session: &'a mut SearchSession,
    seq: u64,
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        // No-op once complete_search has run: the state is no longer this seq
        self.session.cancel_seq(self.seq);
    }
}
