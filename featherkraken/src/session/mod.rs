//! Search session.
//!
//! Orchestrates request submission, loading state, airport lookups and
//! facet filtering for one user. Responses are sequenced: a response is
//! applied only if it answers the most recently issued request of its kind.

mod lookup;
mod search_session;
mod sequence;


pub use lookup::{AirportLookup, MIN_QUERY_CHARS};
pub use search_session::{SearchSession, SessionError, SessionState};
pub use sequence::{Completion, LookupTicket, RequestSequence, SearchTicket};
