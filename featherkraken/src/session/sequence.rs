//! Request sequencing.
//!
//! Responses can complete in any order. Each request class keeps a counter;
//! a response is applied only if it answers the most recently issued request.

use crate::domain::SearchRequest;

/// Monotonic counter for one request class.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Returns true if `seq` is the most recently issued number.
    pub fn is_latest(&self, seq: u64) -> bool {
        seq != 0 && seq == self.latest
    }

    /// The most recently issued number, if any.
    pub fn latest(&self) -> Option<u64> {
        (self.latest != 0).then_some(self.latest)
    }
}

/// Proof that a search was started, carrying the request to send.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub(super) seq: u64,
    request: SearchRequest,
}

impl SearchTicket {
    pub(super) fn new(seq: u64, request: SearchRequest) -> Self {
        Self { seq, request }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The request snapshot to post.
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Proof that an airport lookup was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub(super) seq: u64,
    query: String,
}

impl LookupTicket {
    pub(super) fn new(seq: u64, query: String) -> Self {
        Self { seq, query }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The text to look up.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What happened to a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response answered the latest request and was applied.
    Applied,
    /// A newer request had been issued; the response was dropped.
    Discarded,
}
