//! Per-user search history.
//!
//! Every recommendation request is appended to the requesting user's log.
//! Logs are returned in insertion order; [`recent_first`] reverses them for
//! display.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::lookup_key;
use crate::error::Result;
use crate::flight::FlightParameters;

/// Append-only log of flight-parameter queries, keyed by username.
pub trait HistoryStore {
    /// Append a query to `username`'s log.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn append(&mut self, username: &str, params: &FlightParameters) -> Result<()>;

    /// All queries made by `username`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list(&self, username: &str) -> Result<Vec<FlightParameters>>;
}

/// Reverse a history log so the most recent query comes first, keeping at
/// most `limit` entries (`None` keeps all).
#[must_use]
pub fn recent_first(mut history: Vec<FlightParameters>, limit: Option<usize>) -> Vec<FlightParameters> {
    history.reverse();
    if let Some(limit) = limit {
        history.truncate(limit);
    }
    history
}

/// In-memory history log.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    logs: HashMap<String, Vec<FlightParameters>>,
}

impl MemoryHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, username: &str, params: &FlightParameters) -> Result<()> {
        debug!("Recording search for {}", username);
        self.logs
            .entry(lookup_key(username))
            .or_default()
            .push(*params);
        Ok(())
    }

    fn list(&self, username: &str) -> Result<Vec<FlightParameters>> {
        Ok(self
            .logs
            .get(&lookup_key(username))
            .cloned()
            .unwrap_or_default())
    }
}
