//! Finite State Machine for the release list load

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::DashboardError;

/// Load state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet
    Idle,

    /// Fetch in flight
    Loading,

    /// Last fetch succeeded
    Loaded,

    /// Last fetch failed
    Failed,
}

/// Load event
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// A fetch was started (initial load, retry or refresh)
    Start,

    /// The fetch completed successfully
    Succeeded,

    /// The fetch failed
    Failed(String),
}

/// Load FSM
#[derive(Debug, Clone)]
pub struct LoadFsm {
    state: LoadState,
    error: Option<String>,
    attempts: u32,
    loaded_at: Option<DateTime<Utc>>,
}

impl LoadFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            error: None,
            attempts: 0,
            loaded_at: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Get error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches started since the last success
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time of the last successful load
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Begin a fetch. Valid from every state; supersedes one in flight.
    pub fn start(&mut self) {
        self.error = None;
        self.attempts += 1;
        self.state = LoadState::Loading;
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: LoadEvent) -> Result<(), DashboardError> {
        // A new fetch may start from anywhere; it supersedes one in flight
        if matches!(event, LoadEvent::Start) {
            self.start();
            return Ok(());
        }

        let new_state = match (&self.state, &event) {
            // From Loading
            (LoadState::Loading, LoadEvent::Succeeded) => {
                self.attempts = 0;
                self.loaded_at = Some(Utc::now());
                LoadState::Loaded
            }
            (LoadState::Loading, LoadEvent::Failed(err)) => {
                self.error = Some(err.clone());
                LoadState::Failed
            }

            // Invalid transitions
            (state, event) => {
                return Err(DashboardError::InvalidTransition(format!(
                    "{:?} -> {:?}",
                    state, event
                )));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for LoadFsm {
    fn default() -> Self {
        Self::new()
    }
}
