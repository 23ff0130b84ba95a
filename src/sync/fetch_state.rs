use std::fmt;

use thiserror::Error;
use tracing::debug;

/// What a view asked the fetch machine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Mount,
    Success,
    Failure,
    Retry,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::Mount => "mount",
            Trigger::Success => "resolve",
            Trigger::Failure => "fail",
            Trigger::Retry => "retry",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Cannot {trigger} a list that is {from}")]
    InvalidTransition { from: &'static str, trigger: Trigger },
}

/// Load state of a list-consuming view
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Errored(String),
}

impl<T> FetchState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Ready(_) => "ready",
            FetchState::Errored(_) => "errored",
        }
    }
}

/// Identifies one entry into `Loading`.
///
/// Only the ticket of the latest load may resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Whether a resolved load changed the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The load was superseded or cancelled, its result was dropped
    Discarded,
}

/// `FetchState` plus the bookkeeping that lets stale results be dropped.
#[derive(Debug)]
pub struct FetchTracker<T> {
    state: FetchState<T>,
    generation: u64,
    pending: Option<LoadTicket>,
}

impl<T> FetchTracker<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Idle -> Loading
    pub fn mount(&mut self) -> Result<LoadTicket, StateError> {
        match self.state {
            FetchState::Idle => Ok(self.begin_load()),
            _ => Err(self.invalid(Trigger::Mount)),
        }
    }

    /// Ready | Errored -> Loading
    pub fn retry(&mut self) -> Result<LoadTicket, StateError> {
        match self.state {
            FetchState::Ready(_) | FetchState::Errored(_) => Ok(self.begin_load()),
            _ => Err(self.invalid(Trigger::Retry)),
        }
    }

    /// Loading -> Ready(data)
    pub fn succeed(&mut self, ticket: LoadTicket, data: T) -> Result<Applied, StateError> {
        if self.pending != Some(ticket) {
            debug!(?ticket, "discarding stale load result");
            return Ok(Applied::Discarded);
        }
        if !self.is_loading() {
            return Err(self.invalid(Trigger::Success));
        }
        self.pending = None;
        self.state = FetchState::Ready(data);
        debug!("fetch state: loading -> ready");
        Ok(Applied::Applied)
    }

    /// Loading -> Errored(message)
    pub fn fail(&mut self, ticket: LoadTicket, message: impl Into<String>) -> Result<Applied, StateError> {
        if self.pending != Some(ticket) {
            debug!(?ticket, "discarding stale load failure");
            return Ok(Applied::Discarded);
        }
        if !self.is_loading() {
            return Err(self.invalid(Trigger::Failure));
        }
        self.pending = None;
        self.state = FetchState::Errored(message.into());
        debug!("fetch state: loading -> errored");
        Ok(Applied::Applied)
    }

    /// View went away: forget the outstanding load and start over from Idle.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.state = FetchState::Idle;
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        debug!(from = self.state.name(), "fetch state -> loading");
        self.pending = Some(ticket);
        self.state = FetchState::Loading;
        ticket
    }

    fn invalid(&self, trigger: Trigger) -> StateError {
        StateError::InvalidTransition {
            from: self.state.name(),
            trigger,
        }
    }
}

impl<T> Default for FetchTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}
