//! Circuit breaker state machine implementation.

use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

/// Represents the possible states of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Circuit is closed and operations are allowed.
    Closed,

    /// Circuit is open and operations are rejected.
    Open,

    /// Cooldown has elapsed and calls are admitted to test recovery.
    HalfOpen,
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            State::Closed => write!(f, "closed"),
            State::Open => write!(f, "open"),
            State::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// A state change performed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) struct Transition {
    pub(crate) from: State,
    pub(crate) to: State,
}

/// Returned by [`StateMachine::admit`] when the circuit is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rejected;

/// The breaker's bookkeeping: current state, failure count and the moment
/// the circuit last opened.
///
/// Every method takes the current time explicitly and mutates all fields in a
/// single call, so wrapping the whole struct in one lock keeps the three
/// fields consistent for every observer.
#[derive(Debug)]
pub(crate) struct StateMachine {
    state: State,
    failure_counter: u32,
    last_failure: Option<Instant>,
}

impl StateMachine {
    /// Creates a closed state machine with no recorded failures.
    pub(crate) fn new() -> Self {
        Self {
            state: State::Closed,
            failure_counter: 0,
            last_failure: None,
        }
    }

    pub(crate) fn state(&self) -> State {
        self.state
    }

    pub(crate) fn failure_count(&self) -> u32 {
        self.failure_counter
    }

    /// Decides whether a call may run.
    ///
    /// An open circuit whose cooldown has strictly exceeded `timeout` moves to
    /// half-open and admits the call. A circuit that is still open rejects it.
    pub(crate) fn admit(
        &mut self,
        timeout: Duration,
        now: Instant,
    ) -> Result<Option<Transition>, Rejected> {
        let mut transition = None;

        if self.state == State::Open && self.cooldown_elapsed(timeout, now) {
            transition = self.move_to(State::HalfOpen);
        }

        if self.state == State::Open {
            return Err(Rejected);
        }

        Ok(transition)
    }

    /// Applies the outcome of an admitted call, dispatching on the state
    /// observed now rather than at admission.
    pub(crate) fn record(
        &mut self,
        success: bool,
        threshold: u32,
        now: Instant,
    ) -> Option<Transition> {
        match self.state {
            State::Closed => {
                // Successes leave a partial failure count untouched.
                if success {
                    return None;
                }
                self.failure_counter = self.failure_counter.saturating_add(1);
                if self.failure_counter >= threshold {
                    self.last_failure = Some(now);
                    return self.move_to(State::Open);
                }
                None
            }
            State::HalfOpen => {
                if success {
                    return self.move_to(State::Closed);
                }
                self.last_failure = Some(now);
                self.move_to(State::Open)
            }
            State::Open => None,
        }
    }

    fn cooldown_elapsed(&self, timeout: Duration, now: Instant) -> bool {
        match self.last_failure {
            Some(opened_at) => now.saturating_duration_since(opened_at) > timeout,
            None => true,
        }
    }

    fn move_to(&mut self, to: State) -> Option<Transition> {
        let from = self.state;
        if from == to {
            return None;
        }

        self.state = to;
        if to == State::Closed {
            self.failure_counter = 0;
        }

        Some(Transition { from, to })
    }
}
