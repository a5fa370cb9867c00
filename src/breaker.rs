//! Core circuit breaker implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::{BreakerError, BreakerResult};
use crate::state::{State, StateMachine, Transition};

/// Inner state of the circuit breaker, shared between clones.
#[derive(Debug)]
struct BreakerInner {
    threshold: u32,
    timeout: Duration,
    machine: Mutex<StateMachine>,
}

/// A circuit breaker that can wrap function calls to prevent cascading failures.
///
/// The breaker counts failures while closed and opens once `threshold` of
/// them have been observed. While open every call is rejected with
/// [`BreakerError::Open`] without running the operation. The first call that
/// arrives after `timeout` has elapsed moves the breaker to half-open and is
/// run as a probe: success closes the circuit, failure opens it again.
///
/// The lock only guards the bookkeeping before and after the call. The
/// operation itself always runs unlocked, so several calls can be in flight
/// at once, including several half-open probes.
///
/// Cloning is cheap and every clone shares the same state.
///
/// # Example
///
/// ```rust
/// use cbreaker::{BreakerError, CircuitBreaker};
/// use std::time::Duration;
///
/// let breaker = CircuitBreaker::new(1, Duration::from_secs(30));
///
/// let result = breaker.call(|| Err::<(), _>("backend down"));
/// assert_eq!(result, Err(BreakerError::Operation("backend down")));
///
/// let result = breaker.call(|| Ok::<_, &str>(42));
/// assert_eq!(result, Err(BreakerError::Open));
/// ```
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    inner: Arc<BreakerInner>,
}

impl CircuitBreaker {
    /// Creates a circuit breaker that opens after `threshold` failures and
    /// stays open for at least `timeout`.
    pub fn new(threshold: u32, timeout: Duration) -> Self {
        let inner = BreakerInner {
            threshold,
            timeout,
            machine: Mutex::new(StateMachine::new()),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates a new builder for customizing a circuit breaker.
    pub fn builder() -> crate::config::BreakerBuilder {
        crate::config::BreakerBuilder::new()
    }

    /// Gets the current state of the circuit breaker.
    pub fn current_state(&self) -> State {
        self.inner.machine.lock().state()
    }

    /// Gets the number of failures counted since the circuit last closed.
    pub fn failure_count(&self) -> u32 {
        self.inner.machine.lock().failure_count()
    }

    /// Failure count that trips the circuit.
    pub fn threshold(&self) -> u32 {
        self.inner.threshold
    }

    /// Minimum time the circuit stays open before a probe is admitted.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Executes a function wrapped by the circuit breaker.
    ///
    /// Returns [`BreakerError::Open`] without calling `f` if the circuit is
    /// open. Otherwise `f` runs exactly once and its result is returned, with
    /// an error wrapped in [`BreakerError::Operation`] unchanged.
    pub fn call<F, T, E>(&self, f: F) -> BreakerResult<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.pre_call::<E>()?;

        let result = f();

        self.post_call(result.is_ok());

        result.map_err(BreakerError::Operation)
    }

    /// Checks if a call is allowed based on the current state.
    fn pre_call<E>(&self) -> Result<(), BreakerError<E>> {
        let admitted = self
            .inner
            .machine
            .lock()
            .admit(self.inner.timeout, Instant::now());

        match admitted {
            Ok(transition) => {
                self.report(transition);
                Ok(())
            }
            Err(_) => Err(BreakerError::Open),
        }
    }

    /// Processes the result of a call to potentially change state.
    fn post_call(&self, success: bool) {
        let transition =
            self.inner
                .machine
                .lock()
                .record(success, self.inner.threshold, Instant::now());

        self.report(transition);
    }

    // Called with the lock released.
    #[cfg(feature = "tracing")]
    fn report(&self, transition: Option<Transition>) {
        if let Some(Transition { from, to }) = transition {
            tracing::debug!(
                from = %from,
                to = %to,
                threshold = self.inner.threshold,
                "circuit breaker state transition"
            );
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn report(&self, _transition: Option<Transition>) {}
}

// Implement Async support when the feature is enabled
#[cfg(feature = "async")]
impl CircuitBreaker {
    /// Executes an async function wrapped by the circuit breaker.
    ///
    /// Same contract as [`CircuitBreaker::call`]. The lock is never held
    /// while the future is awaited.
    pub async fn call_async<F, Fut, T, E>(&self, f: F) -> BreakerResult<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
    {
        self.pre_call::<E>()?;

        let result = f().await;

        self.post_call(result.is_ok());

        result.map_err(BreakerError::Operation)
    }
}
