//! Configuration for circuit breakers.

use std::time::Duration;

use crate::breaker::CircuitBreaker;

const DEFAULT_THRESHOLD: u32 = 5;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating circuit breakers with custom configurations.
///
/// No validation is performed. A threshold of zero trips the circuit on the
/// first failure.
#[derive(Debug, Clone)]
pub struct BreakerBuilder {
    threshold: u32,
    timeout: Duration,
}

impl Default for BreakerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakerBuilder {
    /// Creates a new builder with default settings: 5 failures, 30 second timeout.
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the number of failures that will trip the circuit.
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets how long the circuit stays open before a probe is admitted.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a new circuit breaker with the configured settings.
    pub fn build(self) -> CircuitBreaker {
        CircuitBreaker::new(self.threshold, self.timeout)
    }
}
