//! Re-exports common types for convenient usage.
//!
//! # Example
//! ```rust
//! use cbreaker::prelude::*;
//! use std::time::Duration;
//!
//! let breaker = CircuitBreaker::new(3, Duration::from_secs(1));
//! assert_eq!(breaker.current_state(), State::Closed);
//! ```

pub use crate::breaker::CircuitBreaker;
pub use crate::config::BreakerBuilder;
pub use crate::error::{BreakerError, BreakerResult};
pub use crate::state::State;
