//! # cbreaker
//!
//! A minimal, thread-safe circuit breaker that counts failures and blocks
//! calls for a cooldown period once a threshold is reached.
//!
//! ## What is a Circuit Breaker?
//!
//! The Circuit Breaker pattern protects callers from wasting work on an
//! operation that is likely to fail, and gives a degraded dependency time to
//! recover. It operates in three states:
//!
//! - **Closed**: Normal operation. Calls pass through and failures are counted.
//! - **Open**: Calls are immediately rejected without reaching the resource.
//! - **Half-Open**: Once the timeout has elapsed, the next call is let through
//!   as a probe. Success closes the circuit, failure opens it again.
//!
//! ```text
//! Closed   --[failures reach threshold]--> Open
//! Open     --[timeout exceeded, call]----> HalfOpen
//! HalfOpen --[call succeeds]-------------> Closed
//! HalfOpen --[call fails]----------------> Open
//! ```
//!
//! A success while closed does not reset the failure count. Only closing the
//! circuit from half-open starts a fresh count.
//!
//! ## Basic Usage
//!
//! ```rust
//! use cbreaker::{BreakerError, CircuitBreaker};
//! use std::error::Error;
//! use std::fmt;
//! use std::time::Duration;
//!
//! #[derive(Debug)]
//! struct ServiceError(String);
//!
//! impl fmt::Display for ServiceError {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Service error: {}", self.0)
//!     }
//! }
//!
//! impl Error for ServiceError {}
//!
//! let breaker = CircuitBreaker::builder()
//!     .threshold(10) // Trip after 10 failures
//!     .timeout(Duration::from_secs(3)) // Stay open for 3 seconds
//!     .build();
//!
//! match breaker.call(|| {
//!     // Your service call that might fail
//!     Ok::<_, ServiceError>("Success".to_string())
//! }) {
//!     Ok(result) => println!("Call succeeded: {}", result),
//!     Err(BreakerError::Open) => println!("Circuit is open, call was prevented"),
//!     Err(BreakerError::Operation(err)) => println!("Call failed: {}", err),
//! }
//! ```
//!
//! ## Async Support
//!
//! With the `async` feature enabled, futures can be wrapped the same way:
//!
//! ```rust,ignore
//! let result = breaker.call_async(|| async {
//!     Ok::<_, ServiceError>("Success".to_string())
//! }).await;
//! ```
//!
//! ## Features
//!
//! - `async` - `call_async` for future-returning operations
//! - `tracing` - debug events on every state transition

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod breaker;
mod config;
mod error;
pub mod prelude;
mod state;

// Re-exports
pub use breaker::CircuitBreaker;
pub use config::BreakerBuilder;
pub use error::{BreakerError, BreakerResult};
pub use state::State;
