use cbreaker::{BreakerError, CircuitBreaker};
use std::error::Error;
use std::fmt;
use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct ServiceError(String);

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Service error: {}", self.0)
    }
}

impl Error for ServiceError {}

fn service() -> Result<(), ServiceError> {
    Err(ServiceError("External service error".to_string()))
}

fn main() {
    let threshold = 10;
    let breaker = CircuitBreaker::builder()
        .threshold(threshold) // Trip after 10 failures
        .timeout(Duration::from_secs(3)) // 3 second cooldown period
        .build();

    // One call short of the threshold, all in parallel
    let handles: Vec<_> = (0..threshold - 1)
        .map(|_| {
            let breaker = breaker.clone();
            thread::spawn(move || {
                let _ = breaker.call(service);
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    println!(
        "After {} failures: {} ({} counted)",
        threshold - 1,
        breaker.current_state(),
        breaker.failure_count()
    );

    let _ = breaker.call(service);
    println!("After one more failure: {}", breaker.current_state());

    match breaker.call(|| Ok::<_, ServiceError>("Success")) {
        Ok(result) => println!("Call succeeded: {}", result),
        Err(BreakerError::Open) => println!("Circuit is open, call was prevented"),
        Err(BreakerError::Operation(err)) => println!("Call failed: {}", err),
    }

    println!("Waiting for the cooldown to elapse...");
    thread::sleep(breaker.timeout() + Duration::from_secs(1));

    match breaker.call(|| Ok::<_, ServiceError>("Success")) {
        Ok(result) => println!("Probe succeeded: {}", result),
        Err(err) => println!("Probe failed: {}", err),
    }
    println!("Current state: {}", breaker.current_state());
}
