use cbreaker::{BreakerError, CircuitBreaker, State};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: u32 = 50;

fn hammer(breaker: &CircuitBreaker, calls: u32) {
    let barrier = Arc::new(Barrier::new(calls as usize));

    let handles: Vec<_> = (0..calls)
        .map(|_| {
            let breaker = breaker.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let _ = breaker.call(|| Err::<(), _>("error"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_below_threshold_stay_closed() {
    let breaker = CircuitBreaker::new(THREADS, Duration::from_secs(2));

    hammer(&breaker, THREADS - 1);

    assert_eq!(breaker.current_state(), State::Closed);
    assert_eq!(breaker.failure_count(), THREADS - 1);
}

#[test]
fn test_concurrent_failures_at_threshold_open() {
    let breaker = CircuitBreaker::new(THREADS, Duration::from_secs(2));

    hammer(&breaker, THREADS);

    assert_eq!(breaker.current_state(), State::Open);
    assert!(matches!(
        breaker.call(|| Ok::<_, &str>(())),
        Err(BreakerError::Open)
    ));
}

#[test]
fn test_concurrent_probe_after_timeout_closes() {
    let breaker = CircuitBreaker::new(THREADS, Duration::from_millis(100));

    hammer(&breaker, THREADS);
    thread::sleep(Duration::from_millis(200));

    assert_eq!(breaker.call(|| Ok::<_, &str>("ok")), Ok("ok"));
    assert_eq!(breaker.current_state(), State::Closed);
    assert_eq!(breaker.failure_count(), 0);
}

#[test]
fn test_half_open_admits_overlapping_probes() {
    let breaker = CircuitBreaker::new(1, Duration::from_millis(50));
    let _ = breaker.call(|| Err::<(), _>("error"));
    thread::sleep(Duration::from_millis(100));

    // Both probes are inside the operation at the same time.
    let inside = Arc::new(Barrier::new(2));
    let invoked = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let breaker = breaker.clone();
            let inside = Arc::clone(&inside);
            let invoked = Arc::clone(&invoked);
            thread::spawn(move || {
                breaker.call(|| {
                    invoked.fetch_add(1, Ordering::SeqCst);
                    inside.wait();
                    Ok::<_, &str>(())
                })
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    assert_eq!(invoked.load(Ordering::SeqCst), 2);
    assert_eq!(breaker.current_state(), State::Closed);
}

#[test]
fn test_operation_runs_without_lock_held() {
    let breaker = CircuitBreaker::new(5, Duration::from_secs(1));
    let observer = breaker.clone();

    // Reading the state from inside the operation would deadlock if the
    // breaker held its lock across the call.
    let seen = breaker.call(|| Ok::<_, &str>(observer.current_state()));

    assert_eq!(seen, Ok(State::Closed));
}

#[test]
fn test_mixed_load_keeps_consistent_state() {
    let breaker = CircuitBreaker::new(10, Duration::from_millis(5));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let breaker = breaker.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..500 {
                    let result = breaker.call(|| {
                        if (i + worker) % 3 == 0 {
                            Ok(())
                        } else {
                            Err("error")
                        }
                    });
                    if let Err(BreakerError::Operation(e)) = result {
                        assert_eq!(e, "error");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let state = breaker.current_state();
    let failures = breaker.failure_count();
    match state {
        State::Closed => assert!(failures < breaker.threshold()),
        State::Open | State::HalfOpen => {}
    }
}
