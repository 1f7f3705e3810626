//! # Fibonacci Backoff
//!
//! Requeue delays for failed reconcile passes. The sequence grows more slowly
//! than exponential backoff: min, min, 2*min, 3*min, 5*min, ... capped at max.
//! Each plan keeps its own sequence; a successful pass resets it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Fibonacci backoff calculator
///
/// Each backoff is the sum of the previous two, in seconds.
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    /// Previous backoff value in seconds
    prev_secs: u64,
    /// Current backoff value in seconds
    current_secs: u64,
    /// Maximum backoff value in seconds
    max_secs: u64,
}

impl FibonacciBackoff {
    /// Create a new Fibonacci backoff with minimum and maximum values in seconds
    #[must_use]
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            prev_secs: 0,
            current_secs: min_secs,
            max_secs,
        }
    }

    /// Get the next backoff duration and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let result = self.current_secs;

        let next = self.prev_secs.saturating_add(self.current_secs);
        self.prev_secs = self.current_secs;
        self.current_secs = std::cmp::min(next, self.max_secs);

        Duration::from_secs(result)
    }
}

/// Per-plan backoff state shared by the error policy and the reconciler
#[derive(Debug)]
pub struct BackoffTracker {
    min_secs: u64,
    max_secs: u64,
    entries: Mutex<HashMap<String, FibonacciBackoff>>,
}

impl BackoffTracker {
    #[must_use]
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs,
            max_secs,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Records a failure for `key` and returns how long to wait before retrying
    pub fn next_delay(&self, key: &str) -> Duration {
        match self.entries.lock() {
            Ok(mut entries) => entries
                .entry(key.to_string())
                .or_insert_with(|| FibonacciBackoff::new(self.min_secs, self.max_secs))
                .next_backoff(),
            // A poisoned map only loses backoff history; fall back to the cap
            Err(_) => Duration::from_secs(self.max_secs),
        }
    }

    /// Forgets the failure history of `key`
    pub fn reset(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
