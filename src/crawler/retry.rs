//! Exponential backoff for transport failures

use std::time::Duration;

/// Backoff policy for requests that never produced a response
///
/// There is deliberately no attempt cap: the fetcher keeps retrying until the
/// server answers or the process is stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait after the first failure
    pub initial_interval: Duration,
    /// Growth factor applied after each failure
    pub multiplier: f64,
    /// Upper bound for a single wait
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 1.5,
            max_interval: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Returns the (endless) sequence of waits for this policy
    pub fn intervals(&self) -> Backoff {
        Backoff {
            next: self.initial_interval.min(self.max_interval),
            multiplier: self.multiplier.max(1.0),
            max_interval: self.max_interval,
        }
    }
}

/// Iterator over successive backoff intervals
///
/// Intervals never decrease and never exceed the policy's maximum.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    multiplier: f64,
    max_interval: Duration,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        let grown = (self.next.as_secs_f64() * self.multiplier)
            .min(self.max_interval.as_secs_f64());
        self.next = Duration::from_secs_f64(grown).max(current);
        Some(current)
    }
}
