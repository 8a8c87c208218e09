use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries including the first. (1 = no retry)
    pub max_retries: u32,
    /// Wait after the first failure; doubles after every later failure.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Waits the controller performs if every attempt fails, in order.
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        let mut delay = self.initial_delay;
        let mut out = Vec::new();
        for _ in 1..self.max_retries.max(1) {
            out.push(delay);
            delay = delay.saturating_mul(2);
        }
        out
    }
}
