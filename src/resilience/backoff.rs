//! Exponential backoff without jitter.

use std::time::Duration;

use crate::config::BackoffConfig;

/// Calculate the delay before retry number `retry` (1-based).
///
/// Doubles from `base` and saturates at `max`. Retry 0 has no delay.
pub fn calculate_backoff(retry: u32, base: Duration, max: Duration) -> Duration {
    if retry == 0 {
        return Duration::ZERO;
    }

    let factor = 2u32.saturating_pow(retry - 1);
    base.saturating_mul(factor).min(max)
}

/// Backoff schedule parameters shared by every call of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub initial: Duration,
    pub max: Duration,
}

impl BackoffPolicy {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self { initial, max }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(16),
        }
    }
}

impl From<&BackoffConfig> for BackoffPolicy {
    fn from(config: &BackoffConfig) -> Self {
        Self {
            initial: Duration::from_millis(config.initial_ms),
            max: Duration::from_millis(config.max_ms),
        }
    }
}

/// Per-call backoff state. Lives only for one retry loop.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    max: Duration,
    retries: u32,
}

impl Backoff {
    pub fn new(policy: &BackoffPolicy) -> Self {
        Self {
            current: policy.initial,
            max: policy.max,
            retries: 0,
        }
    }

    /// Return the delay for the next retry and advance the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        self.retries += 1;
        delay
    }

    /// Number of delays handed out so far.
    pub fn retries(&self) -> u32 {
        self.retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let base = Duration::from_secs(1);
        let max = Duration::from_secs(16);

        assert_eq!(calculate_backoff(0, base, max), Duration::ZERO);
        assert_eq!(calculate_backoff(1, base, max), Duration::from_secs(1));
        assert_eq!(calculate_backoff(4, base, max), Duration::from_secs(8));
        assert_eq!(calculate_backoff(5, base, max), Duration::from_secs(16));
        assert_eq!(calculate_backoff(500, base, max), Duration::from_secs(16));
    }

    #[test]
    fn test_schedule_doubles_and_caps() {
        let mut backoff = Backoff::new(&BackoffPolicy::default());
        let delays: Vec<u64> = (0..8).map(|_| backoff.next_delay().as_secs()).collect();

        assert_eq!(delays, vec![1, 2, 4, 8, 16, 16, 16, 16]);
        assert_eq!(backoff.retries(), 8);
    }

    #[test]
    fn test_state_matches_closed_form() {
        let policy = BackoffPolicy::new(Duration::from_millis(250), Duration::from_millis(3000));
        let mut backoff = Backoff::new(&policy);

        for retry in 1..=10 {
            assert_eq!(
                backoff.next_delay(),
                calculate_backoff(retry, policy.initial, policy.max)
            );
        }
    }

    #[test]
    fn test_policy_from_config() {
        let policy = BackoffPolicy::from(&BackoffConfig::default());
        assert_eq!(policy, BackoffPolicy::default());
    }
}
