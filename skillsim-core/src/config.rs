use std::time::Duration;

/// Configuration for polling an asynchronous simulation to completion.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PollConfig {
    /// Delay before the first poll attempt.
    ///
    /// Default: 2 seconds
    pub base: Duration,

    /// Multiplier applied to the delay for each subsequent attempt.
    ///
    /// Default: 1.2
    pub factor: f64,

    /// Maximum number of poll attempts before giving up.
    ///
    /// Default: 30
    pub max_retry: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(2),
            factor: 1.2,
            max_retry: 30,
        }
    }
}

impl PollConfig {
    /// Set the delay before the first poll attempt.
    #[must_use]
    pub fn with_base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Set the maximum number of poll attempts.
    #[must_use]
    pub fn with_max_retry(mut self, max_retry: u32) -> Self {
        self.max_retry = max_retry;
        self
    }

    /// Get the delay before a given attempt (1-indexed).
    ///
    /// Uses exponential backoff: `delay = base * factor^(attempt - 1)`,
    /// capped at 60 seconds to keep a misconfigured factor from stalling
    /// the REPL indefinitely.
    pub fn delay(&self, attempt: u32) -> Duration {
        const MAX_DELAY: Duration = Duration::from_secs(60);

        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let millis = self.base.as_millis() as f64 * self.factor.powi(exponent);
        if !millis.is_finite() || millis >= MAX_DELAY.as_millis() as f64 {
            return MAX_DELAY;
        }
        Duration::from_millis(millis as u64)
    }
}
