//! Bounded exponential-backoff retry loop for asynchronous operations.

use crate::config::PollConfig;
use std::future::Future;

/// Poll an asynchronous operation until a continuation predicate says stop
/// or the retry budget runs out.
///
/// Before each attempt (1-indexed) the poller sleeps for
/// [`PollConfig::delay`]. When `should_continue` returns `false` the
/// response is returned as final. After `max_retry` attempts whose
/// predicate still asks for more, the last response is returned unchanged;
/// the caller decides whether an unresolved response is an error.
///
/// Errors from `operation` are not retried: they propagate to the caller
/// on first occurrence. Only the "still in progress" condition, as judged
/// by `should_continue`, schedules another attempt.
///
/// At least one attempt is always made, even with `max_retry` of zero.
pub async fn poll<T, E, F, Fut, C>(
    mut operation: F,
    mut should_continue: C,
    config: &PollConfig,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: FnMut(&T) -> bool,
{
    let budget = config.max_retry.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        tokio::time::sleep(config.delay(attempt)).await;

        let response = operation().await?;
        if !should_continue(&response) || attempt >= budget {
            return Ok(response);
        }
        log::debug!("poll attempt {}/{} still pending", attempt, budget);
    }
}
