use tracing::{debug, warn};

use super::{RetryPolicy, Sleeper};
use crate::upstream::{Upstream, UpstreamError, UpstreamPayload};

/// Terminal failure: every allowed attempt failed.
///
/// Only the attempt count is part of the message. The last per-attempt error
/// is kept as the `source()` so it reaches logs without changing what callers see.
#[derive(Debug, thiserror::Error)]
#[error("Upstream request failed after {attempts} attempts.")]
pub struct RetryExhausted {
    pub attempts: u32,
    #[source]
    pub last_failure: UpstreamError,
}

/// Call `upstream` until it succeeds or `policy.max_retries` attempts have failed.
///
/// No wait precedes the first attempt or follows the last one. Between attempts
/// the wait starts at `policy.initial_delay` and doubles each time.
pub async fn call_with_retry<U, S>(
    upstream: &U,
    sleeper: &S,
    policy: &RetryPolicy,
) -> Result<UpstreamPayload, RetryExhausted>
where
    U: Upstream + ?Sized,
    S: Sleeper + ?Sized,
{
    // A zero budget still makes one attempt.
    let max_retries = policy.max_retries.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match upstream.call().await {
            Ok(payload) => {
                if attempt > 1 {
                    debug!(attempts = attempt, "upstream call succeeded after retry");
                }
                return Ok(payload);
            }
            Err(e) => {
                warn!(attempt, error = %e, "upstream attempt failed");

                if attempt >= max_retries {
                    return Err(RetryExhausted {
                        attempts: max_retries,
                        last_failure: e,
                    });
                }

                sleeper.sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
        }
    }
}
