//! Bounded retries with capped exponential backoff and full jitter.

use std::future::Future;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tinyrand::{Rand, Seeded, StdRand};
use tracing::{debug, warn};

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Attempts including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Upper bound on the time spent across all attempts, including sleeps.
    pub max_elapsed: Duration,
}
impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1_500),
            max_elapsed: Duration::from_millis(4_000),
        }
    }
}
impl RetryPolicy {
    /// A policy that makes a single attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// The capped exponential delay before the given (1-based) retry, prior to jitter.
    pub fn ceiling(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let exponential = self.base_delay.saturating_mul(1 << exponent);
        exponential.min(self.max_delay)
    }

    /// The ceiling with full jitter applied: a uniformly drawn delay in `[0, ceiling)`.
    pub fn backoff(&self, attempt: u32, rand: &mut impl Rand) -> Duration {
        let ceiling = self.ceiling(attempt).as_millis() as u64;
        if ceiling == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand.next_u64() % ceiling)
        }
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or the policy is
/// exhausted. A `Retry-After` hint from the server takes the place of the jittered backoff, capped
/// at the policy's maximum delay. No sleep runs past `max_elapsed`.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, op_name: &str, mut operation: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let start = Instant::now();
    let mut rand = StdRand::seed(clock_seed());
    let mut attempt = 1;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{op_name} succeeded after {attempt} attempts ({:?} elapsed)", start.elapsed());
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !err.is_retryable() {
            debug!("{op_name} failed with non-retryable error: {err}");
            return Err(err);
        }
        if attempt >= policy.max_attempts {
            warn!("{op_name} failed after {attempt} attempts ({:?} elapsed): {err}", start.elapsed());
            return Err(err);
        }
        let elapsed = start.elapsed();
        if elapsed >= policy.max_elapsed {
            warn!("{op_name} gave up after {elapsed:?} (max {:?}): {err}", policy.max_elapsed);
            return Err(err);
        }

        let delay = match err.retry_after() {
            Some(retry_after) => retry_after.min(policy.max_delay),
            None => policy.backoff(attempt, &mut rand),
        }
        .min(policy.max_elapsed - elapsed);
        debug!("{op_name} attempt {attempt} failed ({err}); retrying in {delay:?}");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempt += 1;
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos() as u64)
        .unwrap_or_default()
}
