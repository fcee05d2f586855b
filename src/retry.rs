// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Retry wrapper with exponential backoff.
//!
//! Every remote interaction of every public operation flows through
//! [`run`]: it ensures a session token is held, executes the attempt, and
//! on a transient failure backs off and retries up to the policy bound. A
//! 401 additionally invalidates the session so the retried attempt logs in
//! again.

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, ProtocolError, Result};
use crate::protocol::HttpClient;
use crate::session::Session;

/// Bounds and paces retries of transient failures.
///
/// The delay before zero-indexed retry `n` is `base_delay * 2^n`; with the
/// defaults that is 1s then 2s across two retries.
///
/// # Examples
///
/// ```
/// use melcloud_lib::RetryPolicy;
/// use std::time::Duration;
///
/// // Default policy: 3 total attempts, backoff 1s, 2s
/// let policy = RetryPolicy::default();
///
/// // Faster and more persistent
/// let policy = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_base_delay(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each one after.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Default total attempt count.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    /// Default delay before the first retry.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Creates a policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total attempt count.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Returns the backoff delay before zero-indexed retry `n`.
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }
}

/// Runs one authenticated unit of work under the retry policy.
///
/// The session is ensured before each attempt, so an attempt that follows a
/// 401 invalidation logs in afresh. Non-transient errors and exhaustion
/// propagate the error unchanged.
pub(crate) async fn run<T, F, Fut>(
    policy: &RetryPolicy,
    session: &Session,
    http: &HttpClient,
    op: F,
) -> Result<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        let result = match session.ensure(http).await {
            Ok(token) => op(token).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_transient() || attempt >= policy.max_attempts {
                    return Err(err);
                }
                if matches!(err, Error::Protocol(ProtocolError::Unauthorized)) {
                    session.invalidate();
                }

                let delay = policy.delay(attempt - 1);
                tracing::warn!(attempt, ?delay, error = %err, "retrying after transient failure");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_documented_bounds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn backoff_doubles_per_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
    }

    #[test]
    fn backoff_scales_with_base_delay() {
        let policy = RetryPolicy::new().with_base_delay(Duration::from_millis(10));
        assert_eq!(policy.delay(0), Duration::from_millis(10));
        assert_eq!(policy.delay(1), Duration::from_millis(20));
    }
}
