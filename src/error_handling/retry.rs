//! Registry retry strategy.
//!
//! Only transient network failures are retried; a registry that answered with
//! garbage will answer with the same garbage again.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::LookupError;
use crate::config::{RETRY_BACKOFF_BASE, RETRY_BACKOFF_FACTOR_MS, RETRY_MAX_DELAY_SECS};

/// Creates the exponential backoff used between registry attempts.
///
/// Delays are `RETRY_BACKOFF_BASE^n * RETRY_BACKOFF_FACTOR_MS` milliseconds
/// (200ms, 400ms, ...), capped at `RETRY_MAX_DELAY_SECS`, and limited to
/// `retries` entries so the total attempt count is `retries + 1`.
///
/// # Returns
///
/// A retry strategy iterator ready for use with `tokio_retry::RetryIf`.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_BACKOFF_BASE)
        .factor(RETRY_BACKOFF_FACTOR_MS)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Determines if a registry failure is worth another attempt.
pub(crate) fn is_retriable_error(error: &LookupError) -> bool {
    matches!(error, LookupError::RegistryUnreachable { .. })
}
