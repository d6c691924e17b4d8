//! Slot selection, backoff, and the retry loop
//!
//! One routed call: pick the slot with the oldest throttle stamp for the
//! operation, sleep out whatever remains of its cool-down, invoke, and on
//! a classified rate limit stamp the slot's clock and go around again.
//! The loop is explicit (sustained limiting must not grow the stack) and
//! the sleep is the sole backpressure mechanism.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use twitter_client::ApiRequest;

use crate::classify;
use crate::config::{PoolConfig, RetryMode};
use crate::error::{Error, Result};
use crate::pool::Pool;

/// Safety margin added to the wait window: a retry issued exactly at the
/// window boundary can still be rejected because of round-trip latency
/// and clock skew between us and the service.
const WAIT_MARGIN: Duration = Duration::from_secs(1);

/// Routes requests across the pool with per-operation throttle tracking.
pub struct Router {
    pool: Pool,
    wait_window: Duration,
    mode: RetryMode,
    max_retries: Option<u32>,
    call_timeout: Option<Duration>,
}

impl Router {
    pub fn new(pool: Pool, config: &PoolConfig) -> Self {
        Self {
            pool,
            wait_window: config.wait_window(),
            mode: config.mode,
            max_retries: config.max_retries,
            call_timeout: config.call_timeout(),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Route one request, waiting and rotating slots as needed.
    ///
    /// With a `call_timeout` configured the entire select/wait/invoke loop
    /// runs under a deadline; elapse returns `DeadlineElapsed`. Dropping
    /// the returned future likewise aborts a pending sleep or in-flight
    /// call.
    pub async fn dispatch(&self, request: &ApiRequest) -> Result<Value> {
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, self.dispatch_inner(request))
                .await
                .unwrap_or(Err(Error::DeadlineElapsed)),
            None => self.dispatch_inner(request).await,
        }
    }

    async fn dispatch_inner(&self, request: &ApiRequest) -> Result<Value> {
        let operation = request.operation();
        let mut rotations: u32 = 0;
        loop {
            let (index, throttled_at) = self.pool.least_throttled(operation).await;
            if let Some(to_wait) = remaining_wait(throttled_at, self.wait_window) {
                debug!(
                    operation,
                    slot = index,
                    wait_secs = to_wait.as_secs(),
                    "rate limits exhausted, waiting"
                );
                tokio::time::sleep(to_wait).await;
            }

            let slot = self.pool.slot(index);
            match slot.execute(request).await {
                Ok(value) => {
                    metrics::counter!("pool_requests_total",
                        "operation" => operation, "outcome" => "ok")
                    .increment(1);
                    return Ok(value);
                }
                Err(client_error) => {
                    let normalized = classify::classify(&client_error);
                    if normalized.is_rate_limit() {
                        slot.mark_throttled(operation).await;
                        metrics::counter!("pool_rate_limited_total", "operation" => operation)
                            .increment(1);
                        debug!(
                            operation,
                            slot = index,
                            auth = slot.auth_mode(),
                            %normalized,
                            "received limit message"
                        );
                        if self.mode == RetryMode::Break {
                            return Err(Error::RateLimited(normalized));
                        }
                    } else if normalized.is_over_capacity() {
                        // Not attributable to the caller; rotate in both modes.
                        slot.mark_throttled(operation).await;
                        debug!(operation, slot = index, %normalized, "service over capacity, rotating");
                    } else {
                        metrics::counter!("pool_requests_total",
                            "operation" => operation, "outcome" => "error")
                        .increment(1);
                        return Err(Error::Client(client_error));
                    }

                    rotations += 1;
                    if let Some(max) = self.max_retries {
                        if rotations > max {
                            warn!(operation, rotations, "retry budget exhausted");
                            return Err(Error::RetriesExceeded {
                                attempts: rotations,
                                last: normalized,
                            });
                        }
                    }
                }
            }
        }
    }
}

/// Remaining cool-down for a stamp, margin included. `None` means the
/// slot is immediately eligible: never throttled, or the stamp has aged
/// past the window.
fn remaining_wait(throttled_at: Option<Instant>, window: Duration) -> Option<Duration> {
    let throttled_at = throttled_at?;
    (window + WAIT_MARGIN)
        .checked_sub(throttled_at.elapsed())
        .filter(|remaining| !remaining.is_zero())
}
