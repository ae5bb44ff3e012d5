//! Readiness gate for test execution.
//!
//! [`wait_until_ready`] polls a [`HealthProbe`] on a fixed interval until it
//! succeeds, the deadline elapses, or the caller cancels. At most one probe
//! is in flight; a running probe is never abandoned for the deadline, and no
//! probe starts once the deadline has passed.

use crate::Result;
use async_trait::async_trait;
use matrixhub_core::Error;
use std::time::Duration;
use std::future;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A lightweight check of service availability.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe the service once. `Ok` means the service is ready.
    async fn probe(&self, cancel: &CancellationToken) -> Result<()>;
}

/// Wait until `probe` succeeds or `timeout` elapses.
///
/// The first probe runs one `interval` after the call. When a tick and the
/// deadline are due together the deadline wins. A `timeout` too large to
/// represent as an instant (such as [`Duration::MAX`]) means no deadline.
///
/// # Errors
///
/// - [`Error::ReadinessTimeout`] if no probe succeeded before the deadline.
/// - [`Error::Cancelled`] if `cancel` fired first.
/// - [`Error::ConfigError`] if `interval` is zero.
pub async fn wait_until_ready<P>(
    probe: &P,
    timeout: Duration,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<()>
where
    P: HealthProbe + ?Sized,
{
    if interval.is_zero() {
        return Err(Error::ConfigError(
            "readiness poll interval must be non-zero".to_string(),
        ));
    }

    let start = Instant::now();
    let deadline = start.checked_add(timeout);
    let expired = sleep_until(deadline);
    tokio::pin!(expired);

    let mut ticker = start.checked_add(interval).map(|first| {
        let mut ticker = time::interval_at(first, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    let mut attempts: u32 = 0;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled(attempts)),
            () = &mut expired => break,
            () = tick(&mut ticker) => {}
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            break;
        }

        attempts += 1;
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled(attempts)),
            outcome = probe.probe(cancel) => outcome,
        };

        match outcome {
            Ok(()) => {
                info!(attempts, elapsed = ?start.elapsed(), "service is ready");
                return Ok(());
            }
            Err(err) if err.is_cancelled() => return Err(err),
            Err(err) => debug!(attempt = attempts, error = %err, "readiness probe failed"),
        }
    }

    warn!(?timeout, attempts, "timed out waiting for service to be ready");
    Err(Error::ReadinessTimeout(timeout))
}

/// Sleep until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => future::pending().await,
    }
}

fn cancelled(attempts: u32) -> Error {
    Error::Cancelled(format!("readiness wait aborted after {attempts} probe(s)"))
}
