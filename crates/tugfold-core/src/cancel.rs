//! Cooperative cancellation.
//!
//! Analysis threads a [`CancellationToken`] explicitly through every matcher
//! and validator. Long scans call [`check`] at loop boundaries and bail out
//! with [`Cancelled`]; nothing is reported for the site that was in flight.

use thiserror::Error;

pub use tokio_util::sync::CancellationToken;

/// The operation observed a cancelled token and stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Return `Err(Cancelled)` if `token` has been cancelled.
pub fn check(token: &CancellationToken) -> Result<(), Cancelled> {
    if token.is_cancelled() {
        Err(Cancelled)
    } else {
        Ok(())
    }
}
