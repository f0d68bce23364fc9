//! Explicit deadlines threaded through every blocking operation.
//!
//! A `Deadline` is a point in time after which an operation must be abandoned.
//! Operations derive their own deadline from the caller's one with
//! [`Deadline::within`], so the effective limit is always
//! `min(caller's deadline, now + this operation's budget)`.
//!
//! [`Deadline::run`] drives a future until either it completes or the deadline
//! passes. On expiry the future is dropped, which cancels whatever I/O it was
//! awaiting. Dropping the caller's future has the same effect on everything
//! derived from it, so client disconnects cancel in-flight work for free.
use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, error::Elapsed};

/// Upper bound used when `now + budget` does not fit into an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A point in time after which an operation is considered timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(budget)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Deadline { at }
    }

    /// Derives a child deadline: `budget` from now, but never later than `parent`.
    pub fn within(parent: Option<Deadline>, budget: Duration) -> Self {
        let own = Self::after(budget);
        match parent {
            Some(parent) => parent.min(own),
            None => own,
        }
    }

    /// The instant this deadline expires.
    pub fn instant(&self) -> Instant {
        self.at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has already passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Runs `future` to completion unless the deadline passes first.
    pub async fn run<F>(self, future: F) -> Result<F::Output, Elapsed>
    where
        F: Future,
    {
        tokio::time::timeout_at(self.at, future).await
    }
}
