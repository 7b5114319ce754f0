//! Race a unit of work against a deadline and a cancellation token.
//!
//! Whichever side settles first wins and the other side is dropped: a timer
//! that lost is simply never polled again, and work that lost is dropped
//! mid-flight (which for an HTTP call closes the connection). When the deadline
//! wins the token is also cancelled so anything else holding a clone of it
//! stops too.

use std::future::Future;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
pub enum RaceOutcome<T> {
    Completed(T),
    DeadlineElapsed,
    Cancelled,
}

pub async fn race_with_deadline<F>(
    work: F,
    deadline: Instant,
    cancel: &CancellationToken,
) -> RaceOutcome<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => RaceOutcome::Cancelled,
        output = work => RaceOutcome::Completed(output),
        _ = tokio::time::sleep_until(deadline) => {
            cancel.cancel();
            RaceOutcome::DeadlineElapsed
        }
    }
}
