//! Completion handle for store writes.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::StoreError;

/// Outcome of an operation that has been handed to a store.
///
/// Dropping a `Pending` does not cancel the operation; it only discards the
/// result. Awaiting it yields the result, or [`StoreError::Closed`] if the
/// store shut down before the operation completed.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, StoreError>>,
}

// The receiver is never pinned in place.
impl<T> Unpin for Pending<T> {}

impl<T> Pending<T> {
    /// A handle plus the sender that completes it.
    pub(crate) fn channel() -> (oneshot::Sender<Result<T, StoreError>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A handle that is already complete.
    pub fn ready(result: Result<T, StoreError>) -> Self {
        let (tx, pending) = Self::channel();
        let _ = tx.send(result);
        pending
    }

    /// Discard the result. Equivalent to dropping the handle.
    pub fn detach(self) {}
}

impl<T> Future for Pending<T> {
    type Output = Result<T, StoreError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(StoreError::Closed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_resolves_immediately() {
        assert!(Pending::ready(Ok(())).await.is_ok());
    }

    #[tokio::test]
    async fn dropped_sender_reports_closed() {
        let (tx, pending) = Pending::<()>::channel();
        drop(tx);
        assert!(matches!(pending.await, Err(StoreError::Closed)));
    }
}
