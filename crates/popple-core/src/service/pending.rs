//! Single-slot completion handles for dispatched service calls.
//!
//! Every `KarmaService` operation runs on its own tokio task and reports back
//! through a `oneshot` channel. The caller gets a [`Pending`] immediately and
//! awaits it (or blocks on it) to receive the one result the task produces.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use popple_types::error::KarmaError;
use tokio::sync::oneshot;
use tracing::trace;

/// Eventual result of a dispatched karma operation.
///
/// Consumed by value, so it yields at most one value. Dropping it does not
/// cancel the underlying task; the task finishes and its result is discarded.
#[derive(Debug)]
#[must_use = "a Pending does nothing unless awaited or waited on"]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, KarmaError>>,
}

impl<T> Pending<T> {
    /// Await the result.
    pub async fn wait(self) -> Result<T, KarmaError> {
        self.await
    }

    /// Block the current thread until the result arrives.
    ///
    /// For synchronous callers only: panics if called from within an async
    /// execution context, like `oneshot::Receiver::blocking_recv`.
    pub fn blocking_wait(self) -> Result<T, KarmaError> {
        self.rx
            .blocking_recv()
            .unwrap_or(Err(KarmaError::Interrupted))
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, KarmaError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Sender dropped without sending: the task panicked or the runtime shut down.
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(KarmaError::Interrupted)))
    }
}

/// Spawn `work` onto the tokio runtime and hand back its completion handle.
///
/// Never blocks. Must be called from within a tokio runtime.
pub(crate) fn dispatch<T, F>(op: &'static str, work: F) -> Pending<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, KarmaError>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = work.await;
        if tx.send(result).is_err() {
            trace!(op, "result discarded, caller dropped the handle");
        }
    });
    Pending { rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popple_types::error::RepositoryError;

    #[tokio::test]
    async fn test_dispatch_delivers_value() {
        let pending = dispatch("test", async { Ok::<_, KarmaError>(42) });
        assert_eq!(pending.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_error() {
        let pending = dispatch("test", async {
            Err::<(), _>(KarmaError::Storage(RepositoryError::Connection))
        });
        let err = pending.wait().await.unwrap_err();
        assert!(matches!(err, KarmaError::Storage(RepositoryError::Connection)));
    }

    #[tokio::test]
    async fn test_panicking_task_reports_interrupted() {
        let fail = true;
        let pending = dispatch("test", async move {
            if fail {
                panic!("task blew up");
            }
            Ok::<(), KarmaError>(())
        });
        let err = pending.await.unwrap_err();
        assert!(matches!(err, KarmaError::Interrupted));
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel_task() {
        let (done_tx, done_rx) = oneshot::channel();
        let pending = dispatch("test", async move {
            tokio::task::yield_now().await;
            let _ = done_tx.send(());
            Ok::<_, KarmaError>(())
        });
        drop(pending);
        done_rx.await.expect("task should run to completion");
    }

    #[tokio::test]
    async fn test_blocking_wait_from_sync_thread() {
        let pending = dispatch("test", async { Ok::<_, KarmaError>("done") });
        let result = tokio::task::spawn_blocking(move || pending.blocking_wait())
            .await
            .unwrap();
        assert_eq!(result.unwrap(), "done");
    }
}
