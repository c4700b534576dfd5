//! Shared utilities for use cases.
//!
//! Contains the cancellation wrapper used around every remote call.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Await `fut`, aborting early when the token is cancelled.
///
/// Without a token the future is simply awaited. An already-cancelled
/// token short-circuits before `fut` is polled, so no request is sent.
pub(crate) async fn run_cancellable<T, E>(
    token: &Option<CancellationToken>,
    on_cancel: impl FnOnce() -> E,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let Some(token) = token else {
        return fut.await;
    };

    if token.is_cancelled() {
        return Err(on_cancel());
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(on_cancel()),
        result = fut => result,
    }
}
