//! Scoped use of a browser session.

use futures::FutureExt;
use roster_browser::BrowserSession;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Drive `work` to completion, converting a panic into `None`.
///
/// The session the work borrows stays with the caller, which releases it
/// afterwards on every outcome.
pub(crate) async fn guarded<T>(work: impl Future<Output = T>) -> Option<T> {
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::error!("Browser work panicked, releasing session");
            None
        }
    }
}

/// Close a session, logging rather than propagating teardown failures.
pub(crate) async fn release<S: BrowserSession>(session: S) {
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }
}
