//! Bridges synchronous engines onto the async runtime.
//!
//! The engine runs on the blocking pool and reports exactly once through a
//! oneshot channel. Dropping the waiting future closes the channel, which the
//! engine observes through its `cancelled` check.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::extraction::error::ExtractionError;

pub async fn run_blocking<T, F>(timeout: Duration, job: F) -> Result<T, ExtractionError>
where
    T: Send + 'static,
    F: FnOnce(&dyn Fn() -> bool) -> Result<T, ExtractionError> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        let outcome = {
            let cancelled = || tx.is_closed();
            panic::catch_unwind(AssertUnwindSafe(|| job(&cancelled))).unwrap_or_else(|payload| {
                Err(ExtractionError::parse_failure(format!(
                    "engine panicked: {}",
                    panic_message(payload.as_ref())
                )))
            })
        };
        if tx.send(outcome).is_err() {
            tracing::debug!("extraction finished after caller stopped waiting");
        }
    });

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(_)) => Err(ExtractionError::engine_unavailable(
            "extraction worker exited without reporting a result",
        )),
        Err(_) => Err(ExtractionError::parse_failure(format!(
            "extraction timed out after {timeout:?}"
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
