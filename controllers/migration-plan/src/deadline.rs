//! Pass deadline.
//!
//! Every blocking cluster call of a pass runs under one shared deadline.
//! Expiry drops the in-flight call and surfaces `ControllerError::Cancelled`;
//! nothing is retried here.

use crate::error::ControllerError;
use std::future::Future;
use tokio::time::Instant;

/// Awaits `fut` unless `deadline` passes first.
pub async fn with_deadline<F, T>(deadline: Instant, what: &str, fut: F) -> Result<T, ControllerError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| ControllerError::Cancelled(format!("{what} did not finish before the pass deadline")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completes_before_deadline() {
        let deadline = Instant::now() + Duration::from_secs(5);
        let value = with_deadline(deadline, "noop", async { 7 }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_expired_deadline_cancels() {
        let deadline = Instant::now() + Duration::from_millis(20);
        let result = with_deadline(deadline, "listing", std::future::pending::<()>()).await;
        match result {
            Err(ControllerError::Cancelled(msg)) => assert!(msg.contains("listing")),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }
}
