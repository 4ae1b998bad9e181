//! Bounded fan-out over many repository calls.
//!
//! The provider throttles accounts at a handful of requests per second.
//! Repositories do not rate-limit or retry; this helper lets a caller
//! bound its own fan-out instead: a counting semaphore caps concurrency,
//! and a fixed one-second pause is inserted after every fifth dispatched
//! call. Crude, but it keeps bulk jobs under the throttle without a real
//! backpressure mechanism.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use amo_core::constants;
use amo_core::error::{AmoError, AmoResult};

/// Run `requests` with at most `max_concurrency` in flight, pausing one
/// second after every fifth dispatched call.
///
/// Results come back in input order, one per request; an individual
/// failure does not stop the others. There is no cancellation: every
/// request runs to completion.
pub async fn gather_bounded<T, F>(requests: Vec<F>, max_concurrency: usize) -> Vec<AmoResult<T>>
where
    F: Future<Output = AmoResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let total = requests.len();
    debug!("dispatching {total} requests, max {max_concurrency} in flight");

    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut handles = Vec::with_capacity(total);

    for (index, request) in requests.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| AmoError::Internal("request semaphore closed".into()))?;
            if index > 0 && index % constants::FAN_OUT_PAUSE_EVERY == 0 {
                tokio::time::sleep(Duration::from_secs(constants::FAN_OUT_PAUSE_SECS)).await;
            }
            request.await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(match handle.await {
            Ok(result) => result,
            Err(e) => Err(AmoError::Internal(format!("request task failed: {e}"))),
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_results_in_input_order() {
        let requests: Vec<_> = (0..4)
            .map(|i| async move { AmoResult::Ok(i) })
            .collect();
        let results = gather_bounded(requests, 2).await;
        let values: Vec<i32> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_rest() {
        let requests: Vec<_> = (0..3)
            .map(|i| async move {
                if i == 1 {
                    Err(AmoError::validation("boom"))
                } else {
                    Ok(i)
                }
            })
            .collect();
        let results = gather_bounded(requests, 3).await;
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_cadence_does_not_deadlock() {
        // 11 requests cross the pause boundary twice (indexes 5 and 10);
        // paused time auto-advances so the test stays fast.
        let requests: Vec<_> = (0..11)
            .map(|i| async move { AmoResult::Ok(i) })
            .collect();
        let results = gather_bounded(requests, 1).await;
        assert_eq!(results.len(), 11);
        assert!(results.into_iter().all(|r| r.is_ok()));
    }

    #[tokio::test]
    async fn test_zero_concurrency_clamped_to_one() {
        let requests: Vec<_> = (0..2)
            .map(|i| async move { AmoResult::Ok(i) })
            .collect();
        let results = gather_bounded(requests, 0).await;
        assert_eq!(results.len(), 2);
    }
}
