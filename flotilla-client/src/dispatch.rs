//! Sequential candidate dispatch with transport failover

use std::future::Future;

use flotilla_core::types::EndpointUrl;
use flotilla_core::{EndpointFailure, Error, Result};
use tracing::warn;

use crate::endpoints::EndpointSet;

/// Run one attempt per candidate endpoint until one succeeds
///
/// Draws a fresh randomized trial order from `endpoints` and awaits
/// `attempt` for one candidate at a time; there is no parallel fan-out
/// and no delay between trials. A transport failure is logged and the
/// next candidate is tried; any other error aborts the dispatch and is
/// returned as-is, leaving the remaining candidates untried. When every
/// candidate fails at the transport level, the per-endpoint causes are
/// aggregated into [`Error::Exhausted`].
pub async fn try_candidates<T, F, Fut>(endpoints: &EndpointSet, mut attempt: F) -> Result<T>
where
    F: FnMut(EndpointUrl) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut remaining = endpoints.draw_order()?;
    let mut attempts = Vec::new();

    while let Some(endpoint) = remaining.pop() {
        match attempt(endpoint.clone()).await {
            Ok(value) => return Ok(value),
            Err(Error::Transport { message, .. }) => {
                warn!(
                    endpoint = %endpoint,
                    cause = %message,
                    "failed to reach endpoint, trying next candidate"
                );
                attempts.push(EndpointFailure { endpoint, message });
            }
            Err(other) => return Err(other),
        }
    }

    Err(Error::Exhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::instrument::WithSubscriber;

    fn transport_err(endpoint: &str) -> Error {
        Error::Transport {
            endpoint: endpoint.to_string(),
            message: "connection refused".to_string(),
            source: None,
        }
    }

    fn three_endpoints() -> EndpointSet {
        EndpointSet::new(["https://a.example", "https://b.example", "https://c.example"])
    }

    /// Subscriber double that counts WARN events and discards the rest
    struct WarnCounter {
        warnings: Arc<AtomicUsize>,
    }

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _id: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _id: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.warnings.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn enter(&self, _id: &tracing::span::Id) {}

        fn exit(&self, _id: &tracing::span::Id) {}
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let calls = AtomicUsize::new(0);

        let result = try_candidates(&three_endpoints(), |endpoint| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(endpoint) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_advance_to_next_candidate() {
        let calls = AtomicUsize::new(0);

        let result = try_candidates(&three_endpoints(), |endpoint| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if endpoint == "https://b.example" {
                    Ok("won")
                } else {
                    Err(transport_err(&endpoint))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "won");
        // Depending on the draw, between zero and two candidates failed first
        let calls = calls.load(Ordering::SeqCst);
        assert!((1..=3).contains(&calls));
    }

    #[tokio::test]
    async fn test_success_path_warns_once_per_failed_candidate() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let calls = AtomicUsize::new(0);

        // The first two candidates fail at the transport level, the
        // third succeeds, independent of the drawn order
        let result = try_candidates(&three_endpoints(), |endpoint| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(transport_err(&endpoint))
                } else {
                    Ok("won")
                }
            }
        })
        .with_subscriber(WarnCounter {
            warnings: Arc::clone(&warnings),
        })
        .await;

        assert_eq!(result.unwrap(), "won");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // One warning per failed candidate, none for the winner
        assert_eq!(warnings.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_aggregates_every_failure() {
        let result: Result<()> = try_candidates(&three_endpoints(), |endpoint| async move {
            Err(transport_err(&endpoint))
        })
        .await;

        match result.unwrap_err() {
            Error::Exhausted { attempts } => {
                assert_eq!(attempts.len(), 3);
                let mut endpoints: Vec<&str> =
                    attempts.iter().map(|a| a.endpoint.as_str()).collect();
                endpoints.sort_unstable();
                assert_eq!(
                    endpoints,
                    vec!["https://a.example", "https://b.example", "https://c.example"]
                );
                assert!(attempts.iter().all(|a| a.message == "connection refused"));
            }
            other => panic!("Expected Exhausted error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_error_status_aborts_the_dispatch() {
        let calls = AtomicUsize::new(0);

        let result: Result<()> = try_candidates(&three_endpoints(), |endpoint| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Err(Error::Http {
                    endpoint,
                    status: 500,
                    body: "internal error".to_string(),
                })
            }
        })
        .await;

        match result.unwrap_err() {
            Error::Http { status, .. } => assert_eq!(status, 500),
            other => panic!("Expected Http error, got {:?}", other),
        }
        // Fail-fast: the remaining candidates were never tried
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decode_error_aborts_the_dispatch() {
        let calls = AtomicUsize::new(0);

        let result: Result<()> = try_candidates(&three_endpoints(), |_endpoint| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Err(Error::Decode {
                    message: "not json".to_string(),
                    source: None,
                })
            }
        })
        .await;

        assert!(matches!(result.unwrap_err(), Error::Decode { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_set_fails_before_any_attempt() {
        let calls = AtomicUsize::new(0);
        let set = EndpointSet::new(Vec::<String>::new());

        let result: Result<()> = try_candidates(&set, |endpoint| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(transport_err(&endpoint)) }
        })
        .await;

        assert!(matches!(result.unwrap_err(), Error::Configuration(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
