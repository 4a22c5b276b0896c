//! Dispatch Module Tests
//!
//! Runs real worker routers on ephemeral ports and points the dispatcher at them.
//!
//! ## Test Scopes
//! - **Remote path**: A healthy worker's result is used as is.
//! - **Fallback**: Unreachable workers, error statuses, malformed bodies and timeouts
//!   all produce exactly the local result.
//! - **Telemetry**: Per-worker counters and health probes.

#[cfg(test)]
mod tests {
    use crate::analysis::analyzer::analyze_partition;
    use crate::analysis::lexicon::Lexicon;
    use crate::analysis::types::Sentiment;
    use crate::corpus::types::{Comment, Platform};
    use crate::dispatch::dispatcher::{ResultSource, WorkerDispatcher};
    use crate::dispatch::protocol::{WorkerHealthResponse, ENDPOINT_ANALYZE, ENDPOINT_HEALTH};
    use crate::server::worker_router;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use std::sync::Arc;
    use std::time::Duration;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn comments() -> Vec<Comment> {
        vec![
            Comment::new(1, Platform::Twitter, "Service excellent, livraison rapide"),
            Comment::new(2, Platform::Twitter, "Produit endommagé, très déçu"),
            Comment::new(3, Platform::Twitter, "Rien à signaler"),
        ]
    }

    fn dispatcher(timeout: Duration) -> WorkerDispatcher {
        WorkerDispatcher::new(Arc::new(Lexicon::default()), timeout)
    }

    // ============================================================
    // REMOTE PATH
    // ============================================================

    #[tokio::test]
    async fn test_dispatch_uses_remote_result() {
        let url = serve(worker_router(Arc::new(Lexicon::default()))).await;
        let dispatcher = dispatcher(Duration::from_secs(5));

        let outcome = dispatcher
            .dispatch(&url, Platform::Twitter, comments())
            .await
            .unwrap();

        assert_eq!(outcome.source, ResultSource::Remote);
        assert_eq!(outcome.result.processed, 3);
        assert_eq!(outcome.result.sentiment_counts[&Sentiment::Positive], 1);
        assert_eq!(outcome.result.sentiment_counts[&Sentiment::Negative], 1);
        assert_eq!(outcome.result.sentiment_counts[&Sentiment::Neutral], 1);

        let stats = dispatcher.worker_stats(&url);
        assert_eq!(stats.remote_successes, 1);
        assert_eq!(stats.fallbacks, 0);
        assert!(stats.last_latency_ms.is_some());
    }

    #[tokio::test]
    async fn test_remote_result_is_trusted_as_is() {
        // A worker with a different lexicon: its answer wins, nothing is re-checked.
        let worker_lexicon = Lexicon::new(["rien"], ["excellent"], ["signaler"]);
        let url = serve(worker_router(Arc::new(worker_lexicon.clone()))).await;
        let dispatcher = dispatcher(Duration::from_secs(5));

        let outcome = dispatcher
            .dispatch(&url, Platform::Twitter, comments())
            .await
            .unwrap();

        assert_eq!(outcome.source, ResultSource::Remote);
        assert_eq!(outcome.result, analyze_partition(&worker_lexicon, &comments()));
    }

    // ============================================================
    // FALLBACK
    // ============================================================

    #[tokio::test]
    async fn test_unreachable_worker_falls_back_to_local() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let dispatcher = dispatcher(Duration::from_secs(2));
        let outcome = dispatcher
            .dispatch(&url, Platform::Twitter, comments())
            .await
            .unwrap();

        assert!(matches!(outcome.source, ResultSource::Fallback { .. }));
        assert_eq!(outcome.result, analyze_partition(&Lexicon::default(), &comments()));

        let stats = dispatcher.worker_stats(&url);
        assert_eq!(stats.fallbacks, 1);
        assert_eq!(stats.remote_successes, 0);
        assert!(stats.last_error.is_some());
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_local() {
        let app = Router::new().route(
            ENDPOINT_ANALYZE,
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = serve(app).await;

        let outcome = dispatcher(Duration::from_secs(2))
            .dispatch(&url, Platform::Twitter, comments())
            .await
            .unwrap();

        match outcome.source {
            ResultSource::Fallback { reason } => assert!(reason.contains("500"), "{}", reason),
            other => panic!("Expected fallback, got {:?}", other),
        }
        assert_eq!(outcome.result, analyze_partition(&Lexicon::default(), &comments()));
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back_to_local() {
        let app = Router::new().route(
            ENDPOINT_ANALYZE,
            post(|| async { axum::Json(serde_json::json!({"unexpected": true})) }),
        );
        let url = serve(app).await;

        let outcome = dispatcher(Duration::from_secs(2))
            .dispatch(&url, Platform::Twitter, comments())
            .await
            .unwrap();

        assert!(matches!(outcome.source, ResultSource::Fallback { .. }));
        assert_eq!(outcome.result, analyze_partition(&Lexicon::default(), &comments()));
    }

    #[tokio::test]
    async fn test_slow_worker_times_out_and_falls_back() {
        let app = Router::new().route(
            ENDPOINT_ANALYZE,
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let url = serve(app).await;
        let dispatcher = dispatcher(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let outcome = dispatcher
            .dispatch(&url, Platform::Twitter, comments())
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(3));
        match outcome.source {
            ResultSource::Fallback { reason } => assert!(reason.contains("timed out"), "{}", reason),
            other => panic!("Expected fallback, got {:?}", other),
        }
        assert_eq!(outcome.result, analyze_partition(&Lexicon::default(), &comments()));
    }

    #[tokio::test]
    async fn test_empty_partition_round_trips() {
        let url = serve(worker_router(Arc::new(Lexicon::default()))).await;

        let outcome = dispatcher(Duration::from_secs(5))
            .dispatch(&url, Platform::Facebook, vec![])
            .await
            .unwrap();

        assert_eq!(outcome.source, ResultSource::Remote);
        assert_eq!(outcome.result.processed, 0);
        assert!(outcome.result.sentiment_counts.is_empty());
    }

    // ============================================================
    // PROBES AND WORKER ENDPOINTS
    // ============================================================

    #[tokio::test]
    async fn test_probe_reports_liveness() {
        let url = serve(worker_router(Arc::new(Lexicon::default()))).await;
        let dispatcher = dispatcher(Duration::from_secs(5));

        assert!(dispatcher.probe(&url).await);
        assert!(dispatcher.probe(&format!("{}/", url)).await);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        assert!(!dispatcher.probe(&dead).await);
    }

    #[tokio::test]
    async fn test_worker_health_endpoint() {
        let url = serve(worker_router(Arc::new(Lexicon::default()))).await;

        let health: WorkerHealthResponse = reqwest::get(format!("{}{}", url, ENDPOINT_HEALTH))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "sentiment_worker");
    }

    #[tokio::test]
    async fn test_worker_analyze_wire_format() {
        let url = serve(worker_router(Arc::new(Lexicon::default()))).await;

        let body: serde_json::Value = reqwest::Client::new()
            .post(format!("{}{}", url, ENDPOINT_ANALYZE))
            .json(&serde_json::json!({
                "comments": [{"id": 7, "platform": "twitter", "text": "Bon produit"}]
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["comments_processed"], 1);
        assert_eq!(body["sentiments"]["positive"], 1);
        assert_eq!(body["platform_stats"]["twitter"], 1);
        assert_eq!(body["keyword_mentions"]["produit"], 1);
    }
}
