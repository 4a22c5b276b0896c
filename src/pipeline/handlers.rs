use super::pipeline::AnalysisPipeline;
use super::types::{HealthResponse, WorkerHealth};
use crate::analysis::types::AnalysisReport;
use crate::config::{worker_urls, PartitionTarget};
use crate::corpus::loader::{compute_stats, CorpusStats};
use crate::error::AnalysisError;

use axum::{Extension, Json};
use std::sync::Arc;

/// Runs the whole pipeline and blocks until the report is ready.
/// Bypasses the job coordinator entirely.
pub async fn handle_analyze(
    Extension(pipeline): Extension<Arc<AnalysisPipeline>>,
) -> Result<Json<AnalysisReport>, AnalysisError> {
    match pipeline.run().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Synchronous analysis failed: {}", e);
            Err(e)
        }
    }
}

/// Corpus size and raw platform breakdown. A missing corpus reads as empty.
pub async fn handle_stats(
    Extension(pipeline): Extension<Arc<AnalysisPipeline>>,
) -> Result<Json<CorpusStats>, AnalysisError> {
    match pipeline.corpus().stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(AnalysisError::CorpusUnavailable { path, source }) => {
            tracing::warn!("Corpus {:?} not available for stats: {}", path, source);
            Ok(Json(compute_stats(&[])))
        }
        Err(e) => Err(e),
    }
}

pub async fn handle_health(
    Extension(pipeline): Extension<Arc<AnalysisPipeline>>,
) -> Json<HealthResponse> {
    let nodes_configured = worker_urls(pipeline.assignments());
    let mut probes = Vec::new();

    for assignment in pipeline.assignments() {
        if let PartitionTarget::Remote(url) = &assignment.target {
            let dispatcher = pipeline.dispatcher().clone();
            let url = url.clone();
            let platform = assignment.platform;
            probes.push(tokio::spawn(async move {
                let alive = dispatcher.probe(&url).await;
                WorkerHealth {
                    platform,
                    stats: dispatcher.worker_stats(&url),
                    url,
                    alive,
                }
            }));
        }
    }

    let mut workers = Vec::with_capacity(probes.len());
    for probe in probes {
        match probe.await {
            Ok(health) => workers.push(health),
            Err(e) => tracing::warn!("Worker probe task failed: {}", e),
        }
    }

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "sentiment_coordinator".to_string(),
        nodes_configured,
        workers,
    })
}
