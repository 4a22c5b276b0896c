use super::dispatcher::analyze_local;
use super::protocol::{AnalyzeRequest, WorkerHealthResponse};
use crate::analysis::lexicon::Lexicon;
use crate::analysis::types::PartitionResult;
use crate::error::AnalysisError;

use axum::{Extension, Json};
use std::sync::Arc;

/// Worker side of the protocol: analyze the received partition and return its counts.
pub async fn handle_analyze(
    Extension(lexicon): Extension<Arc<Lexicon>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<PartitionResult>, AnalysisError> {
    let count = req.comments.len();
    tracing::info!("Received partition of {} comments", count);

    let result = analyze_local(lexicon, req.comments).await.map_err(|e| {
        tracing::error!("Failed to analyze partition: {}", e);
        e
    })?;

    tracing::debug!(
        "Analyzed {} comments: {:?}",
        count,
        result.sentiment_counts
    );

    Ok(Json(result))
}

pub async fn handle_worker_health() -> Json<WorkerHealthResponse> {
    Json(WorkerHealthResponse {
        status: "healthy".to_string(),
        service: "sentiment_worker".to_string(),
    })
}
