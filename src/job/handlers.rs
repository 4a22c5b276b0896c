use super::coordinator::JobCoordinator;
use super::protocol::{JobStatusResponse, StartJobResponse};
use crate::error::AnalysisError;

use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

pub async fn handle_start_job(
    Extension(coordinator): Extension<Arc<JobCoordinator>>,
) -> Result<(StatusCode, Json<StartJobResponse>), AnalysisError> {
    let run_id = coordinator.start().await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(StartJobResponse {
            message: "Analysis started".to_string(),
            run_id,
        }),
    ))
}

pub async fn handle_job_status(
    Extension(coordinator): Extension<Arc<JobCoordinator>>,
) -> Json<JobStatusResponse> {
    Json(coordinator.status().await.into())
}

pub async fn handle_clear_job(
    Extension(coordinator): Extension<Arc<JobCoordinator>>,
) -> Json<JobStatusResponse> {
    let job = coordinator.clear().await;
    tracing::info!("Job cleared");
    Json(job.into())
}
