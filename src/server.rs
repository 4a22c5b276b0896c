//! HTTP Routers
//!
//! One router per node role. Shared state is injected through `Extension` layers.

use crate::analysis::lexicon::Lexicon;
use crate::dispatch::handlers::{handle_analyze as handle_worker_analyze, handle_worker_health};
use crate::dispatch::protocol::{ENDPOINT_ANALYZE, ENDPOINT_HEALTH};
use crate::job::coordinator::JobCoordinator;
use crate::job::handlers::{handle_clear_job, handle_job_status, handle_start_job};
use crate::job::protocol::{ENDPOINT_JOB_CLEAR, ENDPOINT_JOB_START, ENDPOINT_JOB_STATUS};
use crate::pipeline::handlers::{handle_analyze, handle_health, handle_stats};
use crate::pipeline::pipeline::AnalysisPipeline;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub const ENDPOINT_API_ANALYZE: &str = "/api/analyze";
pub const ENDPOINT_API_STATS: &str = "/api/stats";

pub fn coordinator_router(
    pipeline: Arc<AnalysisPipeline>,
    coordinator: Arc<JobCoordinator>,
) -> Router {
    Router::new()
        .route(ENDPOINT_API_ANALYZE, get(handle_analyze).post(handle_analyze))
        .route(ENDPOINT_API_STATS, get(handle_stats))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(ENDPOINT_JOB_START, post(handle_start_job))
        .route(ENDPOINT_JOB_STATUS, get(handle_job_status))
        .route(ENDPOINT_JOB_CLEAR, get(handle_clear_job).post(handle_clear_job))
        .layer(Extension(pipeline))
        .layer(Extension(coordinator))
}

pub fn worker_router(lexicon: Arc<Lexicon>) -> Router {
    Router::new()
        .route(ENDPOINT_ANALYZE, post(handle_worker_analyze))
        .route(ENDPOINT_HEALTH, get(handle_worker_health))
        .layer(Extension(lexicon))
}
