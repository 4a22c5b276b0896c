//! Job Control Protocol
//!
//! Endpoints polled by an external dashboard to drive the background job.

use super::types::{Job, JobState};
use crate::analysis::types::AggregateResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ENDPOINT_JOB_START: &str = "/job/start";
pub const ENDPOINT_JOB_STATUS: &str = "/job/status";
pub const ENDPOINT_JOB_CLEAR: &str = "/job/clear";

#[derive(Debug, Serialize, Deserialize)]
pub struct StartJobResponse {
    pub message: String,
    pub run_id: Uuid,
}

/// What a polling caller sees of the job.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub processing: bool,
    pub has_results: bool,
    pub results: Option<AggregateResult>,
    pub state: JobState,
    pub error: Option<String>,
    pub run_id: Option<Uuid>,
    pub started_at: Option<u64>,
    pub duration_ms: Option<u64>,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        Self {
            processing: job.is_running(),
            has_results: job.has_results(),
            results: job.result,
            state: job.state,
            error: job.error,
            run_id: job.run_id,
            started_at: job.started_at,
            duration_ms: job.duration_ms,
        }
    }
}
