//! Job Data Types
//!
//! The job record polled by callers and its state transitions.

use crate::analysis::types::AggregateResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Lifecycle state of the analysis job.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Nothing started, or cleared.
    #[default]
    Idle,
    /// A pipeline execution is in flight.
    Running,
    /// The last execution produced a result.
    Succeeded,
    /// The last execution failed; `error` says why.
    Failed,
}

/// The analysis job as seen by callers. Only the coordinator mutates it;
/// everybody else gets clones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub state: JobState,
    /// Identifies the execution that produced the current state.
    pub run_id: Option<Uuid>,
    pub result: Option<AggregateResult>,
    pub error: Option<String>,
    /// Unix time (ms) at which the current run was started.
    pub started_at: Option<u64>,
    pub duration_ms: Option<u64>,
}

impl Job {
    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }

    pub fn has_results(&self) -> bool {
        self.result.is_some()
    }

    /// Moves to `running` for a fresh execution and returns its id.
    pub(crate) fn begin(&mut self) -> Uuid {
        let run_id = Uuid::new_v4();
        *self = Job {
            state: JobState::Running,
            run_id: Some(run_id),
            started_at: Some(now_ms()),
            ..Job::default()
        };
        run_id
    }

    pub(crate) fn succeed(&mut self, run_id: Uuid, result: AggregateResult, elapsed: Duration) {
        self.state = JobState::Succeeded;
        self.run_id = Some(run_id);
        self.result = Some(result);
        self.error = None;
        self.duration_ms = Some(elapsed.as_millis() as u64);
    }

    pub(crate) fn fail(&mut self, run_id: Uuid, error: String, elapsed: Duration) {
        self.state = JobState::Failed;
        self.run_id = Some(run_id);
        self.result = None;
        self.error = Some(error);
        self.duration_ms = Some(elapsed.as_millis() as u64);
    }
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
