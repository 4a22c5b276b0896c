use crate::corpus::types::Platform;
use crate::dispatch::dispatcher::WorkerStats;
use serde::{Deserialize, Serialize};

/// Liveness and dispatch telemetry for one configured worker.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerHealth {
    pub platform: Platform,
    pub url: String,
    pub alive: bool,
    pub stats: WorkerStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub nodes_configured: Vec<String>,
    pub workers: Vec<WorkerHealth>,
}
