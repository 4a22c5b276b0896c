//! Worker Dispatcher
//!
//! Client side of the worker protocol. One remote attempt per partition, no retries.
//! Any failure is absorbed here by analyzing the partition locally instead.

use super::protocol::{AnalyzeRequest, ENDPOINT_ANALYZE, ENDPOINT_HEALTH};
use crate::analysis::analyzer::analyze_partition;
use crate::analysis::lexicon::Lexicon;
use crate::analysis::types::PartitionResult;
use crate::corpus::types::{Comment, Platform};
use crate::error::{AnalysisError, Result};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Why a remote analysis attempt was abandoned.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("worker answered with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Where a partition result came from. The reducer never looks at this.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSource {
    Local,
    Remote,
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub result: PartitionResult,
    pub source: ResultSource,
}

/// Dispatch telemetry for one worker address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkerStats {
    pub remote_successes: u64,
    pub fallbacks: u64,
    pub last_error: Option<String>,
    pub last_latency_ms: Option<u64>,
}

/// Sends partitions to workers and falls back to local analysis on failure.
#[derive(Clone)]
pub struct WorkerDispatcher {
    http_client: reqwest::Client,
    timeout: Duration,
    lexicon: Arc<Lexicon>,
    /// Keyed by worker base URL.
    stats: Arc<DashMap<String, WorkerStats>>,
}

impl WorkerDispatcher {
    pub fn new(lexicon: Arc<Lexicon>, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
            lexicon,
            stats: Arc::new(DashMap::new()),
        }
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// Analyzes `comments` on the worker at `worker_url`, or locally if that fails.
    ///
    /// Only a failure of the local analysis itself is returned as an error.
    pub async fn dispatch(
        &self,
        worker_url: &str,
        platform: Platform,
        comments: Vec<Comment>,
    ) -> Result<DispatchOutcome> {
        let worker_url = worker_url.trim_end_matches('/');
        let request = AnalyzeRequest { comments };

        tracing::info!(
            "Sending {} {} comments to worker {}",
            request.comments.len(),
            platform,
            worker_url
        );

        let started = Instant::now();
        match self.send(worker_url, &request).await {
            Ok(result) => {
                self.record_success(worker_url, started.elapsed());
                tracing::info!(
                    "Worker {} analyzed {} partition ({} comments)",
                    worker_url,
                    platform,
                    result.processed
                );
                Ok(DispatchOutcome {
                    result,
                    source: ResultSource::Remote,
                })
            }
            Err(e) => {
                let reason = e.to_string();
                self.record_fallback(worker_url, &reason, started.elapsed());
                tracing::warn!(
                    "Worker {} failed for {} partition: {}. Falling back to local analysis",
                    worker_url,
                    platform,
                    reason
                );

                let result = analyze_local(self.lexicon.clone(), request.comments).await?;
                Ok(DispatchOutcome {
                    result,
                    source: ResultSource::Fallback { reason },
                })
            }
        }
    }

    /// One remote attempt. The response is trusted once it parses.
    async fn send(
        &self,
        worker_url: &str,
        request: &AnalyzeRequest,
    ) -> std::result::Result<PartitionResult, DispatchError> {
        let response = self
            .http_client
            .post(format!("{}{}", worker_url, ENDPOINT_ANALYZE))
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        if !response.status().is_success() {
            return Err(DispatchError::Status(response.status().as_u16()));
        }

        response.json::<PartitionResult>().await.map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout(self.timeout)
            } else {
                DispatchError::Malformed(e.to_string())
            }
        })
    }

    fn classify_error(&self, e: reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout(self.timeout)
        } else {
            DispatchError::Transport(e.to_string())
        }
    }

    /// Liveness check against the worker's health endpoint.
    pub async fn probe(&self, worker_url: &str) -> bool {
        let url = format!("{}{}", worker_url.trim_end_matches('/'), ENDPOINT_HEALTH);

        match self
            .http_client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Probe of {} failed: {}", url, e);
                false
            }
        }
    }

    pub fn worker_stats(&self, worker_url: &str) -> WorkerStats {
        self.stats
            .get(worker_url.trim_end_matches('/'))
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn record_success(&self, worker_url: &str, latency: Duration) {
        let mut entry = self.stats.entry(worker_url.to_string()).or_default();
        entry.remote_successes += 1;
        entry.last_latency_ms = Some(latency.as_millis() as u64);
    }

    fn record_fallback(&self, worker_url: &str, reason: &str, latency: Duration) {
        let mut entry = self.stats.entry(worker_url.to_string()).or_default();
        entry.fallbacks += 1;
        entry.last_error = Some(reason.to_string());
        entry.last_latency_ms = Some(latency.as_millis() as u64);
    }
}

/// Runs the local analyzer on a blocking thread.
pub async fn analyze_local(lexicon: Arc<Lexicon>, comments: Vec<Comment>) -> Result<PartitionResult> {
    tokio::task::spawn_blocking(move || analyze_partition(&lexicon, &comments))
        .await
        .map_err(|e| AnalysisError::Internal(format!("Local analysis task failed: {}", e)))
}
