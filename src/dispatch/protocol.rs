//! Worker Protocol
//!
//! A coordinator sends `{comments: [...]}` to `ENDPOINT_ANALYZE` and expects a
//! `PartitionResult` back (`{sentiments, platform_stats, keyword_mentions, comments_processed}`).

use crate::corpus::types::Comment;
use serde::{Deserialize, Serialize};

pub const ENDPOINT_ANALYZE: &str = "/analyze";
pub const ENDPOINT_HEALTH: &str = "/health";

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerHealthResponse {
    pub status: String,
    pub service: String,
}
