//! Analysis Data Types

use crate::corpus::types::Platform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single comment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Raw counts for one partition (the output of the map step).
///
/// The maps keep insertion order: the first key counted comes first. The reducer
/// relies on this to break ties by first-seen order. Field names on the wire follow
/// the worker protocol.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartitionResult {
    #[serde(rename = "sentiments")]
    pub sentiment_counts: IndexMap<Sentiment, u64>,
    #[serde(rename = "platform_stats")]
    pub platform_counts: IndexMap<Platform, u64>,
    #[serde(rename = "keyword_mentions")]
    pub keyword_counts: IndexMap<String, u64>,
    #[serde(rename = "comments_processed")]
    pub processed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// The merged, cluster-wide report (the output of the reduce step).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateResult {
    /// Percentage of comments per sentiment, rounded to two decimals.
    pub sentiment_distribution: IndexMap<Sentiment, f64>,
    pub platform_distribution: IndexMap<Platform, u64>,
    /// At most ten keywords, most mentioned first.
    pub top_keywords: Vec<KeywordCount>,
    pub total_comments: u64,
    pub overall_sentiment: Sentiment,
}

/// Response of the synchronous full-pipeline endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub analysis: AggregateResult,
    /// Wall-clock seconds, rounded to two decimals.
    pub processing_time: f64,
    pub distributed_processing: bool,
}
