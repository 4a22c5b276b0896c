//! Reducer
//!
//! Merges partition results into one `AggregateResult`. Sums are order independent;
//! the only order-sensitive outputs are tie-breaks, which go to the key seen first
//! across the merge sequence (partition order, then key order within a partition).

use super::types::{AggregateResult, KeywordCount, PartitionResult, Sentiment};
use indexmap::IndexMap;
use std::hash::Hash;

pub const TOP_KEYWORDS_LIMIT: usize = 10;

pub fn reduce(results: &[PartitionResult]) -> AggregateResult {
    let total_comments: u64 = results.iter().map(|r| r.processed).sum();

    let sentiments = merge_counts(results.iter().map(|r| &r.sentiment_counts));
    let platform_distribution = merge_counts(results.iter().map(|r| &r.platform_counts));
    let keywords = merge_counts(results.iter().map(|r| &r.keyword_counts));

    if total_comments == 0 {
        return AggregateResult {
            sentiment_distribution: IndexMap::new(),
            platform_distribution,
            top_keywords: Vec::new(),
            total_comments,
            overall_sentiment: Sentiment::Neutral,
        };
    }

    let sentiment_distribution = sentiments
        .iter()
        .map(|(sentiment, count)| (*sentiment, percentage(*count, total_comments)))
        .collect();

    let overall_sentiment = rank_by_count(&sentiments)
        .first()
        .map(|(sentiment, _)| **sentiment)
        .unwrap_or(Sentiment::Neutral);

    let top_keywords = rank_by_count(&keywords)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .take(TOP_KEYWORDS_LIMIT)
        .map(|(keyword, count)| KeywordCount {
            keyword: keyword.clone(),
            count,
        })
        .collect();

    AggregateResult {
        sentiment_distribution,
        platform_distribution,
        top_keywords,
        total_comments,
        overall_sentiment,
    }
}

/// Sums maps key by key. The returned map is ordered by first appearance.
fn merge_counts<'a, K>(maps: impl Iterator<Item = &'a IndexMap<K, u64>>) -> IndexMap<K, u64>
where
    K: Hash + Eq + Clone + 'a,
{
    let mut merged: IndexMap<K, u64> = IndexMap::new();
    for map in maps {
        for (key, count) in map {
            *merged.entry(key.clone()).or_insert(0) += count;
        }
    }
    merged
}

/// Sorts entries by `(count desc, first_seen asc)`.
fn rank_by_count<K>(counts: &IndexMap<K, u64>) -> Vec<(&K, u64)> {
    let mut ranked: Vec<(usize, &K, u64)> = counts
        .iter()
        .enumerate()
        .map(|(first_seen, (key, count))| (first_seen, key, *count))
        .collect();

    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .map(|(_, key, count)| (key, count))
        .collect()
}

fn percentage(count: u64, total: u64) -> f64 {
    let pct = 100.0 * count as f64 / total as f64;
    (pct * 100.0).round() / 100.0
}
