//! Platform Partitioner

use super::types::{Comment, CorpusRecord, Platform};
use std::collections::BTreeMap;

/// Disjoint per-platform partitions of a corpus.
pub type Partitions = BTreeMap<Platform, Vec<Comment>>;

/// Groups records by platform, preserving their relative order.
///
/// Records whose platform is not a recognized `Platform` are dropped from every
/// partition. Only platforms with at least one record get an entry.
pub fn partition_by_platform(records: Vec<CorpusRecord>) -> Partitions {
    let mut partitions: Partitions = BTreeMap::new();
    let mut dropped = 0usize;

    for record in records {
        match record.platform.parse::<Platform>() {
            Ok(platform) => partitions.entry(platform).or_default().push(Comment {
                id: record.id,
                platform,
                text: record.text,
            }),
            Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} comments with unrecognized platforms", dropped);
    }

    for (platform, comments) in partitions.iter() {
        tracing::debug!("Partition {}: {} comments", platform, comments.len());
    }

    partitions
}

/// Total number of comments across all partitions.
pub fn partitioned_count(partitions: &Partitions) -> usize {
    partitions.values().map(|comments| comments.len()).sum()
}
