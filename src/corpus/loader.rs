//! Corpus Loader
//!
//! Reads the whole corpus document into memory once per pipeline run.
//! No streaming: the document is small enough to be parsed in one go, and every
//! run needs all of it anyway.

use super::types::{CorpusDocument, CorpusRecord};
use crate::error::{AnalysisError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the corpus comes from.
#[derive(Debug, Clone)]
pub enum CorpusLoader {
    /// A JSON document on disk, re-read on every load.
    File(PathBuf),
    /// A fixed set of records held in memory.
    InMemory(Arc<Vec<CorpusRecord>>),
}

/// Size and platform breakdown of the raw corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusStats {
    pub total_comments: usize,
    pub platform_distribution: BTreeMap<String, usize>,
}

impl CorpusLoader {
    pub fn from_records(records: Vec<CorpusRecord>) -> Self {
        CorpusLoader::InMemory(Arc::new(records))
    }

    /// Loads the corpus, failing with `EmptyCorpus` if it holds no records.
    pub async fn load(&self) -> Result<Vec<CorpusRecord>> {
        let records = self.load_raw().await?;

        if records.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        tracing::info!("Loaded {} comments from {}", records.len(), self.describe());
        Ok(records)
    }

    /// Loads the corpus without the emptiness check.
    pub async fn load_raw(&self) -> Result<Vec<CorpusRecord>> {
        match self {
            CorpusLoader::InMemory(records) => Ok(records.as_ref().clone()),
            CorpusLoader::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| {
                    tracing::error!("Corpus file {:?} not readable: {}", path, source);
                    AnalysisError::CorpusUnavailable {
                        path: path.clone(),
                        source,
                    }
                })?;

                // Large documents: keep the parse off the async workers.
                let document = tokio::task::spawn_blocking(move || {
                    serde_json::from_slice::<CorpusDocument>(&bytes)
                })
                .await
                .map_err(|e| AnalysisError::Internal(format!("Corpus parse task failed: {}", e)))??;

                Ok(document.comments)
            }
        }
    }

    /// Counts records per raw platform value, unknown platforms included.
    pub async fn stats(&self) -> Result<CorpusStats> {
        let records = self.load_raw().await?;
        Ok(compute_stats(&records))
    }

    fn describe(&self) -> String {
        match self {
            CorpusLoader::File(path) => format!("{}", path.display()),
            CorpusLoader::InMemory(_) => "memory".to_string(),
        }
    }
}

pub fn compute_stats(records: &[CorpusRecord]) -> CorpusStats {
    let mut platform_distribution = BTreeMap::new();
    for record in records {
        *platform_distribution
            .entry(record.platform.clone())
            .or_insert(0) += 1;
    }

    CorpusStats {
        total_comments: records.len(),
        platform_distribution,
    }
}
