//! Analysis Pipeline
//!
//! One run over the corpus: load, partition, analyze each partition where it is
//! assigned, then reduce in assignment order.

use crate::analysis::reducer::reduce;
use crate::analysis::types::{AggregateResult, AnalysisReport, PartitionResult};
use crate::config::{NodeConfig, PartitionTarget, WorkerAssignment};
use crate::corpus::loader::CorpusLoader;
use crate::corpus::partitioner::partition_by_platform;
use crate::corpus::types::{Comment, CorpusRecord, Platform};
use crate::dispatch::dispatcher::{analyze_local, WorkerDispatcher};
use crate::error::{AnalysisError, Result};

use std::time::Instant;
use tokio::task::JoinHandle;

/// The full map/reduce run over one corpus.
pub struct AnalysisPipeline {
    corpus: CorpusLoader,
    /// Platform → target, in merge order.
    assignments: Vec<WorkerAssignment>,
    dispatcher: WorkerDispatcher,
}

impl AnalysisPipeline {
    pub fn new(
        corpus: CorpusLoader,
        assignments: Vec<WorkerAssignment>,
        dispatcher: WorkerDispatcher,
    ) -> Self {
        Self {
            corpus,
            assignments,
            dispatcher,
        }
    }

    pub fn from_config(config: &NodeConfig, dispatcher: WorkerDispatcher) -> Self {
        Self::new(
            CorpusLoader::File(config.corpus_path.clone()),
            config.assignments.clone(),
            dispatcher,
        )
    }

    pub fn corpus(&self) -> &CorpusLoader {
        &self.corpus
    }

    pub fn assignments(&self) -> &[WorkerAssignment] {
        &self.assignments
    }

    pub fn dispatcher(&self) -> &WorkerDispatcher {
        &self.dispatcher
    }

    /// Loads the corpus. Missing, malformed or empty corpora are input errors.
    pub async fn load(&self) -> Result<Vec<CorpusRecord>> {
        self.corpus.load().await
    }

    /// Partitions the records, analyzes every partition and merges the results.
    ///
    /// Worker failures are absorbed by the dispatcher; only a crashed partition
    /// task makes this fail.
    pub async fn process(&self, records: Vec<CorpusRecord>) -> Result<AggregateResult> {
        let mut partitions = partition_by_platform(records);
        let mut tasks: Vec<(Platform, JoinHandle<Result<PartitionResult>>)> = Vec::new();

        for assignment in self.assignments.iter() {
            if let Some(comments) = partitions.remove(&assignment.platform) {
                tasks.push((
                    assignment.platform,
                    self.spawn_partition(assignment.platform, &assignment.target, comments),
                ));
            }
        }

        // Recognized platforms nobody was assigned to stay on this node.
        for (platform, comments) in partitions {
            tracing::debug!("No assignment for {}, analyzing locally", platform);
            tasks.push((
                platform,
                self.spawn_partition(platform, &PartitionTarget::Local, comments),
            ));
        }

        // Awaited in spawn order: this is the merge sequence.
        let mut results = Vec::with_capacity(tasks.len());
        for (platform, task) in tasks {
            let result = task.await.map_err(|e| {
                AnalysisError::Internal(format!("{} partition task failed: {}", platform, e))
            })??;
            tracing::debug!("{} partition done ({} comments)", platform, result.processed);
            results.push(result);
        }

        tracing::info!("Merging {} partition results", results.len());
        Ok(reduce(&results))
    }

    fn spawn_partition(
        &self,
        platform: Platform,
        target: &PartitionTarget,
        comments: Vec<Comment>,
    ) -> JoinHandle<Result<PartitionResult>> {
        let dispatcher = self.dispatcher.clone();

        match target {
            PartitionTarget::Local => {
                tracing::info!("Analyzing {} {} comments locally", comments.len(), platform);
                let lexicon = dispatcher.lexicon().clone();
                tokio::spawn(async move { analyze_local(lexicon, comments).await })
            }
            PartitionTarget::Remote(url) => {
                let url = url.clone();
                tokio::spawn(async move {
                    dispatcher
                        .dispatch(&url, platform, comments)
                        .await
                        .map(|outcome| outcome.result)
                })
            }
        }
    }

    /// Load, process and time a whole run.
    pub async fn run(&self) -> Result<AnalysisReport> {
        let started = Instant::now();

        let records = self.load().await?;
        tracing::info!("Analyzing {} comments", records.len());

        let analysis = self.process(records).await?;
        let processing_time = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;

        tracing::info!(
            "Analysis finished in {}s: {} comments, overall {}",
            processing_time,
            analysis.total_comments,
            analysis.overall_sentiment
        );

        Ok(AnalysisReport {
            analysis,
            processing_time,
            distributed_processing: true,
        })
    }
}
