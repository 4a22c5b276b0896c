//! Single-flight Job Coordinator
//!
//! Owns the only mutable run state of a coordinator node. All transitions happen
//! under the job's write lock, so the `running` check in `start` and the state write
//! cannot interleave with another `start`.

use super::types::{Job, JobState};
use crate::analysis::types::AggregateResult;
use crate::corpus::loader::CorpusLoader;
use crate::corpus::types::CorpusRecord;
use crate::error::{AnalysisError, Result};
use crate::pipeline::pipeline::AnalysisPipeline;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Type-erased "everything after loading" stage of the pipeline.
pub type ProcessFn = Arc<
    dyn Fn(Vec<CorpusRecord>) -> Pin<Box<dyn Future<Output = Result<AggregateResult>> + Send>>
        + Send
        + Sync,
>;

pub struct JobCoordinator {
    job: RwLock<Job>,
    corpus: CorpusLoader,
    process: ProcessFn,
    /// Supervisor of the most recently started execution.
    current_run: Mutex<Option<JoinHandle<()>>>,
}

impl JobCoordinator {
    /// A coordinator running `pipeline` (load, then process).
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Arc<Self> {
        let corpus = pipeline.corpus().clone();
        Self::with_process(corpus, move |records| {
            let pipeline = pipeline.clone();
            async move { pipeline.process(records).await }
        })
    }

    /// A coordinator with a custom processing stage.
    pub fn with_process<F, Fut>(corpus: CorpusLoader, process: F) -> Arc<Self>
    where
        F: Fn(Vec<CorpusRecord>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AggregateResult>> + Send + 'static,
    {
        let process_fn: ProcessFn = Arc::new(move |records: Vec<CorpusRecord>| {
            Box::pin(process(records))
                as Pin<Box<dyn Future<Output = Result<AggregateResult>> + Send>>
        });

        Arc::new(Self {
            job: RwLock::new(Job::default()),
            corpus,
            process: process_fn,
            current_run: Mutex::new(None),
        })
    }

    /// Starts one background execution.
    ///
    /// # Returns
    /// * `Ok(run_id)` once the corpus is loaded and the execution is spawned.
    /// * `Err(Conflict)` if a run is in flight; the job is left untouched.
    /// * An input error if the corpus is missing or empty; the job is then `failed`.
    pub async fn start(self: &Arc<Self>) -> Result<Uuid> {
        let run_id = {
            let mut job = self.job.write().await;
            if job.is_running() {
                tracing::warn!("Refusing to start: run {:?} still in flight", job.run_id);
                return Err(AnalysisError::Conflict);
            }
            job.begin()
        };
        let started = Instant::now();
        tracing::info!("Starting analysis run {}", run_id);

        let records = match self.corpus.load().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Run {} could not load the corpus: {}", run_id, e);
                self.job
                    .write()
                    .await
                    .fail(run_id, e.to_string(), started.elapsed());
                return Err(e);
            }
        };

        let coordinator = self.clone();
        let supervisor = tokio::spawn(async move {
            coordinator.supervise(run_id, records, started).await;
        });
        *self.current_run.lock().await = Some(supervisor);

        Ok(run_id)
    }

    /// Awaits the pipeline and records its outcome, whatever the job's state is by then.
    async fn supervise(self: Arc<Self>, run_id: Uuid, records: Vec<CorpusRecord>, started: Instant) {
        let pipeline = tokio::spawn((self.process)(records));
        let outcome = pipeline.await;
        let elapsed = started.elapsed();

        let mut job = self.job.write().await;
        if job.run_id != Some(run_id) || job.state != JobState::Running {
            tracing::warn!(
                "Run {} finished after the job was cleared or restarted; overwriting state {:?}",
                run_id,
                job.state
            );
        }

        match outcome {
            Ok(Ok(result)) => {
                tracing::info!(
                    "Run {} succeeded in {:?} ({} comments)",
                    run_id,
                    elapsed,
                    result.total_comments
                );
                job.succeed(run_id, result, elapsed);
            }
            Ok(Err(e)) => {
                tracing::error!("Run {} failed: {}", run_id, e);
                job.fail(run_id, e.to_string(), elapsed);
            }
            Err(join_error) => {
                tracing::error!("Run {} crashed: {}", run_id, join_error);
                job.fail(
                    run_id,
                    format!("Pipeline crashed: {}", join_error),
                    elapsed,
                );
            }
        }
    }

    /// Snapshot of the job. Never waits for the pipeline.
    pub async fn status(&self) -> Job {
        self.job.read().await.clone()
    }

    /// Resets the job to `idle`. A running pipeline keeps running.
    pub async fn clear(&self) -> Job {
        let mut job = self.job.write().await;
        if job.is_running() {
            tracing::warn!(
                "Clearing while run {:?} is in flight; its outcome will still be recorded",
                job.run_id
            );
        }
        *job = Job::default();
        job.clone()
    }

    /// Waits for the most recently started execution to finish, if there is one.
    pub async fn join(&self) {
        let supervisor = self.current_run.lock().await.take();
        if let Some(supervisor) = supervisor {
            if let Err(e) = supervisor.await {
                tracing::error!("Job supervisor task failed: {}", e);
            }
        }
    }
}
