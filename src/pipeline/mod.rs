//! Analysis Pipeline Module
//!
//! Wires the stages together: Loader → Partitioner → (Local Analyzer | Dispatcher)
//! per partition → Reducer.
//!
//! Partitions are processed concurrently, so a run takes as long as its slowest
//! partition (worker timeout plus local fallback in the worst case), not the sum.
//!
//! ## Submodules
//! - **`pipeline`**: The `AnalysisPipeline` itself.
//! - **`handlers`**: Synchronous analysis, corpus stats and health endpoints.
//! - **`types`**: Response bodies of the stats and health endpoints.

pub mod handlers;
pub mod pipeline;
pub mod types;
