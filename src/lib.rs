//! Distributed Sentiment Analysis Library
//!
//! Computes a sentiment distribution over a comment corpus by partitioning it per
//! platform, analyzing each partition locally or on a remote worker, and merging
//! the partial counts into one report.
//!
//! ## Architecture Modules
//! - **`corpus`**: Loading the corpus document and partitioning it by platform.
//! - **`analysis`**: The pure map (lexicon scoring) and reduce (merging) steps.
//! - **`dispatch`**: The worker protocol, with local fallback when a worker fails.
//! - **`pipeline`**: Load → partition → analyze/dispatch → reduce, plus the
//!   synchronous, stats and health endpoints.
//! - **`job`**: The single-flight background job coordinator polled by dashboards.
//! - **`config`**, **`error`**, **`server`**: Node configuration, error types and routers.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod dispatch;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod server;
