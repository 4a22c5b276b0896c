//! Corpus Module
//!
//! Everything that happens before analysis: reading the comment corpus from disk
//! and splitting it into per-platform partitions.
//!
//! ## Submodules
//! - **`types`**: Raw corpus records, typed comments and the platform key.
//! - **`loader`**: Reads the corpus document fully into memory.
//! - **`partitioner`**: Groups comments by platform into disjoint partitions.

pub mod loader;
pub mod partitioner;
pub mod types;
