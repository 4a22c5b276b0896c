//! Sentiment Analysis Module
//!
//! The map and reduce halves of the pipeline. Both are pure: no I/O, no shared state.
//!
//! ## Overview
//! A partition of comments is mapped to a `PartitionResult` (raw counts). Partition
//! results, wherever they were computed, are reduced into one `AggregateResult`
//! (percentages, dominant sentiment, top keywords).
//!
//! ## Submodules
//! - **`lexicon`**: Positive/negative word sets and the tracked keyword list.
//! - **`analyzer`**: The map step (substring scoring and counting).
//! - **`reducer`**: The reduce step, with explicit first-seen tie-breaking.
//! - **`types`**: Result types shared with the worker protocol.

pub mod analyzer;
pub mod lexicon;
pub mod reducer;
pub mod types;
