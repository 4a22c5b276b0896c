//! Worker Dispatch Module
//!
//! Ships partitions to remote worker nodes over HTTP and falls back to local analysis
//! whenever a worker cannot deliver a usable result.
//!
//! ## Fallback Model
//! 1. **Remote attempt**: the partition is POSTed to the worker once, bounded by a timeout.
//! 2. **Trust**: a well-formed success response is used as is, without re-validation.
//! 3. **Fallback**: timeouts, connection errors, non-success statuses and malformed bodies
//!    all lead to the same partition being analyzed locally. The fallback is logged and
//!    counted per worker but never fails the run.
//!
//! ## Submodules
//! - **`protocol`**: Endpoints and DTOs of the worker protocol.
//! - **`dispatcher`**: The client side (remote call, fallback, telemetry, probes).
//! - **`handlers`**: The server side, run by worker-role nodes.

pub mod dispatcher;
pub mod handlers;
pub mod protocol;

#[cfg(test)]
mod tests;
