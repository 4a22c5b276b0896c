//! Background Job Module
//!
//! Runs the analysis pipeline in the background, at most once at a time, and lets
//! callers poll its progress.
//!
//! ## Lifecycle
//! `idle → running → {succeeded, failed}`, and `clear` returns any state to `idle`.
//! 1. **Start**: refused with a conflict while `running`. Otherwise the job moves to
//!    `running`, the corpus is loaded (input errors go straight back to the caller),
//!    and the rest of the pipeline is spawned.
//! 2. **Supervision**: a supervisor task awaits the pipeline's `JoinHandle` and records
//!    the outcome. Errors and panics become `failed`; nothing reaches the caller of `start`.
//! 3. **Polling**: `status` returns a snapshot under a read lock.
//! 4. **Clear**: hides the current state but does not cancel a running pipeline. When
//!    that pipeline finishes it overwrites the cleared state.
//!
//! ## Submodules
//! - **`types`**: The `Job` record and its states.
//! - **`coordinator`**: The single-flight `JobCoordinator`.
//! - **`protocol`**: Endpoints and DTOs of the control surface.
//! - **`handlers`**: Axum handlers for start/status/clear.

pub mod coordinator;
pub mod handlers;
pub mod protocol;
pub mod types;
