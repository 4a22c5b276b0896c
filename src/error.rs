//! Error types shared by the pipeline, the job coordinator and the HTTP layer.
//!
//! Only input errors and coordination conflicts are ever reported to a caller
//! synchronously. Worker failures never show up here; the dispatcher absorbs
//! them (see `dispatch::dispatcher`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No comments found in corpus")]
    EmptyCorpus,

    #[error("Corpus file {path:?} could not be read: {source}")]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus document is malformed: {0}")]
    CorpusFormat(#[from] serde_json::Error),

    #[error("An analysis is already running")]
    Conflict,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Input errors: the corpus is missing, unreadable or empty.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyCorpus
                | AnalysisError::CorpusUnavailable { .. }
                | AnalysisError::CorpusFormat(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Conflict => StatusCode::CONFLICT,
            AnalysisError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
