use std::{fmt::Display, path::PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// One of the three precomputed inputs the engine is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Catalog,
    TitleIndex,
    FeatureMatrix,
}

impl Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Artifact::Catalog => write!(f, "catalog"),
            Artifact::TitleIndex => write!(f, "title index"),
            Artifact::FeatureMatrix => write!(f, "feature matrix"),
        }
    }
}

/// Startup failures. Any of these aborts the load entirely.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Missing artifact: {artifact} not found at {}", .path.display())]
    MissingArtifact { artifact: Artifact, path: PathBuf },

    #[error("Corrupt artifact: {artifact}: {message}")]
    CorruptArtifact { artifact: Artifact, message: String },
}

impl LoadError {
    pub fn corrupt(artifact: Artifact, message: impl Into<String>) -> Self {
        LoadError::CorruptArtifact {
            artifact,
            message: message.into(),
        }
    }

    /// The artifact that caused the failure
    pub fn artifact(&self) -> Artifact {
        match self {
            LoadError::MissingArtifact { artifact, .. } => *artifact,
            LoadError::CorruptArtifact { artifact, .. } => *artifact,
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_message_names_artifact() {
        let err = LoadError::MissingArtifact {
            artifact: Artifact::TitleIndex,
            path: PathBuf::from("data/title_index.json"),
        };
        assert_eq!(
            err.to_string(),
            "Missing artifact: title index not found at data/title_index.json"
        );
        assert_eq!(err.artifact(), Artifact::TitleIndex);
    }

    #[test]
    fn test_corrupt_artifact_message() {
        let err = LoadError::corrupt(Artifact::FeatureMatrix, "100 rows but catalog has 99 items");
        assert_eq!(
            err.to_string(),
            "Corrupt artifact: feature matrix: 100 rows but catalog has 99 items"
        );
    }

    #[test]
    fn test_error_status_codes() {
        let not_found = AppError::NotFound("x".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::InvalidInput("x".to_string()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let internal = AppError::Internal("x".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
