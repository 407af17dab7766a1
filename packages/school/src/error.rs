use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use common::preview::PreviewError;
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `STUDENT_NOT_FOUND`, `FACULTY_NOT_FOUND`,
    /// `AVATAR_NOT_FOUND`, `INVALID_FILE`, `INSUFFICIENT_STUDENTS`, `VALIDATION_ERROR`,
    /// `BAD_REQUEST`, `FILE_PROCESSING_ERROR`, `IMAGE_PROCESSING_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "STUDENT_NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Student with ID 42 not found")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Field errors (`"field: message"`) for validation failures, the code otherwise.
    #[schema(example = json!(["STUDENT_NOT_FOUND"]))]
    pub details: Vec<String>,
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Student with ID {0} not found")]
    StudentNotFound(i32),
    #[error("Faculty with ID {0} not found")]
    FacultyNotFound(i32),
    #[error("Student with ID {0} has no Faculty")]
    StudentWithoutFaculty(i32),
    #[error("Avatar not found for Student with ID {0}")]
    AvatarNotFound(i32),
    #[error("{0}")]
    InvalidFile(String),
    #[error("Insufficient students for operation. Required: {required}, found: {found}")]
    InsufficientStudents { required: usize, found: usize },
    /// Field errors formatted as `"field: message"`.
    #[error("Validation Failed")]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    /// Unparseable body or missing query parameter. Answered as plain text.
    #[error("{0}")]
    MalformedRequest(String),
    #[error("Failed to process file during {operation} operation")]
    FileProcessing {
        operation: &'static str,
        detail: String,
    },
    #[error("Failed to process image during {operation}")]
    ImageProcessing {
        operation: &'static str,
        detail: String,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn file_processing(operation: &'static str, err: impl Display) -> Self {
        AppError::FileProcessing {
            operation,
            detail: err.to_string(),
        }
    }

    pub fn image_processing(operation: &'static str, err: impl Display) -> Self {
        AppError::ImageProcessing {
            operation,
            detail: err.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            AppError::FacultyNotFound(_) | AppError::StudentWithoutFaculty(_) => {
                "FACULTY_NOT_FOUND"
            }
            AppError::AvatarNotFound(_) => "AVATAR_NOT_FOUND",
            AppError::InvalidFile(_) => "INVALID_FILE",
            AppError::InsufficientStudents { .. } => "INSUFFICIENT_STUDENTS",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) | AppError::MalformedRequest(_) => "BAD_REQUEST",
            AppError::FileProcessing { .. } => "FILE_PROCESSING_ERROR",
            AppError::ImageProcessing { .. } => "IMAGE_PROCESSING_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::StudentNotFound(_)
            | AppError::FacultyNotFound(_)
            | AppError::StudentWithoutFaculty(_)
            | AppError::AvatarNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidFile(_)
            | AppError::InsufficientStudents { .. }
            | AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::FileProcessing { .. }
            | AppError::ImageProcessing { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let status = self.status();
        let code = self.code();
        let timestamp = Utc::now();

        let (message, details) = match self {
            AppError::Validation(details) => {
                tracing::warn!(?details, "Validation failed");
                ("Validation Failed".to_string(), details)
            }
            AppError::FileProcessing { operation, detail } => {
                tracing::error!("File processing failed during {operation}: {detail}");
                (
                    format!("Failed to process file during {operation} operation"),
                    vec![code.to_string()],
                )
            }
            AppError::ImageProcessing { operation, detail } => {
                tracing::error!("Image processing failed during {operation}: {detail}");
                (
                    format!("Failed to process image during {operation}"),
                    vec![code.to_string()],
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    "Internal Server Error".to_string(),
                    vec!["An unexpected error occurred".to_string()],
                )
            }
            other => {
                tracing::warn!("{other}");
                (other.to_string(), vec![code.to_string()])
            }
        };

        (
            status,
            ErrorBody {
                code,
                message,
                timestamp,
                details,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::MalformedRequest(msg) = self {
            tracing::warn!("Malformed request: {msg}");
            return (StatusCode::BAD_REQUEST, msg).into_response();
        }

        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::file_processing("file access", err)
    }
}

impl From<PreviewError> for AppError {
    fn from(err: PreviewError) -> Self {
        AppError::image_processing("preview generation", err)
    }
}
