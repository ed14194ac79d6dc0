use crate::domain::model::LookupKind;
use axum::http::StatusCode;
use thiserror::Error;

/// 單一外部查詢（age / gender / nationality）失敗的原因
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{kind} lookup request failed: {source}")]
    Transport {
        kind: LookupKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{kind} lookup returned HTTP {status}")]
    Status { kind: LookupKind, status: u16 },

    #[error("{kind} lookup response could not be decoded: {message}")]
    Decode { kind: LookupKind, message: String },

    #[error("{kind} lookup returned no data")]
    EmptyResult { kind: LookupKind },

    #[error("lookup task ended without reporting a result")]
    Interrupted,
}

impl LookupError {
    pub fn kind(&self) -> Option<LookupKind> {
        match self {
            LookupError::Transport { kind, .. }
            | LookupError::Status { kind, .. }
            | LookupError::Decode { kind, .. }
            | LookupError::EmptyResult { kind } => Some(*kind),
            LookupError::Interrupted => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Enrichment failed: {0}")]
    Enrichment(#[from] LookupError),

    #[error("Person {id} not found")]
    NotFound { id: u64 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    NotFound,
    Input,
    Configuration,
    System,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Enrichment(_) => ErrorCategory::Upstream,
            AppError::NotFound { .. } => ErrorCategory::NotFound,
            AppError::ValidationError { .. } => ErrorCategory::Input,
            AppError::MissingConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AppError::Storage { .. } | AppError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Input => StatusCode::BAD_REQUEST,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 回傳給 API 使用者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Enrichment(e) => {
                format!("could not create person: enrichment failed ({})", e)
            }
            AppError::NotFound { .. } => "person not found".to_string(),
            AppError::ValidationError { message } => message.clone(),
            AppError::MissingConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                self.to_string()
            }
            // 內部細節只寫進 log
            AppError::Storage { .. } | AppError::IoError(_) => "internal server error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
