use axum::{
    extract::multipart::MultipartError,
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = AppError> = core::result::Result<T, E>;

pub const BASIC_REALM: &str = r#"Basic realm="Admin""#;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidResume(String),

    #[error("resume exceeds the {0} byte upload limit")]
    PayloadTooLarge(usize),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("authentication required")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("admin credentials not configured")]
    AdminNotConfigured,

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("improperly configured: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "ERR-APP-001",
            AppError::Validation(_) => "ERR-APP-002",
            AppError::InvalidResume(_) => "ERR-APP-003",
            AppError::PayloadTooLarge(_) => "ERR-APP-004",
            AppError::Multipart(_) => "ERR-APP-005",
            AppError::NotFound(_) => "ERR-APP-404",
            AppError::Unauthorized => "ERR-AUTH-001",
            AppError::Forbidden => "ERR-AUTH-002",
            AppError::AdminNotConfigured => "ERR-AUTH-003",
            AppError::Database(_) | AppError::Migration(_) => "ERR-DB-000",
            AppError::Storage(_) => "ERR-S3-001",
            AppError::Io(_) => "ERR-IO-000",
            AppError::Template(_) => "ERR-UI-000",
            AppError::Config(_) => "ERR-CONF-000",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::Validation(_) | AppError::InvalidResume(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Multipart(e) => e.status(),
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::AdminNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", &self);
        }
        let body = Json(json!({
            "ok": false,
            "code": self.code(),
            "error": self.to_string(),
        }));
        let mut res = (status, body).into_response();
        if matches!(self, AppError::Unauthorized | AppError::Forbidden) {
            res.headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_REALM));
        }
        res
    }
}
