use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid entry for {date}: {reason}")]
    InvalidEntry { date: String, reason: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("unsupported document version {0}")]
    UnsupportedVersion(u64),

    #[error("date out of range: year {year}, month index {month_index}")]
    DateOutOfRange { year: i32, month_index: i64 },

    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl LedgerError {
    pub(crate) fn invalid_entry(date: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            date: date.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Storage(_) | LedgerError::Encode(_) => Self::internal(err),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_failures_are_internal_errors_not_storage_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LedgerError::from(json_err);
        assert!(matches!(err, LedgerError::Encode(_)));
        assert!(err.to_string().starts_with("failed to encode ledger"));

        let app = AppError::from(err);
        assert_eq!(app.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let app = AppError::from(LedgerError::InvalidDate("2024-2-1".to_string()));
        assert_eq!(app.status, StatusCode::BAD_REQUEST);
        assert!(app.message.contains("2024-2-1"));
    }
}
