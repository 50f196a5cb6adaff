use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::backend::ai::AiError;
use crate::backend::domain::DomainError;

/// Error returned by the JSON API as `{"error": msg, "code": CODE}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    AiUnavailable(String),
    AiUpstream(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::AiUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::AiUpstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "INVALID_INPUT",
            ApiError::Unauthorized => "UNAUTHENTICATED",
            ApiError::AiUnavailable(_) => "AI_NOT_CONFIGURED",
            ApiError::AiUpstream(_) => "AI_ERROR",
            ApiError::Internal(_) => "STORAGE_ERROR",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::AiUnavailable(msg)
            | ApiError::AiUpstream(msg)
            | ApiError::Internal(msg) => msg.clone(),
            ApiError::Unauthorized => "Login required".to_string(),
        }
    }
}

/// Classify a service failure by its root cause.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(domain) = err.downcast_ref::<DomainError>() {
            return ApiError::BadRequest(domain.to_string());
        }
        if let Some(ai) = err.downcast_ref::<AiError>() {
            return match ai {
                AiError::MissingApiKey => ApiError::AiUnavailable(ai.to_string()),
                _ => ApiError::AiUpstream(ai.to_string()),
            };
        }
        error!("Internal error: {:#}", err);
        ApiError::Internal("Failed to read or write the data files".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message(),
            "code": self.code(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let cases = [
            (anyhow::Error::from(DomainError::NegativePrice(-1)), StatusCode::BAD_REQUEST),
            (anyhow::Error::from(AiError::MissingApiKey), StatusCode::SERVICE_UNAVAILABLE),
            (anyhow::Error::from(AiError::EmptyResponse), StatusCode::BAD_GATEWAY),
            (
                anyhow::Error::from(AiError::MalformedReceipt("x".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (anyhow::anyhow!("disk full"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let api_error = ApiError::from(anyhow::anyhow!("/home/me/secret/kakeibo.csv: permission denied"));
        assert!(!api_error.message().contains("secret"));
    }
}
