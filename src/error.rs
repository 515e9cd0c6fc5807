/*
 * Responsibility
 * - gate が返す AuthError の定義
 * - IntoResponse 実装 (HTTP status / `{"error": "..."}` body)
 * - VerifyError を 401 / 500 に振り分ける
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::VerifyError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization token is missing")]
    MissingToken,
    /// Signature, parse or time-claim failure; carries the verifier's message.
    #[error("{0}")]
    Rejected(String),
    /// No verified claims on the request (gate not installed in front of the handler).
    #[error("Invalid token")]
    InvalidToken,
    /// The verified claims could not be decoded; carries the JSON error message.
    #[error("{0}")]
    ClaimsDecode(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::Rejected(_) | AuthError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::ClaimsDecode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<VerifyError> for AuthError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::Jwt(e) => AuthError::Rejected(e.to_string()),
            VerifyError::Decode(e) => AuthError::ClaimsDecode(e.to_string()),
        }
    }
}
