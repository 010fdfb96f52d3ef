use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AssessError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Bodies that fail to deserialize are input errors like any range violation
impl From<JsonRejection> for AssessError {
    fn from(rejection: JsonRejection) -> Self {
        AssessError::InvalidInput {
            field: "body",
            reason: rejection.body_text(),
        }
    }
}

impl IntoResponse for AssessError {
    fn into_response(self) -> Response {
        let (status, error) = if self.is_client_error() {
            (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An unexpected error occurred: {self}"),
            )
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
