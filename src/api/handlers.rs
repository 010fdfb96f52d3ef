use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::api::models::ChatRequest;
use crate::api::routes::AppState;
use crate::assessment::{AssessmentInput, AssessmentResult};
use crate::error::AssessError;
use crate::knowledge::ChatAnswer;

// ========== ASSESSMENT ==========

pub async fn assess(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentInput>, JsonRejection>,
) -> Result<Json<AssessmentResult>, AssessError> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::warn!("malformed assessment body: {}", rejection.body_text());
        AssessError::from(rejection)
    })?;
    match state.assessor.assess(&input) {
        Ok(result) => Ok(Json(result)),
        Err(e) if e.is_client_error() => {
            tracing::warn!("rejected assessment input: {}", e);
            Err(e)
        }
        Err(e) => {
            tracing::error!("assessment failed: {}", e);
            Err(e)
        }
    }
}

// ========== CHAT ==========

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatAnswer>, AssessError> {
    let Json(payload) = payload?;
    let answer = state.assessor.chat(&payload.query);
    tracing::debug!(query = %payload.query, source = %answer.source, "chat answered");
    Ok(Json(answer))
}

// ========== MISC ==========

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the RTRWH Assessment API. POST /assess for a site assessment or /chat for questions."
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
