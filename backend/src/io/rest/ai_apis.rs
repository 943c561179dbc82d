//! # REST API for AI Features
//!
//! Spending insights and natural-language subscription parsing.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{ApiResponse, SmartAddRequest};

/// Get an AI-generated (or fallback) spending report
pub async fn get_insights(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/ai/insights");

    match state.insight_service.generate_insights().await {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::ok(report))).into_response(),
        Err(e) => {
            error!("Failed to generate insights: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to generate insights")),
            )
                .into_response()
        }
    }
}

/// Parse free-form text like "netflix 15.99 monthly on the 2nd" into a draft
pub async fn parse_smart_add(
    State(state): State<AppState>,
    Json(request): Json<SmartAddRequest>,
) -> impl IntoResponse {
    info!("POST /api/ai/parse-smart-add - request: {:?}", request);

    if request.input.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid input")),
        )
            .into_response();
    }

    match state.insight_service.parse_smart_add(&request.input).await {
        Ok(draft) => (StatusCode::OK, Json(ApiResponse::ok(draft))).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}
