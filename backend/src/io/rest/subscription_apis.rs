//! # REST API for Subscriptions
//!
//! CRUD endpoints plus the aggregate stats endpoints built on top of the
//! subscription service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::SubscriptionError;
use crate::AppState;
use shared::{ApiResponse, CreateSubscriptionRequest, MonthlyTotalResponse, UpdateSubscriptionRequest};

// Query parameters for the category stats API
#[derive(Debug, Deserialize)]
pub struct CategoryStatsQuery {
    pub query: Option<String>,
}

/// List all subscriptions ordered by billing day
pub async fn list_subscriptions(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/subscriptions");

    match state.subscription_service.list_subscriptions().await {
        Ok(subscriptions) => (StatusCode::OK, Json(ApiResponse::ok(subscriptions))).into_response(),
        Err(e) => {
            error!("Failed to list subscriptions: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to fetch subscriptions")),
            )
                .into_response()
        }
    }
}

/// Get a single subscription by ID
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/subscriptions/{}", id);

    match state.subscription_service.get_subscription(&id).await {
        Ok(subscription) => (StatusCode::OK, Json(ApiResponse::ok(subscription))).into_response(),
        Err(SubscriptionError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Subscription not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch subscription: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to fetch subscription")),
            )
                .into_response()
        }
    }
}

/// List subscriptions billed on a given day of the month
pub async fn get_subscriptions_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/subscriptions/date/{}", date);

    let day = match date.parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => day,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid date. Must be between 1-31")),
            )
                .into_response()
        }
    };

    match state.subscription_service.subscriptions_on_day(day).await {
        Ok(subscriptions) => (StatusCode::OK, Json(ApiResponse::ok(subscriptions))).into_response(),
        Err(e) => {
            error!("Failed to fetch subscriptions for day {}: {}", day, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to fetch subscriptions")),
            )
                .into_response()
        }
    }
}

/// Create a new subscription
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(request): Json<CreateSubscriptionRequest>,
) -> impl IntoResponse {
    info!("POST /api/subscriptions - request: {:?}", request);

    match state.subscription_service.create_subscription(request).await {
        Ok(subscription) => {
            (StatusCode::CREATED, Json(ApiResponse::ok(subscription))).into_response()
        }
        Err(SubscriptionError::Validation(e)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create subscription: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to create subscription")),
            )
                .into_response()
        }
    }
}

/// Update fields of an existing subscription
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/subscriptions/{} - request: {:?}", id, request);

    match state
        .subscription_service
        .update_subscription(&id, request)
        .await
    {
        Ok(subscription) => (StatusCode::OK, Json(ApiResponse::ok(subscription))).into_response(),
        Err(SubscriptionError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Subscription not found")),
        )
            .into_response(),
        Err(SubscriptionError::Validation(e)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update subscription: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to update subscription")),
            )
                .into_response()
        }
    }
}

/// Delete a subscription
pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/subscriptions/{}", id);

    match state.subscription_service.delete_subscription(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::message("Subscription deleted successfully")),
        )
            .into_response(),
        Err(SubscriptionError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Subscription not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete subscription: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to delete subscription")),
            )
                .into_response()
        }
    }
}

/// Get the combined monthly cost of all subscriptions
pub async fn get_monthly_total(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/stats/monthly-total");

    match state.subscription_service.monthly_total().await {
        Ok(total) => (
            StatusCode::OK,
            Json(ApiResponse::ok(MonthlyTotalResponse { total })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to calculate monthly total: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to calculate total")),
            )
                .into_response()
        }
    }
}

/// Get per-category spending, optionally narrowed by a text query
pub async fn get_category_stats(
    State(state): State<AppState>,
    Query(query): Query<CategoryStatsQuery>,
) -> impl IntoResponse {
    info!("GET /api/stats/categories - query: {:?}", query);

    let text = query.query.unwrap_or_default();
    match state.subscription_service.category_stats(&text).await {
        Ok(stats) => (StatusCode::OK, Json(ApiResponse::ok(stats))).into_response(),
        Err(e) => {
            error!("Failed to build category stats: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to fetch category stats")),
            )
                .into_response()
        }
    }
}
