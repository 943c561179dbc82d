//! # REST API for the Calendar
//!
//! Serves the 6-week billing calendar grid for a requested month.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;
use shared::ApiResponse;

// Query parameters for calendar month API
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: u32,
    pub year: u32,
}

/// Get calendar month data with subscriptions placed on their billing days
pub async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/month - query: {:?}", query);

    if !(1..=12).contains(&query.month) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid month. Must be between 1-12")),
        )
            .into_response();
    }

    let subscriptions = match state.subscription_service.list_subscriptions().await {
        Ok(subscriptions) => subscriptions,
        Err(e) => {
            error!("Failed to fetch subscriptions for calendar: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to generate calendar")),
            )
                .into_response();
        }
    };

    let calendar_month =
        state
            .calendar_service
            .generate_calendar_month(query.month, query.year, &subscriptions);
    (StatusCode::OK, Json(ApiResponse::ok(calendar_month))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarService, InsightService, SubscriptionService};
    use crate::storage::{MemoryStore, SubscriptionStore};
    use crate::AppState;
    use shared::CalendarMonth;
    use std::sync::Arc;

    fn setup_seeded_state() -> AppState {
        let store: Arc<dyn SubscriptionStore> = Arc::new(MemoryStore::with_sample_data());
        AppState {
            subscription_service: SubscriptionService::new(store.clone()),
            calendar_service: CalendarService::new(),
            insight_service: InsightService::new(store, None),
        }
    }

    async fn body_of(response: axum::response::Response) -> ApiResponse<CalendarMonth> {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_calendar_month_handler() {
        let state = setup_seeded_state();

        let response = get_calendar_month(
            State(state),
            Query(CalendarMonthQuery {
                month: 6,
                year: 2025,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_of(response).await;
        let calendar = body.data.unwrap();
        assert_eq!(calendar.month, 6);
        assert_eq!(calendar.year, 2025);
        assert_eq!(calendar.days.len(), 42);

        // Netflix bills on the 2nd and must land on the June 2 cell
        let june_second = calendar
            .days
            .iter()
            .find(|c| c.is_current_month && c.day == 2)
            .unwrap();
        assert!(june_second.subscriptions.iter().any(|s| s.name == "Netflix"));
    }

    #[tokio::test]
    async fn test_get_calendar_month_includes_adjacent_days() {
        let state = setup_seeded_state();

        let response = get_calendar_month(
            State(state),
            Query(CalendarMonthQuery {
                month: 6,
                year: 2025,
            }),
        )
        .await
        .into_response();

        let body = body_of(response).await;
        let calendar = body.data.unwrap();
        // June 1st 2025 is a Sunday, so the grid starts in late May
        assert_eq!(calendar.first_weekday, 6);
        assert!(!calendar.days[0].is_current_month);
        assert_eq!(calendar.days[0].day, 26);
    }

    #[tokio::test]
    async fn test_get_calendar_month_rejects_bad_month() {
        for month in [0, 13] {
            let state = setup_seeded_state();
            let response = get_calendar_month(
                State(state),
                Query(CalendarMonthQuery { month, year: 2025 }),
            )
            .await
            .into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
