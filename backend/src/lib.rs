//! # Subscription Tracker Backend
//!
//! Contains all non-UI logic for the subscription tracker.
//!
//! The crate is organized as a layered architecture:
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     |
//! Domain Layer (services, aggregation, calendar, normalization)
//!     |
//! Storage Layer (SQLite or in-memory)
//! ```
//!
//! An optional AI layer sits beside the domain services and is consulted
//! for insights and smart-add parsing when a Gemini API key is configured.
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state from the environment
//! - Set up the REST API router with CORS for the web frontend
//! - Coordinate between domain logic and data persistence

pub mod ai;
pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::ai::{AiProvider, GeminiClient};
use crate::config::Config;
use crate::domain::{CalendarService, InsightService, SubscriptionService};
use crate::storage::{MemoryStore, SqliteStore, SubscriptionStore};
use shared::{ApiResponse, HealthResponse};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: SubscriptionService,
    pub calendar_service: CalendarService,
    pub insight_service: InsightService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    let store: Arc<dyn SubscriptionStore> = match &config.database_url {
        Some(url) => {
            info!("Setting up SQLite storage at {}", url);
            Arc::new(SqliteStore::init(url).await?)
        }
        None => {
            info!("No DATABASE_URL set, using in-memory storage with sample data");
            Arc::new(MemoryStore::with_sample_data())
        }
    };

    let provider: Option<Arc<dyn AiProvider>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Gemini provider configured with model {}", config.gemini_model);
            let client = GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                Duration::from_secs(config.ai_timeout_secs),
            )?;
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set, AI features run in fallback mode");
            None
        }
    };

    info!("Setting up domain services");
    let subscription_service = SubscriptionService::new(store.clone());
    let calendar_service = CalendarService::new();
    let insight_service = InsightService::new(store, provider);

    Ok(AppState {
        subscription_service,
        calendar_service,
        insight_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, frontend_url: &str) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
        Err(_) => {
            warn!(
                "FRONTEND_URL {:?} is not a valid origin, allowing any origin",
                frontend_url
            );
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any)
        }
    };

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/subscriptions",
            get(io::list_subscriptions).post(io::create_subscription),
        )
        .route("/subscriptions/date/:date", get(io::get_subscriptions_by_date))
        .route(
            "/subscriptions/:id",
            get(io::get_subscription)
                .put(io::update_subscription)
                .delete(io::delete_subscription),
        )
        .route("/stats/monthly-total", get(io::get_monthly_total))
        .route("/stats/categories", get(io::get_category_stats))
        .route("/calendar/month", get(io::get_calendar_month))
        .route("/ai/insights", get(io::get_insights))
        .route("/ai/parse-smart-add", post(io::parse_smart_add));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(cors)
        .with_state(app_state)
}

/// Liveness probe; the only endpoint not wrapped in the API envelope
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Uniform 404 for unknown routes, inside and outside `/api`
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Route not found")),
    )
}
