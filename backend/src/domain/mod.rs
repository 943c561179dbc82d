pub mod aggregation;
pub mod calendar;
pub mod insight_service;
pub mod models;
pub mod normalizer;
pub mod subscription_service;

pub use calendar::CalendarService;
pub use insight_service::{InsightService, SmartAddError};
pub use subscription_service::{SubscriptionError, SubscriptionService};
