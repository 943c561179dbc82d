//! # REST API Interface Layer
//!
//! HTTP endpoints for the subscription tracker. This layer handles:
//! - Request/response serialization and deserialization
//! - Input validation before domain layer processing
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Every `/api` endpoint answers with the same JSON envelope: a `success`
//! flag plus one of `data`, `message`, or `error`.

// Module declarations
pub mod ai_apis;
pub mod calendar_apis;
pub mod subscription_apis;

pub use ai_apis::*;
pub use calendar_apis::*;
pub use subscription_apis::*;
