//! # IO Module
//!
//! Interface layer between HTTP clients and the domain logic.
//!
//! Translates incoming requests into domain operations and formats domain
//! results for the frontend. Communication protocol concerns (routing,
//! serialization, status codes) live here; business rules never do.

pub mod rest;

pub use rest::*;
