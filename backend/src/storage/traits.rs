//! # Storage Traits
//!
//! Defines the storage abstraction that lets different backends (SQLite,
//! in-memory) be used interchangeably by the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::Subscription;

/// Trait defining the interface for subscription storage operations
///
/// Implementations are free to choose their own persistence; validation is
/// the domain layer's job and records arriving here are assumed well-formed.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// List all subscriptions ordered by billing day ascending
    async fn get_all(&self) -> Result<Vec<Subscription>>;

    /// Retrieve a specific subscription by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Subscription>>;

    /// List subscriptions billed on a specific day of the month
    async fn get_by_day(&self, day: u32) -> Result<Vec<Subscription>>;

    /// Store a new subscription
    async fn insert(&self, subscription: &Subscription) -> Result<()>;

    /// Replace an existing subscription, matched by ID
    async fn update(&self, subscription: &Subscription) -> Result<()>;

    /// Delete a subscription by ID
    /// Returns true if the subscription was found and deleted, false otherwise
    async fn delete(&self, id: &str) -> Result<bool>;
}
