//! Subscription CRUD and aggregate queries on top of the storage layer.

use std::sync::Arc;

use chrono::Utc;
use shared::{CategoryStat, CreateSubscriptionRequest, Subscription, UpdateSubscriptionRequest};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::aggregation;
use crate::domain::models::subscription::{
    validate_amount, validate_billing_date, validate_category, validate_name,
    SubscriptionValidationError, DEFAULT_COLOR, DEFAULT_ICON,
};
use crate::storage::SubscriptionStore;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Subscription not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] SubscriptionValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Service for managing subscriptions.
///
/// Validation happens here, before anything reaches the store; the store
/// only ever sees well-formed records.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn get_subscription(&self, id: &str) -> Result<Subscription, SubscriptionError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound)
    }

    /// Subscriptions billed on the given day of the month, any cycle.
    pub async fn subscriptions_on_day(
        &self,
        day: u32,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self.store.get_by_day(day).await?)
    }

    pub async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, SubscriptionError> {
        validate_name(&request.name)?;
        validate_amount(request.amount)?;
        validate_billing_date(request.billing_date)?;
        validate_category(&request.category)?;

        let now = Utc::now().to_rfc3339();
        let subscription = Subscription {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            amount: request.amount,
            cycle: request.cycle,
            billing_date: request.billing_date,
            category: request.category,
            icon: request
                .icon
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            color: request
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            created_at: now.clone(),
            updated_at: now,
        };

        self.store.insert(&subscription).await?;
        Ok(subscription)
    }

    /// Applies only the fields present in the request; absent fields keep
    /// their stored values. Present fields are validated like on create.
    pub async fn update_subscription(
        &self,
        id: &str,
        request: UpdateSubscriptionRequest,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound)?;

        if let Some(name) = request.name {
            validate_name(&name)?;
            subscription.name = name;
        }
        if let Some(amount) = request.amount {
            validate_amount(amount)?;
            subscription.amount = amount;
        }
        if let Some(cycle) = request.cycle {
            subscription.cycle = cycle;
        }
        if let Some(billing_date) = request.billing_date {
            validate_billing_date(billing_date)?;
            subscription.billing_date = billing_date;
        }
        if let Some(category) = request.category {
            validate_category(&category)?;
            subscription.category = category;
        }
        if let Some(icon) = request.icon {
            subscription.icon = icon;
        }
        if let Some(color) = request.color {
            subscription.color = color;
        }
        subscription.updated_at = Utc::now().to_rfc3339();

        self.store.update(&subscription).await?;
        Ok(subscription)
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<(), SubscriptionError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(SubscriptionError::NotFound)
        }
    }

    /// Combined monthly cost with yearly amounts spread over twelve months.
    pub async fn monthly_total(&self) -> Result<f64, SubscriptionError> {
        let subscriptions = self.store.get_all().await?;
        Ok(aggregation::monthly_total(&subscriptions))
    }

    /// Per-category spending, optionally narrowed by a text query first.
    pub async fn category_stats(
        &self,
        query: &str,
    ) -> Result<Vec<CategoryStat>, SubscriptionError> {
        let subscriptions = self.store.get_all().await?;
        let filtered = aggregation::filter_by_text(&subscriptions, query);
        Ok(aggregation::category_breakdown(&filtered))
    }
}
