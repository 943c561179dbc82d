//! In-memory subscription store.
//!
//! Used when no database is configured. Data lives for the lifetime of the
//! process; `with_sample_data` seeds a realistic set so the app is usable
//! immediately in development.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shared::{BillingCycle, Subscription};
use tokio::sync::RwLock;

use crate::storage::traits::SubscriptionStore;

pub struct MemoryStore {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with sample subscriptions
    pub fn with_sample_data() -> Self {
        Self {
            subscriptions: RwLock::new(sample_subscriptions()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Subscription>> {
        let mut subscriptions = self.subscriptions.read().await.clone();
        // Stable sort keeps insertion order within the same billing day
        subscriptions.sort_by_key(|s| s.billing_date);
        Ok(subscriptions)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.iter().find(|s| s.id == id).cloned())
    }

    async fn get_by_day(&self, day: u32) -> Result<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions
            .iter()
            .filter(|s| s.billing_date == day)
            .cloned()
            .collect())
    }

    async fn insert(&self, subscription: &Subscription) -> Result<()> {
        let mut subscriptions = self.subscriptions.write().await;
        subscriptions.push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<()> {
        let mut subscriptions = self.subscriptions.write().await;
        if let Some(slot) = subscriptions.iter_mut().find(|s| s.id == subscription.id) {
            *slot = subscription.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        Ok(subscriptions.len() < before)
    }
}

fn sample_subscriptions() -> Vec<Subscription> {
    let seed = |id: &str,
                name: &str,
                amount: f64,
                cycle: BillingCycle,
                billing_date: u32,
                category: &str,
                icon: &str,
                color: &str| {
        let now = Utc::now().to_rfc3339();
        Subscription {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            cycle,
            billing_date,
            category: category.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    };

    vec![
        seed(
            "1",
            "Netflix",
            15.99,
            BillingCycle::Monthly,
            2,
            "Entertainment",
            "fa-brands fa-netflix",
            "#E50914",
        ),
        seed(
            "2",
            "Spotify",
            9.99,
            BillingCycle::Monthly,
            4,
            "Music",
            "fa-solid fa-music",
            "#1DB954",
        ),
        seed(
            "3",
            "Adobe CC",
            52.99,
            BillingCycle::Monthly,
            7,
            "Design",
            "fa-brands fa-adobe",
            "#FF0000",
        ),
        seed(
            "4",
            "iCloud+",
            0.99,
            BillingCycle::Monthly,
            12,
            "Storage",
            "fa-brands fa-apple",
            "#FFFFFF",
        ),
        seed(
            "5",
            "Dropbox",
            120.0,
            BillingCycle::Yearly,
            10,
            "Storage",
            "fa-brands fa-dropbox",
            "#0061FF",
        ),
        seed(
            "6",
            "YouTube Premium",
            11.99,
            BillingCycle::Monthly,
            15,
            "Entertainment",
            "fa-brands fa-youtube",
            "#FF0000",
        ),
        seed(
            "7",
            "ChatGPT Plus",
            20.0,
            BillingCycle::Monthly,
            20,
            "AI Tools",
            "fa-solid fa-robot",
            "#10A37F",
        ),
    ]
}
