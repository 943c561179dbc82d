//! Spending insights and smart-add parsing.
//!
//! Both features lean on an optional AI provider. Insights degrade to a
//! locally-built report when no provider is configured or the call fails;
//! smart-add has no local fallback and reports the input as unparseable.

use std::sync::Arc;

use shared::{InsightReport, SubscriptionDraft};
use thiserror::Error;
use tracing::warn;

use crate::ai::AiProvider;
use crate::domain::aggregation;
use crate::domain::normalizer::{normalize, NormalizationError};
use crate::storage::SubscriptionStore;

/// Tips served when the provider is missing or unreachable.
const FALLBACK_TIPS: [&str; 3] = [
    "Review subscriptions you rarely use",
    "Look for annual billing discounts",
    "Consider bundled service packages",
];

#[derive(Debug, Error)]
pub enum SmartAddError {
    #[error("Could not parse input. Try a different format.")]
    Unparseable,
    #[error(transparent)]
    Invalid(#[from] NormalizationError),
}

#[derive(Clone)]
pub struct InsightService {
    store: Arc<dyn SubscriptionStore>,
    provider: Option<Arc<dyn AiProvider>>,
}

impl InsightService {
    pub fn new(store: Arc<dyn SubscriptionStore>, provider: Option<Arc<dyn AiProvider>>) -> Self {
        Self { store, provider }
    }

    /// Builds a spending report over the full store.
    ///
    /// The projected yearly total is always computed locally; only the
    /// summary and tips come from the provider.
    pub async fn generate_insights(&self) -> anyhow::Result<InsightReport> {
        let subscriptions = self.store.get_all().await?;
        if subscriptions.is_empty() {
            return Ok(InsightReport {
                summary: "Add subscriptions to get insights.".to_string(),
                savings_opportunities: vec![],
                total_projected: 0.0,
            });
        }

        let monthly_total = aggregation::monthly_total(&subscriptions);

        if let Some(provider) = &self.provider {
            match provider.subscription_insights(&subscriptions).await {
                Ok(parts) => {
                    return Ok(InsightReport {
                        summary: parts.summary,
                        savings_opportunities: parts.savings_opportunities,
                        total_projected: monthly_total * 12.0,
                    });
                }
                Err(e) => {
                    warn!("Insight provider failed, using fallback report: {}", e);
                }
            }
        }

        Ok(fallback_report(monthly_total))
    }

    /// Parses free-form text like "Netflix 15.99 monthly on the 2nd" into
    /// a subscription draft via the provider.
    pub async fn parse_smart_add(&self, input: &str) -> Result<SubscriptionDraft, SmartAddError> {
        let provider = self.provider.as_ref().ok_or(SmartAddError::Unparseable)?;

        match provider.parse_subscription(input).await {
            Ok(Some(raw)) => Ok(normalize(raw)?),
            Ok(None) => Err(SmartAddError::Unparseable),
            Err(e) => {
                warn!("Smart-add provider failed: {}", e);
                Err(SmartAddError::Unparseable)
            }
        }
    }
}

fn fallback_report(monthly_total: f64) -> InsightReport {
    InsightReport {
        summary: format!(
            "Your subscriptions are under active review. Total: ${:.2}/month",
            monthly_total
        ),
        savings_opportunities: FALLBACK_TIPS.iter().map(|t| t.to_string()).collect(),
        total_projected: monthly_total * 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::InsightParts;
    use crate::domain::normalizer::RawDraft;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use shared::{BillingCycle, Subscription};

    enum ParseScript {
        Draft(RawDraft),
        NoResult,
        Fail,
    }

    struct ScriptedProvider {
        insights: Option<InsightParts>,
        parse: ParseScript,
    }

    impl ScriptedProvider {
        fn insights_only(parts: InsightParts) -> Self {
            Self {
                insights: Some(parts),
                parse: ParseScript::Fail,
            }
        }

        fn parse_only(parse: ParseScript) -> Self {
            Self {
                insights: None,
                parse,
            }
        }
    }

    #[async_trait]
    impl AiProvider for ScriptedProvider {
        async fn subscription_insights(
            &self,
            _subscriptions: &[Subscription],
        ) -> anyhow::Result<InsightParts> {
            match &self.insights {
                Some(parts) => Ok(parts.clone()),
                None => Err(anyhow::anyhow!("provider unavailable")),
            }
        }

        async fn parse_subscription(&self, _input: &str) -> anyhow::Result<Option<RawDraft>> {
            match &self.parse {
                ParseScript::Draft(raw) => Ok(Some(raw.clone())),
                ParseScript::NoResult => Ok(None),
                ParseScript::Fail => Err(anyhow::anyhow!("provider unavailable")),
            }
        }
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        let now = chrono::Utc::now().to_rfc3339();
        store
            .insert(&Subscription {
                id: "1".to_string(),
                name: "Netflix".to_string(),
                amount: 15.99,
                cycle: BillingCycle::Monthly,
                billing_date: 2,
                category: "Entertainment".to_string(),
                icon: "fa-brands fa-netflix".to_string(),
                color: "#E50914".to_string(),
                created_at: now.clone(),
                updated_at: now.clone(),
            })
            .await
            .unwrap();
        store
            .insert(&Subscription {
                id: "2".to_string(),
                name: "Dropbox".to_string(),
                amount: 120.0,
                cycle: BillingCycle::Yearly,
                billing_date: 10,
                category: "Storage".to_string(),
                icon: "fa-brands fa-dropbox".to_string(),
                color: "#0061FF".to_string(),
                created_at: now.clone(),
                updated_at: now,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_insights_for_empty_store() {
        let service = InsightService::new(Arc::new(MemoryStore::new()), None);

        let report = service.generate_insights().await.unwrap();
        assert_eq!(report.summary, "Add subscriptions to get insights.");
        assert!(report.savings_opportunities.is_empty());
        assert_eq!(report.total_projected, 0.0);
    }

    #[tokio::test]
    async fn test_insights_from_provider() {
        let provider = ScriptedProvider::insights_only(InsightParts {
            summary: "Heavy on streaming.".to_string(),
            savings_opportunities: vec!["Drop one streaming service".to_string()],
        });
        let service = InsightService::new(seeded_store().await, Some(Arc::new(provider)));

        let report = service.generate_insights().await.unwrap();
        assert_eq!(report.summary, "Heavy on streaming.");
        assert_eq!(
            report.savings_opportunities,
            vec!["Drop one streaming service".to_string()]
        );
        // 15.99 + 120/12 = 25.99 per month, projected over a year
        assert!((report.total_projected - 311.88).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_insights_fall_back_when_provider_fails() {
        let provider = ScriptedProvider::parse_only(ParseScript::Fail);
        let service = InsightService::new(seeded_store().await, Some(Arc::new(provider)));

        let report = service.generate_insights().await.unwrap();
        assert_eq!(
            report.summary,
            "Your subscriptions are under active review. Total: $25.99/month"
        );
        assert_eq!(report.savings_opportunities.len(), 3);
        assert!((report.total_projected - 311.88).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_insights_fall_back_without_provider() {
        let service = InsightService::new(seeded_store().await, None);

        let report = service.generate_insights().await.unwrap();
        assert!(report.summary.starts_with("Your subscriptions are under active review"));
        assert_eq!(report.savings_opportunities.len(), 3);
    }

    #[tokio::test]
    async fn test_smart_add_without_provider_is_unparseable() {
        let service = InsightService::new(Arc::new(MemoryStore::new()), None);

        let result = service.parse_smart_add("Netflix 15.99 monthly").await;
        assert!(matches!(result, Err(SmartAddError::Unparseable)));
    }

    #[tokio::test]
    async fn test_smart_add_normalizes_provider_draft() {
        let raw: RawDraft = serde_json::from_value(serde_json::json!({
            "name": "Netflix",
            "amount": 15.99,
            "billingDate": null,
            "cycle": "MONTHLY",
            "category": "Entertainment"
        }))
        .unwrap();
        let provider = ScriptedProvider::parse_only(ParseScript::Draft(raw));
        let service = InsightService::new(Arc::new(MemoryStore::new()), Some(Arc::new(provider)));

        let draft = service.parse_smart_add("netflix 15.99 a month").await.unwrap();
        assert_eq!(draft.name, "Netflix");
        assert_eq!(draft.billing_date, 1);
        assert_eq!(draft.cycle, BillingCycle::Monthly);
        assert_eq!(draft.icon, "fa-solid fa-film");
    }

    #[tokio::test]
    async fn test_smart_add_provider_miss_is_unparseable() {
        let provider = ScriptedProvider::parse_only(ParseScript::NoResult);
        let service = InsightService::new(Arc::new(MemoryStore::new()), Some(Arc::new(provider)));

        let result = service.parse_smart_add("gibberish").await;
        assert!(matches!(result, Err(SmartAddError::Unparseable)));
    }

    #[tokio::test]
    async fn test_smart_add_provider_failure_is_unparseable() {
        let provider = ScriptedProvider::parse_only(ParseScript::Fail);
        let service = InsightService::new(Arc::new(MemoryStore::new()), Some(Arc::new(provider)));

        let result = service.parse_smart_add("Netflix 15.99").await;
        assert!(matches!(result, Err(SmartAddError::Unparseable)));
    }

    #[tokio::test]
    async fn test_smart_add_surfaces_normalization_errors() {
        let raw: RawDraft = serde_json::from_value(serde_json::json!({
            "name": "Netflix",
            "amount": "free"
        }))
        .unwrap();
        let provider = ScriptedProvider::parse_only(ParseScript::Draft(raw));
        let service = InsightService::new(Arc::new(MemoryStore::new()), Some(Arc::new(provider)));

        let result = service.parse_smart_add("netflix for free").await;
        match result {
            Err(SmartAddError::Invalid(e)) => {
                assert_eq!(e.to_string(), "Amount must be a positive number");
            }
            other => panic!("expected invalid amount, got {:?}", other.map(|d| d.name)),
        }
    }
}
