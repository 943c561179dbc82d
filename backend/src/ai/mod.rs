//! AI provider abstraction.
//!
//! The domain layer talks to a trait so the Gemini client can be swapped
//! for a scripted double in tests, or absent entirely when no API key is
//! configured.

use anyhow::Result;
use async_trait::async_trait;
use shared::Subscription;

use crate::domain::normalizer::RawDraft;

pub mod gemini;

pub use gemini::GeminiClient;

/// Summary and tips produced by a provider.
///
/// Totals are deliberately absent: money math is never trusted from a
/// model reply and is always computed locally.
#[derive(Debug, Clone)]
pub struct InsightParts {
    pub summary: String,
    pub savings_opportunities: Vec<String>,
}

/// Trait defining the interface for language-model backed features
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Produce a spending summary and savings tips for the given subscriptions
    async fn subscription_insights(&self, subscriptions: &[Subscription]) -> Result<InsightParts>;

    /// Extract a subscription draft from free-form text
    /// Returns Ok(None) when the model answered but the reply holds no usable draft
    async fn parse_subscription(&self, input: &str) -> Result<Option<RawDraft>>;
}
