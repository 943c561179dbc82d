//! Gemini-backed [`AiProvider`] implementation.
//!
//! Talks to the generateContent REST endpoint with plain JSON requests.
//! Replies are expected to be JSON but routinely arrive wrapped in
//! markdown code fences, so both forms are accepted.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shared::Subscription;
use std::time::Duration;
use tracing::debug;

use crate::ai::{AiProvider, InsightParts};
use crate::domain::aggregation;
use crate::domain::normalizer::RawDraft;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Tips used when the model answers but its reply carries no usable list.
const DEFAULT_TIPS: [&str; 3] = [
    "Review unused subscriptions",
    "Consider annual plans for discounts",
    "Bundle services when possible",
];

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    /// Send a single-turn prompt and return the first candidate's text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Gemini API returned status {}", response.status()));
        }

        let reply: GenerateContentResponse = response.json().await?;
        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow!("Gemini reply contained no candidates"))
    }
}

#[async_trait]
impl AiProvider for GeminiClient {
    async fn subscription_insights(&self, subscriptions: &[Subscription]) -> Result<InsightParts> {
        let reply = self.generate(&insight_prompt(subscriptions)).await?;
        parse_insight_reply(&reply)
    }

    async fn parse_subscription(&self, input: &str) -> Result<Option<RawDraft>> {
        let reply = self.generate(&smart_add_prompt(input)).await?;
        let cleaned = strip_code_fences(&reply);

        match serde_json::from_str::<RawDraft>(cleaned) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) => {
                debug!("Discarding unparseable smart-add reply: {}", e);
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct InsightReply {
    summary: Option<String>,
    #[serde(rename = "savingsOpportunities")]
    savings_opportunities: Option<Vec<String>>,
}

fn insight_prompt(subscriptions: &[Subscription]) -> String {
    let lines = subscriptions
        .iter()
        .map(|s| {
            format!(
                "- {}: ${}/{} (Category: {})",
                s.name,
                s.amount,
                s.cycle.as_str().to_lowercase(),
                s.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let monthly_total = aggregation::monthly_total(subscriptions);

    format!(
        r#"You are a financial advisor analyzing subscription spending. Provide insights for the following subscriptions:

{}

Monthly Total: ${:.2}

Provide:
1. A brief summary (1-2 sentences) about their subscription spending
2. 3 specific savings opportunities

Format your response as JSON with keys: "summary" (string) and "savingsOpportunities" (array of 3 strings)
Only respond with valid JSON, no markdown formatting."#,
        lines, monthly_total
    )
}

fn smart_add_prompt(input: &str) -> String {
    format!(
        r#"Parse this subscription input: "{}"

Extract and return as JSON:
{{
  "name": "service name",
  "amount": number (price),
  "billingDate": number (day of month, 1-31, or null to use 1),
  "cycle": "MONTHLY" or "YEARLY",
  "category": "category name"
}}

Only return valid JSON, nothing else."#,
        input
    )
}

/// Accepts replies with or without a ```json fence around the payload.
fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

fn parse_insight_reply(reply: &str) -> Result<InsightParts> {
    let cleaned = strip_code_fences(reply);
    let parsed: InsightReply =
        serde_json::from_str(cleaned).context("Gemini insight reply was not valid JSON")?;

    let summary = parsed
        .summary
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Your subscriptions are well managed.".to_string());
    let savings_opportunities = match parsed.savings_opportunities {
        Some(tips) if !tips.is_empty() => tips.into_iter().take(3).collect(),
        _ => DEFAULT_TIPS.iter().map(|t| t.to_string()).collect(),
    };

    Ok(InsightParts {
        summary,
        savings_opportunities,
    })
}
