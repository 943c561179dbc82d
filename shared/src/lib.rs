use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing cadence of a subscription.
///
/// Serialized as `"MONTHLY"` / `"YEARLY"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "MONTHLY",
            BillingCycle::Yearly => "YEARLY",
        }
    }
}

impl Default for BillingCycle {
    fn default() -> Self {
        BillingCycle::Monthly
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring payment tracked by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Opaque unique id, assigned at creation, never changes
    pub id: String,
    /// Non-empty display name
    pub name: String,
    /// Positive amount, currency-agnostic (no symbol stored)
    pub amount: f64,
    pub cycle: BillingCycle,
    /// Day of month (1-31) the charge recurs; no month/year component
    pub billing_date: u32,
    /// Free-text label used for grouping and icon/color defaults
    pub category: String,
    /// Presentation hint (Font Awesome class)
    pub icon: String,
    /// Presentation hint (hex color)
    pub color: String,
    /// RFC 3339 timestamp set by the store on create
    pub created_at: String,
    /// RFC 3339 timestamp refreshed by the store on every write
    pub updated_at: String,
}

/// Request body for creating a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
    pub billing_date: u32,
    pub category: String,
    /// Defaults to "fa-solid fa-cube" when absent
    pub icon: Option<String>,
    /// Defaults to "#ff7f50" when absent
    pub color: Option<String>,
}

/// Partial update - only supplied fields change, `updated_at` refreshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub cycle: Option<BillingCycle>,
    pub billing_date: Option<u32>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// A validated subscription draft, ready for the store.
///
/// Carries no id or timestamps - those are assigned on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
    pub billing_date: u32,
    pub category: String,
    pub icon: String,
    pub color: String,
}

/// A single cell of the 6-week calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    /// False for leading/trailing cells that belong to adjacent months
    pub is_current_month: bool,
    /// Subscriptions whose billing_date equals this cell's day number
    pub subscriptions: Vec<Subscription>,
}

/// A calendar month as a fixed 42-cell grid (6 weeks, Monday-first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    /// Weekday of the 1st, Monday = 0
    pub first_weekday: u32,
    /// Always exactly 42 cells in row-major chronological order
    pub days: Vec<CalendarCell>,
}

/// Per-category spending rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    pub count: u32,
    /// Sum of monthly-equivalent amounts for the category
    pub total_monthly: f64,
}

/// AI-generated (or fallback) spending analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub summary: String,
    pub savings_opportunities: Vec<String>,
    /// Yearly projection, always monthly total * 12
    pub total_projected: f64,
}

/// Response payload for the monthly total endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotalResponse {
    pub total: f64,
}

/// Request body for the smart-add parse endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartAddRequest {
    pub input: String,
}

/// Health check payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Uniform response envelope used by every API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response carrying only a message (e.g. after delete).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// Failed response carrying a human-readable error.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_cycle_wire_format() {
        assert_eq!(
            serde_json::to_string(&BillingCycle::Monthly).unwrap(),
            "\"MONTHLY\""
        );
        assert_eq!(
            serde_json::to_string(&BillingCycle::Yearly).unwrap(),
            "\"YEARLY\""
        );

        let parsed: BillingCycle = serde_json::from_str("\"YEARLY\"").unwrap();
        assert_eq!(parsed, BillingCycle::Yearly);
    }

    #[test]
    fn test_insight_report_uses_camel_case_keys() {
        let report = InsightReport {
            summary: "ok".to_string(),
            savings_opportunities: vec!["tip".to_string()],
            total_projected: 120.0,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("savingsOpportunities"));
        assert!(json.contains("totalProjected"));
    }

    #[test]
    fn test_api_response_skips_absent_fields() {
        let ok = ApiResponse::ok(1);
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, "{\"success\":true,\"data\":1}");

        let err = ApiResponse::<()>::error("nope");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "{\"success\":false,\"error\":\"nope\"}");

        let msg = ApiResponse::<()>::message("done");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, "{\"success\":true,\"message\":\"done\"}");
    }

    #[test]
    fn test_update_request_defaults_to_no_changes() {
        let update = UpdateSubscriptionRequest::default();
        assert!(update.name.is_none());
        assert!(update.amount.is_none());
        assert!(update.cycle.is_none());
    }
}
