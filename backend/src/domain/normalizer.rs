//! Smart-add normalization.
//!
//! Turns loosely-structured input - a model reply or a hand-built form
//! payload - into a validated subscription draft. Missing presentation
//! fields get defaults; a missing name or unusable amount is an error,
//! never a silently-created zero-cost record.

use serde::Deserialize;
use serde_json::Value;
use shared::{BillingCycle, SubscriptionDraft};
use thiserror::Error;

use crate::domain::models::subscription::{DEFAULT_COLOR, DEFAULT_ICON};

/// Loosely-typed draft as it arrives from the model or a form.
///
/// Accepts both `billing_date` and `billingDate` keys (first non-null wins)
/// and tolerates numbers arriving as strings. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDraft {
    pub name: Option<String>,
    pub amount: Option<Value>,
    pub billing_date: Option<Value>,
    #[serde(rename = "billingDate")]
    pub billing_date_alt: Option<Value>,
    pub cycle: Option<String>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("Service name is required")]
    MissingName,
    #[error("Amount must be a positive number")]
    InvalidAmount,
}

/// Normalize a raw draft into a store-ready one.
///
/// Defaulting rules: billing_date 1 when absent/unparseable/out-of-range,
/// cycle YEARLY only for the literal string "YEARLY", category "General"
/// when blank, icon from the category table, color from the fixed palette.
pub fn normalize(raw: RawDraft) -> Result<SubscriptionDraft, NormalizationError> {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or(NormalizationError::MissingName)?;

    let amount = raw
        .amount
        .as_ref()
        .and_then(parse_amount)
        .ok_or(NormalizationError::InvalidAmount)?;

    let billing_date = raw
        .billing_date
        .as_ref()
        .or(raw.billing_date_alt.as_ref())
        .and_then(parse_billing_day)
        .unwrap_or(1);

    let cycle = match raw.cycle.as_deref() {
        Some("YEARLY") => BillingCycle::Yearly,
        _ => BillingCycle::Monthly,
    };

    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "General".to_string());

    let icon = raw
        .icon
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| icon_for_category(&category).to_string());

    let color = raw
        .color
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_COLOR.to_string());

    Ok(SubscriptionDraft {
        name,
        amount,
        cycle,
        billing_date,
        category,
        icon,
        color,
    })
}

/// Fixed category-to-icon table; unknown categories get the General entry.
pub fn icon_for_category(category: &str) -> &'static str {
    match category {
        "Entertainment" => "fa-solid fa-film",
        "Music" => "fa-solid fa-music",
        "Design" => "fa-solid fa-pen-nib",
        "Storage" => "fa-solid fa-cloud",
        "AI Tools" => "fa-solid fa-robot",
        _ => DEFAULT_ICON,
    }
}

fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if amount.is_finite() && amount > 0.0 {
        Some(amount)
    } else {
        None
    }
}

fn parse_billing_day(value: &Value) -> Option<u32> {
    let day = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;

    if (1..=31).contains(&day) {
        Some(day as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from_json(value: serde_json::Value) -> RawDraft {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_draft_gets_all_defaults() {
        let raw = raw_from_json(json!({
            "name": "Netflix",
            "amount": 15.99
        }));

        let draft = normalize(raw).unwrap();
        assert_eq!(draft.name, "Netflix");
        assert_eq!(draft.amount, 15.99);
        assert_eq!(draft.billing_date, 1);
        assert_eq!(draft.cycle, BillingCycle::Monthly);
        assert_eq!(draft.category, "General");
        assert_eq!(draft.icon, DEFAULT_ICON);
        assert_eq!(draft.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let raw = raw_from_json(json!({ "amount": 9.99 }));
        assert_eq!(normalize(raw), Err(NormalizationError::MissingName));

        let raw = raw_from_json(json!({ "name": "   ", "amount": 9.99 }));
        assert_eq!(normalize(raw), Err(NormalizationError::MissingName));
    }

    #[test]
    fn test_unparseable_amount_is_an_error() {
        let raw = raw_from_json(json!({ "name": "Netflix", "amount": "abc" }));
        assert_eq!(normalize(raw), Err(NormalizationError::InvalidAmount));

        let raw = raw_from_json(json!({ "name": "Netflix" }));
        assert_eq!(normalize(raw), Err(NormalizationError::InvalidAmount));

        let raw = raw_from_json(json!({ "name": "Netflix", "amount": 0 }));
        assert_eq!(normalize(raw), Err(NormalizationError::InvalidAmount));

        let raw = raw_from_json(json!({ "name": "Netflix", "amount": -4.5 }));
        assert_eq!(normalize(raw), Err(NormalizationError::InvalidAmount));
    }

    #[test]
    fn test_amount_accepts_numeric_strings() {
        let raw = raw_from_json(json!({ "name": "Netflix", "amount": " 15.99 " }));
        assert_eq!(normalize(raw).unwrap().amount, 15.99);
    }

    #[test]
    fn test_billing_date_accepts_either_key() {
        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billing_date": 15
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 15);

        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billingDate": 20
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 20);

        // snake_case key wins when both are present
        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billing_date": 5, "billingDate": 20
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 5);

        // null billing_date falls through to the alternate key
        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billing_date": null, "billingDate": 20
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 20);
    }

    #[test]
    fn test_billing_date_defaults_on_bad_values() {
        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billing_date": "soon"
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 1);

        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billing_date": 45
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 1);

        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "billing_date": 0
        }));
        assert_eq!(normalize(raw).unwrap().billing_date, 1);
    }

    #[test]
    fn test_cycle_maps_only_the_yearly_literal() {
        let raw = raw_from_json(json!({
            "name": "Dropbox", "amount": 120, "cycle": "YEARLY"
        }));
        assert_eq!(normalize(raw).unwrap().cycle, BillingCycle::Yearly);

        for cycle in ["yearly", "MONTHLY", "annual", ""] {
            let raw = raw_from_json(json!({
                "name": "Dropbox", "amount": 120, "cycle": cycle
            }));
            assert_eq!(normalize(raw).unwrap().cycle, BillingCycle::Monthly);
        }
    }

    #[test]
    fn test_icon_derived_from_category_table() {
        let raw = raw_from_json(json!({
            "name": "Spotify", "amount": 9.99, "category": "Music"
        }));
        assert_eq!(normalize(raw).unwrap().icon, "fa-solid fa-music");

        // Unknown categories fall back to the General entry
        let raw = raw_from_json(json!({
            "name": "Gym", "amount": 30, "category": "Fitness"
        }));
        assert_eq!(normalize(raw).unwrap().icon, DEFAULT_ICON);
    }

    #[test]
    fn test_explicit_icon_and_color_win() {
        let raw = raw_from_json(json!({
            "name": "Spotify", "amount": 9.99, "category": "Music",
            "icon": "fa-brands fa-spotify", "color": "#1DB954"
        }));

        let draft = normalize(raw).unwrap();
        assert_eq!(draft.icon, "fa-brands fa-spotify");
        assert_eq!(draft.color, "#1DB954");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let raw = raw_from_json(json!({
            "name": "Netflix", "amount": 15.99, "confidence": 0.9, "notes": []
        }));
        assert!(normalize(raw).is_ok());
    }
}
