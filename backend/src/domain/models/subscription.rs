//! Validation rules and presentation defaults for subscription records.

/// Icon applied when neither the caller nor the category table supplies one.
pub const DEFAULT_ICON: &str = "fa-solid fa-cube";

/// Color applied when the caller supplies none.
pub const DEFAULT_COLOR: &str = "#ff7f50";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Amount must be a positive number")]
    NonPositiveAmount,
    #[error("Billing date must be between 1 and 31")]
    BillingDateOutOfRange,
    #[error("Category cannot be empty")]
    EmptyCategory,
}

pub fn validate_name(name: &str) -> Result<(), SubscriptionValidationError> {
    if name.trim().is_empty() {
        return Err(SubscriptionValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<(), SubscriptionValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(SubscriptionValidationError::NonPositiveAmount);
    }
    Ok(())
}

pub fn validate_billing_date(billing_date: u32) -> Result<(), SubscriptionValidationError> {
    if !(1..=31).contains(&billing_date) {
        return Err(SubscriptionValidationError::BillingDateOutOfRange);
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), SubscriptionValidationError> {
    if category.trim().is_empty() {
        return Err(SubscriptionValidationError::EmptyCategory);
    }
    Ok(())
}
