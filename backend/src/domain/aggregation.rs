//! Pure aggregation functions over subscription sets.
//!
//! Everything here is synchronous and total over any input, including the
//! empty set. No validation happens at this level.

use shared::{BillingCycle, CategoryStat, Subscription};

/// Monthly-equivalent cost: the amount itself for monthly subscriptions,
/// amount / 12 for yearly ones. Exact floating point, no rounding.
pub fn monthly_equivalent(subscription: &Subscription) -> f64 {
    match subscription.cycle {
        BillingCycle::Monthly => subscription.amount,
        BillingCycle::Yearly => subscription.amount / 12.0,
    }
}

/// Sum of monthly equivalents; 0.0 for an empty set.
pub fn monthly_total(subscriptions: &[Subscription]) -> f64 {
    subscriptions.iter().map(monthly_equivalent).sum()
}

/// Case-insensitive substring match against name or category.
///
/// An empty or whitespace-only query returns the input unchanged.
pub fn filter_by_text(subscriptions: &[Subscription], query: &str) -> Vec<Subscription> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return subscriptions.to_vec();
    }

    subscriptions
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&query) || s.category.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Group by exact category string, accumulating count and monthly-equivalent
/// total, ordered descending by total. The sort is stable, so categories with
/// equal totals keep their first-seen order.
pub fn category_breakdown(subscriptions: &[Subscription]) -> Vec<CategoryStat> {
    let mut stats: Vec<CategoryStat> = Vec::new();

    for subscription in subscriptions {
        match stats.iter_mut().find(|s| s.category == subscription.category) {
            Some(stat) => {
                stat.count += 1;
                stat.total_monthly += monthly_equivalent(subscription);
            }
            None => stats.push(CategoryStat {
                category: subscription.category.clone(),
                count: 1,
                total_monthly: monthly_equivalent(subscription),
            }),
        }
    }

    stats.sort_by(|a, b| {
        b.total_monthly
            .partial_cmp(&a.total_monthly)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

/// Subscriptions whose billing_date equals the given day number.
///
/// Deliberately cycle-blind: a yearly subscription matches every month on its
/// billing day, mirroring how the calendar treats recurrence.
pub fn subscriptions_on_day(subscriptions: &[Subscription], day: u32) -> Vec<Subscription> {
    subscriptions
        .iter()
        .filter(|s| s.billing_date == day)
        .cloned()
        .collect()
}
