use rust_decimal::Decimal;

use crate::allocator::{daily_amount, BudgetPlan};
use crate::models::{BudgetCategory, Currency, ExchangeRates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AffordabilityTier {
    Budget,
    Standard,
    Luxury,
}

impl AffordabilityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Standard => "Standard",
            Self::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for AffordabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-day cutoffs in the base currency. Spend below `low` is Budget, above
/// `high` is Luxury.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub low: Decimal,
    pub high: Decimal,
}

impl Thresholds {
    fn new(low: u32, high: u32) -> Self {
        Self {
            low: Decimal::from(low),
            high: Decimal::from(high),
        }
    }

    /// Cutoffs keyed on the category name; unknown names share one default pair.
    pub fn for_category(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("accommodation") || lower.contains("lodging") || lower.contains("hotel") {
            Self::new(50, 150)
        } else if lower.contains("food") {
            Self::new(20, 60)
        } else if lower.contains("transport") {
            Self::new(10, 40)
        } else if lower.contains("activit") {
            Self::new(15, 60)
        } else {
            Self::new(20, 80)
        }
    }

    pub fn classify(&self, per_day: Decimal) -> AffordabilityTier {
        if per_day < self.low {
            AffordabilityTier::Budget
        } else if per_day <= self.high {
            AffordabilityTier::Standard
        } else {
            AffordabilityTier::Luxury
        }
    }
}

/// Per-day spend for `category` expressed in the base currency. Spend too
/// large to convert saturates at `Decimal::MAX`.
pub fn per_day_in_base(
    category: &BudgetCategory,
    duration: i64,
    currency: Currency,
    rates: &ExchangeRates,
) -> Decimal {
    rates
        .to_base(daily_amount(category, duration), currency)
        .unwrap_or(Decimal::MAX)
}

pub fn affordability_tier(
    category: &BudgetCategory,
    duration: i64,
    currency: Currency,
    rates: &ExchangeRates,
) -> AffordabilityTier {
    let per_day = per_day_in_base(category, duration, currency, rates);
    Thresholds::for_category(&category.name).classify(per_day)
}

/// Price level (0 cheapest to 3 priciest) handed to the place-recommendation
/// source, derived from the activities category's per-day base spend. A plan
/// without an activities category gets level 0.
pub fn price_level(plan: &BudgetPlan, rates: &ExchangeRates) -> u8 {
    let Some(activities) = plan
        .categories()
        .iter()
        .find(|c| c.id == "activities" || c.name.to_lowercase().contains("activit"))
    else {
        return 0;
    };

    let per_day = per_day_in_base(
        activities,
        i64::from(plan.duration()),
        plan.currency(),
        rates,
    );
    if per_day < Decimal::TEN {
        0
    } else if per_day < Decimal::from(30) {
        1
    } else if per_day < Decimal::from(60) {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests;
