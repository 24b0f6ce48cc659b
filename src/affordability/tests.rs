#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn category(name: &str, amount: Decimal) -> BudgetCategory {
    BudgetCategory {
        amount,
        ..BudgetCategory::new(name.to_lowercase(), name, 20)
    }
}

// ── Thresholds ────────────────────────────────────────────────

#[test]
fn test_thresholds_per_category() {
    assert_eq!(Thresholds::for_category("Accommodation").low, dec!(50));
    assert_eq!(Thresholds::for_category("Accommodation").high, dec!(150));
    assert_eq!(Thresholds::for_category("Food & Drinks").low, dec!(20));
    assert_eq!(Thresholds::for_category("Transportation").high, dec!(40));
    assert_eq!(Thresholds::for_category("Activities").low, dec!(15));
}

#[test]
fn test_unlisted_category_uses_default_pair() {
    let t = Thresholds::for_category("Shopping");
    assert_eq!((t.low, t.high), (dec!(20), dec!(80)));
    assert_eq!(Thresholds::for_category("Miscellaneous"), t);
}

#[test]
fn test_classify_boundaries() {
    let t = Thresholds::for_category("Accommodation");
    assert_eq!(t.classify(dec!(49.99)), AffordabilityTier::Budget);
    assert_eq!(t.classify(dec!(50)), AffordabilityTier::Standard);
    assert_eq!(t.classify(dec!(150)), AffordabilityTier::Standard);
    assert_eq!(t.classify(dec!(150.01)), AffordabilityTier::Luxury);
}

// ── affordability_tier ────────────────────────────────────────

#[test]
fn test_scenario_d_accommodation_tiers() {
    let rates = ExchangeRates::default();
    let tier = |amount| affordability_tier(&category("Accommodation", amount), 5, Currency::Usd, &rates);
    assert_eq!(tier(dec!(200)), AffordabilityTier::Budget); // $40/day
    assert_eq!(tier(dec!(500)), AffordabilityTier::Standard); // $100/day
    assert_eq!(tier(dec!(1000)), AffordabilityTier::Luxury); // $200/day
}

#[test]
fn test_tier_normalizes_currency() {
    let rates = ExchangeRates::default();
    // 8300 INR over 1 day is $100/day
    let cat = category("Accommodation", dec!(8300));
    assert_eq!(
        affordability_tier(&cat, 1, Currency::Inr, &rates),
        AffordabilityTier::Standard
    );
    // The same number read as USD is luxury
    assert_eq!(
        affordability_tier(&cat, 1, Currency::Usd, &rates),
        AffordabilityTier::Luxury
    );
}

#[test]
fn test_tier_with_zero_duration() {
    let rates = ExchangeRates::default();
    let cat = category("Food & Drinks", dec!(30));
    assert_eq!(
        affordability_tier(&cat, 0, Currency::Usd, &rates),
        AffordabilityTier::Standard
    );
}

#[test]
fn test_tier_ordering_and_display() {
    assert!(AffordabilityTier::Budget < AffordabilityTier::Standard);
    assert!(AffordabilityTier::Standard < AffordabilityTier::Luxury);
    assert_eq!(format!("{}", AffordabilityTier::Luxury), "Luxury");
}

// ── price_level ───────────────────────────────────────────────

#[test]
fn test_price_level_from_activities() {
    let rates = ExchangeRates::default();
    // Activities hold 15%: 15% of 1000 over 10 days = $15/day
    let mut plan = BudgetPlan::with_defaults(dec!(1000), 10, Currency::Usd);
    assert_eq!(price_level(&plan, &rates), 1);

    plan.set_total_budget(dec!(500)); // $7.50 -> 8/day
    assert_eq!(price_level(&plan, &rates), 0);

    plan.set_total_budget(dec!(3000)); // $45/day
    assert_eq!(price_level(&plan, &rates), 2);

    plan.set_total_budget(dec!(4000)); // $60/day
    assert_eq!(price_level(&plan, &rates), 3);
}

#[test]
fn test_price_level_without_activities() {
    let seed = vec![
        BudgetCategory::new("stay", "Accommodation", 60),
        BudgetCategory::new("eat", "Food", 40),
    ];
    let plan = BudgetPlan::new(dec!(10000), 1, Currency::Usd, seed).unwrap();
    assert_eq!(price_level(&plan, &ExchangeRates::default()), 0);
}
