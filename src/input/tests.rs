#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use tripbudget::models::Currency;

// ── parse_money ───────────────────────────────────────────────

#[test]
fn test_parse_money_plain() {
    assert_eq!(parse_money("1500"), dec!(1500));
    assert_eq!(parse_money(" 12.50 "), dec!(12.50));
}

#[test]
fn test_parse_money_strips_symbols_and_separators() {
    assert_eq!(parse_money("$1,200"), dec!(1200));
    assert_eq!(parse_money("₹ 83,000.00"), dec!(83000));
    assert_eq!(parse_money("C$250"), dec!(250));
    assert_eq!(parse_money("-$40"), dec!(-40));
    assert_eq!(parse_money("90 €"), dec!(90));
}

#[test]
fn test_parse_money_garbage_is_zero() {
    assert_eq!(parse_money("abc"), Decimal::ZERO);
    assert_eq!(parse_money(""), Decimal::ZERO);
    assert_eq!(parse_money("1.2.3"), Decimal::ZERO);
    assert_eq!(parse_money("1e3"), Decimal::ZERO);
    assert_eq!(parse_money("abc1"), Decimal::ZERO);
    assert_eq!(parse_money("12 dollars"), Decimal::ZERO);
}

// ── parse_days ────────────────────────────────────────────────

#[test]
fn test_parse_days() {
    assert_eq!(parse_days("7"), 7);
    assert_eq!(parse_days(" 14 "), 14);
}

#[test]
fn test_parse_days_defaults_to_one() {
    assert_eq!(parse_days("a week"), 1);
    assert_eq!(parse_days("0"), 1);
    assert_eq!(parse_days("-4"), 1);
}

// ── trip_days ─────────────────────────────────────────────────

#[test]
fn test_trip_days_is_inclusive() {
    assert_eq!(trip_days("2026-11-01", "2026-11-07").unwrap(), 7);
    assert_eq!(trip_days("2026-11-01", "2026-11-01").unwrap(), 1);
}

#[test]
fn test_trip_days_across_month_end() {
    assert_eq!(trip_days("2026-01-30", "2026-02-02").unwrap(), 4);
}

#[test]
fn test_trip_days_rejects_bad_input() {
    assert!(trip_days("2026-11-07", "2026-11-01").is_err());
    assert!(trip_days("11/01/2026", "2026-11-07").is_err());
}

// ── parse_percentage ──────────────────────────────────────────

#[test]
fn test_parse_percentage() {
    assert_eq!(parse_percentage("30"), Some(30));
    assert_eq!(parse_percentage(" 30% "), Some(30));
    assert_eq!(parse_percentage("12.5"), Some(13));
    assert_eq!(parse_percentage("-4"), Some(-4));
}

#[test]
fn test_parse_percentage_rejects_garbage() {
    assert_eq!(parse_percentage(""), None);
    assert_eq!(parse_percentage("%"), None);
    assert_eq!(parse_percentage("lots"), None);
    assert_eq!(parse_percentage("1e2"), None);
}

#[test]
fn test_parse_percentage_matches_edit_rounding() {
    let expected = parse_percentage("12.5%").map(|value| Edit::Percentage {
        category: "food".into(),
        value,
    });
    assert_eq!(Some(parse_edit("food=12.5%").unwrap()), expected);
}

// ── parse_edit ────────────────────────────────────────────────

#[test]
fn test_parse_percentage_edit() {
    assert_eq!(
        parse_edit("Accommodation=50%").unwrap(),
        Edit::Percentage {
            category: "Accommodation".into(),
            value: 50
        }
    );
}

#[test]
fn test_parse_edit_allows_spaces_in_name() {
    assert_eq!(
        parse_edit("  Food & Drinks = 20 % ").unwrap(),
        Edit::Percentage {
            category: "Food & Drinks".into(),
            value: 20
        }
    );
}

#[test]
fn test_parse_percentage_edit_rounds() {
    assert_eq!(
        parse_edit("food=12.5%").unwrap(),
        Edit::Percentage {
            category: "food".into(),
            value: 13
        }
    );
}

#[test]
fn test_parse_amount_edit() {
    assert_eq!(
        parse_edit("shopping=1,250.75").unwrap(),
        Edit::Amount {
            category: "shopping".into(),
            value: dec!(1250.75)
        }
    );
}

#[test]
fn test_parse_edit_rejects_garbage() {
    assert!(parse_edit("food").is_err());
    assert!(parse_edit("=20%").is_err());
    assert!(parse_edit("food=lots").is_err());
}

// ── apply_edit ────────────────────────────────────────────────

#[test]
fn test_apply_edit_by_name() {
    let mut plan = BudgetPlan::with_defaults(dec!(1000), 7, Currency::Usd);
    apply_edit(&mut plan, &parse_edit("accommodation=50%").unwrap()).unwrap();
    assert_eq!(plan.category("accommodation").unwrap().percentage, 50);
    assert_eq!(plan.category("food").unwrap().percentage, 18);
}

#[test]
fn test_apply_amount_edit() {
    let mut plan = BudgetPlan::with_defaults(dec!(2000), 7, Currency::Usd);
    apply_edit(&mut plan, &parse_edit("Shopping=200").unwrap()).unwrap();
    assert_eq!(plan.category("shopping").unwrap().percentage, 10);
    assert_eq!(plan.percentage_sum(), 100);
}

#[test]
fn test_apply_edit_unknown_category() {
    let mut plan = BudgetPlan::with_defaults(dec!(1000), 7, Currency::Usd);
    let before = plan.clone();
    assert!(apply_edit(&mut plan, &parse_edit("souvenirs=10%").unwrap()).is_err());
    assert_eq!(plan, before);
}
