use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::models::{BudgetCategory, Currency, ExchangeRates};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A trip budget split across categories whose percentages always sum to 100.
///
/// Every mutator takes `&mut self` and finishes the whole recompute before
/// returning, so a caller never observes a half-rebalanced plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPlan {
    total_budget: Decimal,
    duration: u32,
    currency: Currency,
    categories: Vec<BudgetCategory>,
}

impl BudgetPlan {
    /// Plan seeded with [`BudgetCategory::defaults`].
    pub fn with_defaults(total_budget: Decimal, duration: i64, currency: Currency) -> Self {
        let mut plan = Self {
            total_budget: Decimal::ZERO,
            duration: clamp_duration(duration),
            currency,
            categories: BudgetCategory::defaults(),
        };
        plan.set_total_budget(total_budget);
        plan
    }

    /// Plan over a custom category set. The seed must be non-empty, use unique
    /// ids and already sum to 100.
    pub fn new(
        total_budget: Decimal,
        duration: i64,
        currency: Currency,
        categories: Vec<BudgetCategory>,
    ) -> Result<Self> {
        anyhow::ensure!(!categories.is_empty(), "A budget plan needs at least one category");
        let sum: u32 = categories.iter().map(|c| c.percentage).sum();
        anyhow::ensure!(sum == 100, "Category percentages sum to {sum}, expected 100");
        for (i, cat) in categories.iter().enumerate() {
            anyhow::ensure!(
                !categories[..i].iter().any(|c| c.id == cat.id),
                "Duplicate category id: {}",
                cat.id
            );
        }

        let mut plan = Self {
            total_budget: Decimal::ZERO,
            duration: clamp_duration(duration),
            currency,
            categories,
        };
        plan.set_total_budget(total_budget);
        Ok(plan)
    }

    pub fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn categories(&self) -> &[BudgetCategory] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn percentage_sum(&self) -> u32 {
        self.categories.iter().map(|c| c.percentage).sum()
    }

    /// Store a new total and re-derive every amount. Negative totals clamp to zero.
    pub fn set_total_budget(&mut self, new_total: Decimal) {
        self.total_budget = new_total.max(Decimal::ZERO);
        self.recompute_amounts();
    }

    /// Values below one day are treated as one day.
    pub fn set_duration(&mut self, days: i64) {
        self.duration = clamp_duration(days);
    }

    /// Relabel the plan without touching the numbers.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Move the plan into another currency, rescaling the total through the
    /// base rate. Percentages are untouched. A total too large to convert
    /// leaves the plan as it was.
    pub fn convert_currency(&mut self, to: Currency, rates: &ExchangeRates) -> Result<()> {
        let converted = rates
            .convert(self.total_budget, self.currency, to)
            .ok_or_else(|| {
                anyhow::anyhow!("Total {} {} is too large to convert to {to}", self.total_budget, self.currency)
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        debug!(from = %self.currency, to = %to, total = %converted, "converted plan currency");
        self.currency = to;
        self.set_total_budget(converted);
        Ok(())
    }

    /// Put the default split back, keeping total, duration and currency.
    pub fn reset(&mut self) {
        self.categories = BudgetCategory::defaults();
        self.recompute_amounts();
    }

    /// Set one category's share and rebalance the others so the total stays at 100.
    ///
    /// The other categories absorb the difference in proportion to their
    /// current shares, each rounded on its own. The rounding residual is then
    /// handed to the first category after the edited one in list order; if that
    /// would drive it below zero the remainder carries on down the list.
    /// Unknown ids are ignored.
    pub fn set_category_percentage(&mut self, id: &str, requested: i64) {
        let Some(target) = self.categories.iter().position(|c| c.id == id) else {
            debug!(category = id, "ignoring percentage edit for unknown category");
            return;
        };

        let requested = requested.clamp(0, 100);
        let mut shares: Vec<i64> = self
            .categories
            .iter()
            .map(|c| i64::from(c.percentage))
            .collect();
        shares[target] = requested;

        let delta = 100 - shares.iter().sum::<i64>();
        if delta != 0 {
            redistribute(&mut shares, target, delta);
            let residual = absorb_residual(&mut shares, target);
            debug!(category = id, requested, delta, residual, "rebalanced categories");
        }

        for (cat, share) in self.categories.iter_mut().zip(shares) {
            cat.percentage = u32::try_from(share).unwrap_or(0);
        }
        self.recompute_amounts();
    }

    /// Translate a monetary amount into a share of the total and apply it as a
    /// percentage edit. Without a positive total this does nothing.
    pub fn set_category_amount(&mut self, id: &str, requested: Decimal) {
        if self.total_budget <= Decimal::ZERO {
            debug!(category = id, "ignoring amount edit without a total budget");
            return;
        }

        let percentage = requested
            .checked_div(self.total_budget)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .map(round_half_up)
            .and_then(|p| p.to_i64())
            .unwrap_or(if requested.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            });
        self.set_category_percentage(id, percentage);
    }

    fn recompute_amounts(&mut self) {
        for cat in &mut self.categories {
            cat.amount = amount_for(cat.percentage, self.total_budget);
        }
    }
}

/// `round(percentage / 100 * total)`.
pub fn amount_for(percentage: u32, total: Decimal) -> Decimal {
    round_half_up(Decimal::from(percentage) / HUNDRED * total)
}

/// Per-day spend for a category. Durations below one day count as one.
pub fn daily_amount(category: &BudgetCategory, duration: i64) -> Decimal {
    round_half_up(category.amount / Decimal::from(duration.max(1)))
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}

fn clamp_duration(days: i64) -> u32 {
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

/// Integer `round(numerator / denominator)` for a positive denominator, halves
/// toward positive infinity.
fn round_div(numerator: i64, denominator: i64) -> i64 {
    let (n, d) = (i128::from(numerator), i128::from(denominator));
    let rounded = (2 * n + d).div_euclid(2 * d);
    i64::try_from(rounded).unwrap_or(0)
}

/// Spread `delta` over every share except `target`, weighted by the current shares.
fn redistribute(shares: &mut [i64], target: usize, delta: i64) {
    let others: i64 = shares
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target)
        .map(|(_, s)| *s)
        .sum();
    if others == 0 {
        return;
    }

    for (i, share) in shares.iter_mut().enumerate() {
        if i != target {
            *share = (*share + round_div(delta * *share, others)).max(0);
        }
    }
}

/// Fold the rounding residual into the first non-target share and return it.
fn absorb_residual(shares: &mut [i64], target: usize) -> i64 {
    let residual = 100 - shares.iter().sum::<i64>();
    if residual == 0 {
        return 0;
    }

    let order: Vec<usize> = (0..shares.len())
        .filter(|i| *i != target)
        .chain(std::iter::once(target))
        .collect();

    if residual > 0 {
        shares[order[0]] += residual;
        return residual;
    }

    let mut remaining = -residual;
    for idx in order {
        let take = remaining.min(shares[idx]);
        shares[idx] -= take;
        remaining -= take;
        if remaining == 0 {
            break;
        }
    }
    residual
}
