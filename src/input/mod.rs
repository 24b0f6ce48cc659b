use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use tripbudget::allocator::{round_half_up, BudgetPlan};
use tripbudget::models::{BudgetCategory, Currency};

/// `<category>=<number>` with an optional trailing `%`.
static EDIT_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<name>[^=]+?)\s*=\s*(?P<value>[-+]?[0-9][0-9,]*(?:\.[0-9]+)?)\s*(?P<pct>%)?\s*$")
});

/// A single edit to one category, as typed on the command line or in the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Edit {
    Percentage { category: String, value: i64 },
    Amount { category: String, value: Decimal },
}

impl Edit {
    pub(crate) fn category(&self) -> &str {
        match self {
            Self::Percentage { category, .. } | Self::Amount { category, .. } => category,
        }
    }
}

/// Parse free-text money. Whitespace, thousands separators and a leading or
/// trailing currency symbol are ignored; anything else must be a plain number.
pub(crate) fn try_parse_money(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let (sign, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let number = Currency::all()
        .iter()
        .find_map(|c| {
            unsigned
                .strip_prefix(c.symbol())
                .or_else(|| unsigned.strip_suffix(c.symbol()))
        })
        .unwrap_or(unsigned);
    if !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str(&format!("{sign}{number}")).ok()
}

/// Like [`try_parse_money`], but anything unparseable becomes zero.
pub(crate) fn parse_money(s: &str) -> Decimal {
    try_parse_money(s).unwrap_or_else(|| {
        debug!(input = s, "unparseable money input, using 0");
        Decimal::ZERO
    })
}

/// Parse a free-text day count. Anything unparseable or below one becomes one.
pub(crate) fn parse_days(s: &str) -> i64 {
    match s.trim().parse::<i64>() {
        Ok(days) => days.max(1),
        Err(_) => {
            debug!(input = s, "unparseable duration input, using 1");
            1
        }
    }
}

/// Parse a percentage such as `30`, `12.5` or `30%`, rounded to a whole share.
pub(crate) fn parse_percentage(s: &str) -> Option<i64> {
    let raw = s.trim().trim_end_matches('%').trim_end();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
        return None;
    }
    Decimal::from_str(raw).ok().and_then(percentage_from)
}

fn percentage_from(value: Decimal) -> Option<i64> {
    round_half_up(value).to_i64()
}

/// Inclusive number of days between two `YYYY-MM-DD` dates.
pub(crate) fn trip_days(from: &str, to: &str) -> Result<i64> {
    let start = NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid start date '{from}', expected YYYY-MM-DD"))?;
    let end = NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid end date '{to}', expected YYYY-MM-DD"))?;
    if end < start {
        anyhow::bail!("Trip ends ({end}) before it starts ({start})");
    }
    Ok((end - start).num_days() + 1)
}

pub(crate) fn parse_edit(s: &str) -> Result<Edit> {
    let re = EDIT_PATTERN
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Edit pattern failed to compile: {e}"))?;
    let caps = re
        .captures(s)
        .ok_or_else(|| anyhow::anyhow!("Invalid edit '{s}'. Use <category>=<pct>% or <category>=<amount>"))?;

    let category = caps["name"].to_string();
    let raw = caps["value"].replace(',', "");
    let value = Decimal::from_str(&raw).with_context(|| format!("Invalid number in '{s}'"))?;

    if caps.name("pct").is_some() {
        let value = percentage_from(value)
            .ok_or_else(|| anyhow::anyhow!("Percentage out of range in '{s}'"))?;
        Ok(Edit::Percentage { category, value })
    } else {
        Ok(Edit::Amount { category, value })
    }
}

/// Resolve the edit's category by id or name and apply it to the plan.
pub(crate) fn apply_edit(plan: &mut BudgetPlan, edit: &Edit) -> Result<()> {
    let id = BudgetCategory::find(plan.categories(), edit.category())
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", edit.category()))?;

    match edit {
        Edit::Percentage { value, .. } => plan.set_category_percentage(&id, *value),
        Edit::Amount { value, .. } => plan.set_category_amount(&id, *value),
    }
    Ok(())
}

#[cfg(test)]
mod tests;
