use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use tripbudget::affordability::affordability_tier;
use tripbudget::allocator::{daily_amount, BudgetPlan};
use tripbudget::models::ExchangeRates;

pub(crate) fn default_export_path(dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d");
    dir.join(format!("tripbudget-{today}.csv"))
}

/// Write one row per category. Returns the number of rows written.
pub(crate) fn export_plan(plan: &BudgetPlan, rates: &ExchangeRates, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    wtr.write_record([
        "id",
        "name",
        "percentage",
        "amount",
        "daily_amount",
        "tier",
        "currency",
    ])?;

    let duration = i64::from(plan.duration());
    for cat in plan.categories() {
        let tier = affordability_tier(cat, duration, plan.currency(), rates);
        wtr.write_record([
            cat.id.clone(),
            cat.name.clone(),
            cat.percentage.to_string(),
            cat.amount.to_string(),
            daily_amount(cat, duration).to_string(),
            tier.to_string(),
            plan.currency().code().to_string(),
        ])?;
    }
    wtr.flush().context("Failed to flush export file")?;

    let count = plan.categories().len();
    info!(path = %path.display(), rows = count, "exported plan");
    Ok(count)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;
    use tripbudget::models::Currency;

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        let mut plan = BudgetPlan::with_defaults(dec!(1000), 5, Currency::Usd);
        plan.set_category_percentage("accommodation", 50);

        let count = export_plan(&plan, &ExchangeRates::default(), &path).unwrap();
        assert_eq!(count, 6);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "id,name,percentage,amount,daily_amount,tier,currency");
        assert_eq!(lines[1], "accommodation,Accommodation,50,500,100,Standard,USD");
        assert_eq!(lines[2], "food,Food & Drinks,18,180,36,Standard,USD");
    }

    #[test]
    fn test_export_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trip.csv");
        let plan = BudgetPlan::with_defaults(dec!(300), 3, Currency::Eur);
        export_plan(&plan, &ExchangeRates::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_default_export_path_is_dated_csv() {
        let path = default_export_path(Path::new("/tmp/exports"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("tripbudget-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(path.parent().unwrap(), Path::new("/tmp/exports"));
    }
}
