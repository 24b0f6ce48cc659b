use anyhow::Result;
use std::path::PathBuf;

use tripbudget::affordability::{affordability_tier, per_day_in_base, price_level, Thresholds};
use tripbudget::allocator::{daily_amount, BudgetPlan};
use tripbudget::models::{Currency, ExchangeRates};

use crate::config::Config;
use crate::export::{default_export_path, export_plan};
use crate::input::{apply_edit, parse_days, parse_edit, parse_money, trip_days};
use crate::ui::util::format_money;

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    match args[1].as_str() {
        "plan" | "p" => cli_plan(&args[2..], config),
        "export" => cli_export(&args[2..], config),
        "tiers" => cli_tiers(&args[2..], config),
        "currencies" => {
            cli_currencies();
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tripbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("tripbudget: travel budget planner");
    println!();
    println!("Usage: tripbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  plan [edits...]               Print the allocation after applying edits");
    println!("  export [path] [edits...]      Write the allocation to CSV");
    println!("  tiers [edits...]              Show per-day affordability tiers");
    println!("  currencies                    List supported currencies and rates");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Plan options (plan, export, tiers):");
    println!("  --total <amount>              Total budget (default: $TRIPBUDGET_TOTAL or 1000)");
    println!("  --days <n>                    Trip length in days (default: $TRIPBUDGET_DAYS or 7)");
    println!("  --from <date> --to <date>     Trip dates (YYYY-MM-DD), sets the length");
    println!("  --currency <code>             Currency (default: $TRIPBUDGET_CURRENCY or USD)");
    println!();
    println!("Edits are applied in order:");
    println!("  Accommodation=50%             Set a category's share");
    println!("  \"Food & Drinks=300\"           Set a category's amount");
}

/// Options shared by every plan-producing command.
#[derive(Debug, Default)]
struct PlanArgs {
    total: Option<String>,
    days: Option<String>,
    from: Option<String>,
    to: Option<String>,
    currency: Option<String>,
    edits: Vec<String>,
    positional: Vec<String>,
}

fn parse_plan_args(args: &[String]) -> Result<PlanArgs> {
    let mut parsed = PlanArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--total" => &mut parsed.total,
            "--days" => &mut parsed.days,
            "--from" => &mut parsed.from,
            "--to" => &mut parsed.to,
            "--currency" => &mut parsed.currency,
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option: {flag}"),
            edit if edit.contains('=') => {
                parsed.edits.push(edit.to_string());
                continue;
            }
            other => {
                parsed.positional.push(other.to_string());
                continue;
            }
        };
        let value = iter
            .next()
            .ok_or_else(|| anyhow::anyhow!("Missing value for {arg}"))?;
        *slot = Some(value.clone());
    }
    Ok(parsed)
}

fn build_plan(args: &PlanArgs, config: &Config) -> Result<BudgetPlan> {
    let total = args
        .total
        .as_deref()
        .map(parse_money)
        .unwrap_or(config.total_budget);

    let days = match (&args.from, &args.to) {
        (Some(from), Some(to)) => trip_days(from, to)?,
        (None, None) => args.days.as_deref().map(parse_days).unwrap_or(config.duration),
        _ => anyhow::bail!("--from and --to must be given together"),
    };

    let currency = match args.currency.as_deref() {
        Some(code) => Currency::parse(code)
            .ok_or_else(|| anyhow::anyhow!("Unknown currency: {code}"))?,
        None => config.currency,
    };

    let mut plan = BudgetPlan::with_defaults(total, days, currency);
    for raw in &args.edits {
        let edit = parse_edit(raw)?;
        apply_edit(&mut plan, &edit)?;
    }
    Ok(plan)
}

fn cli_plan(args: &[String], config: &Config) -> Result<()> {
    let parsed = parse_plan_args(args)?;
    if let Some(extra) = parsed.positional.first() {
        anyhow::bail!("Unexpected argument: {extra}");
    }
    let plan = build_plan(&parsed, config)?;
    print_plan(&plan, &ExchangeRates::default());
    Ok(())
}

fn print_plan(plan: &BudgetPlan, rates: &ExchangeRates) {
    let currency = plan.currency();
    let duration = i64::from(plan.duration());

    println!(
        "Trip budget: {} over {} days ({currency})",
        format_money(plan.total_budget(), currency),
        plan.duration()
    );
    println!("{}", "─".repeat(72));
    println!(
        "  {:<18} {:>5} {:>16} {:>14}  Tier",
        "Category", "Share", "Amount", "Per day"
    );
    for cat in plan.categories() {
        let tier = affordability_tier(cat, duration, currency, rates);
        println!(
            "  {:<18} {:>4}% {:>16} {:>14}  {tier}",
            cat.name,
            cat.percentage,
            format_money(cat.amount, currency),
            format_money(daily_amount(cat, duration), currency),
        );
    }
    println!("{}", "─".repeat(72));
    println!("  {:<18} {:>4}%", "Total", plan.percentage_sum());
}

fn cli_export(args: &[String], config: &Config) -> Result<()> {
    let parsed = parse_plan_args(args)?;
    let plan = build_plan(&parsed, config)?;

    let output_path = parsed
        .positional
        .first()
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| default_export_path(&config.export_dir));

    let count = export_plan(&plan, &ExchangeRates::default(), &output_path)?;
    println!("Exported {count} categories to {}", output_path.display());
    Ok(())
}

fn cli_tiers(args: &[String], config: &Config) -> Result<()> {
    let parsed = parse_plan_args(args)?;
    let plan = build_plan(&parsed, config)?;
    let rates = ExchangeRates::default();
    let duration = i64::from(plan.duration());

    println!(
        "Per-day spend in {} ({} days)",
        Currency::BASE,
        plan.duration()
    );
    println!("{}", "─".repeat(60));
    for cat in plan.categories() {
        let per_day = per_day_in_base(cat, duration, plan.currency(), &rates);
        let thresholds = Thresholds::for_category(&cat.name);
        let tier = affordability_tier(cat, duration, plan.currency(), &rates);
        println!(
            "  {:<18} {:>12}  {:<9} (budget < {}, luxury > {})",
            cat.name,
            format_money(per_day, Currency::BASE),
            tier.as_str(),
            thresholds.low,
            thresholds.high,
        );
    }
    println!();
    println!("Recommendation price level: {}/3", price_level(&plan, &rates));
    Ok(())
}

fn cli_currencies() {
    let rates = ExchangeRates::default();
    println!("{:<6} {:<6} Per {}", "Code", "Symbol", Currency::BASE);
    println!("{}", "─".repeat(24));
    for c in Currency::all() {
        println!("{:<6} {:<6} {}", c.code(), c.symbol(), rates.rate(*c));
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> Config {
        Config {
            total_budget: dec!(1000),
            duration: 7,
            currency: Currency::Usd,
            export_dir: std::env::temp_dir(),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_plan_args() {
        let parsed = parse_plan_args(&args(&[
            "--total",
            "2500",
            "Accommodation=50%",
            "out.csv",
            "--currency",
            "eur",
        ]))
        .unwrap();
        assert_eq!(parsed.total.as_deref(), Some("2500"));
        assert_eq!(parsed.currency.as_deref(), Some("eur"));
        assert_eq!(parsed.edits, vec!["Accommodation=50%"]);
        assert_eq!(parsed.positional, vec!["out.csv"]);
    }

    #[test]
    fn test_parse_plan_args_errors() {
        assert!(parse_plan_args(&args(&["--total"])).is_err());
        assert!(parse_plan_args(&args(&["--budget", "5"])).is_err());
    }

    #[test]
    fn test_build_plan_uses_config_defaults() {
        let plan = build_plan(&PlanArgs::default(), &config()).unwrap();
        assert_eq!(plan.total_budget(), dec!(1000));
        assert_eq!(plan.duration(), 7);
        assert_eq!(plan.currency(), Currency::Usd);
    }

    #[test]
    fn test_build_plan_applies_flags_and_edits_in_order() {
        let parsed = parse_plan_args(&args(&[
            "--total",
            "$2,000",
            "--from",
            "2026-11-01",
            "--to",
            "2026-11-04",
            "Accommodation=50%",
            "Shopping=200",
        ]))
        .unwrap();
        let plan = build_plan(&parsed, &config()).unwrap();
        assert_eq!(plan.total_budget(), dec!(2000));
        assert_eq!(plan.duration(), 4);
        assert_eq!(plan.category("shopping").unwrap().percentage, 10);
        assert_eq!(plan.percentage_sum(), 100);
    }

    #[test]
    fn test_build_plan_rejects_half_a_date_range() {
        let parsed = parse_plan_args(&args(&["--from", "2026-11-01"])).unwrap();
        assert!(build_plan(&parsed, &config()).is_err());
    }

    #[test]
    fn test_build_plan_rejects_unknown_category_and_currency() {
        let parsed = parse_plan_args(&args(&["Souvenirs=10%"])).unwrap();
        assert!(build_plan(&parsed, &config()).is_err());
        let parsed = parse_plan_args(&args(&["--currency", "XYZ"])).unwrap();
        assert!(build_plan(&parsed, &config()).is_err());
    }

    #[test]
    fn test_cli_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.csv");
        cli_export(&args(&[path.to_str().unwrap(), "Food=30%"]), &config()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("food,Food & Drinks,30,"));
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(as_cli(&args(&["tripbudget", "frobnicate"]), &config()).is_err());
    }

    #[test]
    fn test_shellexpand_leaves_plain_paths() {
        assert_eq!(shellexpand("/tmp/x.csv"), "/tmp/x.csv");
        assert!(!shellexpand("~/x.csv").starts_with('~'));
    }
}
