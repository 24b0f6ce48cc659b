use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use tripbudget::models::{BudgetCategory, Currency};

use super::app::App;
use crate::export::{default_export_path, export_plan};
use crate::input::{
    apply_edit, parse_days, parse_edit, parse_money, parse_percentage, trip_days, Edit,
};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit tripbudget", cmd_quit, r);
    register_command!("quit", "Quit tripbudget", cmd_quit, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("t", "Set total budget (e.g. :t 2500)", cmd_total, r);
    register_command!("total", "Set total budget (e.g. :total 2500)", cmd_total, r);
    register_command!("d", "Set trip length in days (e.g. :d 10)", cmd_days, r);
    register_command!("days", "Set trip length in days (e.g. :days 10)", cmd_days, r);
    register_command!(
        "dates",
        "Set trip dates (e.g. :dates 2026-11-01 2026-11-07)",
        cmd_dates,
        r
    );
    register_command!(
        "currency",
        "Convert plan to a currency (e.g. :currency EUR)",
        cmd_currency,
        r
    );
    register_command!(
        "cur",
        "Convert plan to a currency (e.g. :currency EUR)",
        cmd_currency,
        r
    );
    register_command!(
        "pct",
        "Set a share (e.g. :pct Food 30, or :pct 30 for the selection)",
        cmd_pct,
        r
    );
    register_command!(
        "amount",
        "Set an amount (e.g. :amount Shopping 200)",
        cmd_amount,
        r
    );
    register_command!(
        "set",
        "Apply an edit (e.g. :set Food=30% or :set Food=300)",
        cmd_set,
        r
    );
    register_command!("reset", "Restore the default split", cmd_reset, r);
    register_command!(
        "export",
        "Export plan to CSV (e.g. :export ~/trip.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `"<category words> <value>"`. A lone value targets the selected category.
fn split_target<'a>(args: &'a str, app: &App) -> Option<(String, &'a str)> {
    let mut parts = args.rsplitn(2, ' ');
    let value = parts.next().filter(|v| !v.is_empty())?;
    match parts.next().map(str::trim) {
        Some(name) if !name.is_empty() => Some((name.to_string(), value)),
        _ => app.selected_category().map(|c| (c.id.clone(), value)),
    }
}

fn resolve_id(app: &App, key: &str) -> Option<String> {
    BudgetCategory::find(app.plan.categories(), key).map(|c| c.id.clone())
}

fn status_for(app: &mut App, id: &str) {
    let currency = app.plan.currency();
    if let Some(cat) = app.plan.category(id) {
        let msg = format!(
            "{}: {}% ({})",
            cat.name,
            cat.percentage,
            super::util::format_money(cat.amount, currency)
        );
        app.set_status(msg);
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_total(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :total <amount>");
        return Ok(());
    }
    app.plan.set_total_budget(parse_money(args));
    let total = super::util::format_money(app.plan.total_budget(), app.plan.currency());
    app.set_status(format!("Total budget: {total}"));
    Ok(())
}

fn cmd_days(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :days <count>");
        return Ok(());
    }
    app.plan.set_duration(parse_days(args));
    app.set_status(format!("Trip length: {} days", app.plan.duration()));
    Ok(())
}

fn cmd_dates(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [from, to] = parts.as_slice() else {
        app.set_status("Usage: :dates <YYYY-MM-DD> <YYYY-MM-DD>");
        return Ok(());
    };
    match trip_days(from, to) {
        Ok(days) => {
            app.plan.set_duration(days);
            app.set_status(format!("Trip length: {days} days ({from} to {to})"));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(currency) = Currency::parse(args) else {
        let codes: Vec<&str> = Currency::all().iter().map(|c| c.code()).collect();
        app.set_status(format!("Usage: :currency <code>. Codes: {}", codes.join(", ")));
        return Ok(());
    };
    match app.plan.convert_currency(currency, &app.rates) {
        Ok(()) => {
            let total = super::util::format_money(app.plan.total_budget(), currency);
            app.set_status(format!("Converted to {currency}: {total}"));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn cmd_pct(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some((key, value)) = split_target(args, app) else {
        app.set_status("Usage: :pct [category] <percent>");
        return Ok(());
    };
    let Some(id) = resolve_id(app, &key) else {
        app.set_status(format!("Category not found: {key}"));
        return Ok(());
    };
    match parse_percentage(&value) {
        Some(pct) => {
            app.plan.set_category_percentage(&id, pct);
            status_for(app, &id);
        }
        None => app.set_status(format!("Not a percentage: {value}")),
    }
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some((key, value)) = split_target(args, app) else {
        app.set_status("Usage: :amount [category] <amount>");
        return Ok(());
    };
    let Some(id) = resolve_id(app, &key) else {
        app.set_status(format!("Category not found: {key}"));
        return Ok(());
    };
    if app.plan.total_budget() <= Decimal::ZERO {
        app.set_status("Set a total budget first (:total <amount>)");
        return Ok(());
    }
    app.plan.set_category_amount(&id, parse_money(value));
    status_for(app, &id);
    Ok(())
}

fn cmd_set(args: &str, app: &mut App) -> anyhow::Result<()> {
    let edit = match parse_edit(args) {
        Ok(edit) => edit,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };
    if matches!(edit, Edit::Amount { .. }) && app.plan.total_budget() <= Decimal::ZERO {
        app.set_status("Set a total budget first (:total <amount>)");
        return Ok(());
    }
    if let Err(e) = apply_edit(&mut app.plan, &edit) {
        app.set_status(format!("{e}"));
        return Ok(());
    }
    if let Some(id) = resolve_id(app, edit.category()) {
        status_for(app, &id);
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.plan.reset();
    app.set_status("Restored the default split");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path(&app.export_dir)
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };
    let count = export_plan(&app.plan, &app.rates, &path)?;
    app.set_status(format!("Exported {count} categories to {}", path.display()));
    Ok(())
}
