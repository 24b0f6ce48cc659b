use std::path::PathBuf;

use tripbudget::allocator::BudgetPlan;
use tripbudget::models::{BudgetCategory, ExchangeRates};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

/// One interactive planning session. The plan is owned here and only
/// mutated from the input loop, one edit at a time.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) plan: BudgetPlan,
    pub(crate) rates: ExchangeRates,
    pub(crate) export_dir: PathBuf,
    pub(crate) category_index: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            plan: BudgetPlan::with_defaults(config.total_budget, config.duration, config.currency),
            rates: ExchangeRates::default(),
            export_dir: config.export_dir.clone(),
            category_index: 0,
        }
    }

    pub(crate) fn selected_category(&self) -> Option<&BudgetCategory> {
        self.plan.categories().get(self.category_index)
    }

    pub(crate) fn move_down(&mut self) {
        if self.category_index + 1 < self.plan.categories().len() {
            self.category_index += 1;
        }
    }

    pub(crate) fn move_up(&mut self) {
        self.category_index = self.category_index.saturating_sub(1);
    }

    /// Nudge the selected category's share by `step` points.
    pub(crate) fn adjust_selected(&mut self, step: i64) {
        let Some(cat) = self.selected_category() else {
            return;
        };
        let id = cat.id.clone();
        let requested = i64::from(cat.percentage) + step;
        self.plan.set_category_percentage(&id, requested);
        if let Some(cat) = self.plan.category(&id) {
            let msg = format!("{}: {}%", cat.name, cat.percentage);
            self.set_status(msg);
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use tripbudget::models::Currency;

    fn test_app() -> App {
        App::new(&Config {
            total_budget: dec!(1000),
            duration: 7,
            currency: Currency::Usd,
            export_dir: PathBuf::from("/tmp"),
        })
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = test_app();
        app.move_up();
        assert_eq!(app.category_index, 0);
        for _ in 0..20 {
            app.move_down();
        }
        assert_eq!(app.category_index, app.plan.categories().len() - 1);
    }

    #[test]
    fn test_adjust_selected_rebalances() {
        let mut app = test_app();
        app.adjust_selected(1);
        assert_eq!(app.plan.categories()[0].percentage, 36);
        assert_eq!(app.plan.percentage_sum(), 100);
        assert_eq!(app.status_message, "Accommodation: 36%");
    }

    #[test]
    fn test_adjust_selected_floors_at_zero() {
        let mut app = test_app();
        app.category_index = 4;
        for _ in 0..10 {
            app.adjust_selected(-1);
        }
        assert_eq!(app.plan.categories()[4].percentage, 0);
        assert_eq!(app.plan.percentage_sum(), 100);
    }
}
