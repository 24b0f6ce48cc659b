mod category;
mod currency;

pub use category::{BudgetCategory, UI_MAX_PERCENTAGE, UI_MIN_PERCENTAGE};
pub use currency::{Currency, ExchangeRates};
