use rust_decimal::Decimal;

/// Nominal range the planner UI keeps a single share inside.
pub const UI_MIN_PERCENTAGE: u32 = 5;
pub const UI_MAX_PERCENTAGE: u32 = 60;

/// One named slice of a trip budget.
///
/// `amount` is a read-through cache of `percentage` and is only ever written
/// by the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub percentage: u32,
    pub amount: Decimal,
}

impl BudgetCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, percentage: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            percentage,
            amount: Decimal::ZERO,
        }
    }

    /// The split every new planning session starts from.
    pub fn defaults() -> Vec<BudgetCategory> {
        vec![
            Self::new("accommodation", "Accommodation", 35),
            Self::new("food", "Food & Drinks", 25),
            Self::new("transportation", "Transportation", 15),
            Self::new("activities", "Activities", 15),
            Self::new("shopping", "Shopping", 5),
            Self::new("misc", "Miscellaneous", 5),
        ]
    }

    /// Find a category by id, falling back to a case-insensitive name match.
    pub fn find<'a>(categories: &'a [BudgetCategory], key: &str) -> Option<&'a BudgetCategory> {
        let key = key.trim();
        categories.iter().find(|c| c.id == key).or_else(|| {
            let lower = key.to_lowercase();
            categories.iter().find(|c| c.name.to_lowercase() == lower)
        })
    }

    pub fn within_ui_range(&self) -> bool {
        (UI_MIN_PERCENTAGE..=UI_MAX_PERCENTAGE).contains(&self.percentage)
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
