use std::collections::HashMap;

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Aud,
    Cad,
}

impl Currency {
    /// Currency every rate in [`ExchangeRates`] is quoted against.
    pub const BASE: Currency = Currency::Usd;

    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
            Self::Jpy => "JPY",
            Self::Aud => "AUD",
            Self::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Inr => "₹",
            Self::Jpy => "¥",
            Self::Aud => "A$",
            Self::Cad => "C$",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USD" | "$" => Some(Self::Usd),
            "EUR" | "€" => Some(Self::Eur),
            "GBP" | "£" => Some(Self::Gbp),
            "INR" | "₹" => Some(Self::Inr),
            "JPY" | "¥" => Some(Self::Jpy),
            "AUD" => Some(Self::Aud),
            "CAD" => Some(Self::Cad),
            _ => None,
        }
    }

    pub fn all() -> &'static [Currency] {
        &[
            Self::Usd,
            Self::Eur,
            Self::Gbp,
            Self::Inr,
            Self::Jpy,
            Self::Aud,
            Self::Cad,
        ]
    }

    /// Units of this currency per one unit of [`Currency::BASE`].
    pub fn default_rate(&self) -> Decimal {
        match self {
            Self::Usd => Decimal::ONE,
            Self::Eur => Decimal::new(92, 2),
            Self::Gbp => Decimal::new(79, 2),
            Self::Inr => Decimal::new(83, 0),
            Self::Jpy => Decimal::new(150, 0),
            Self::Aud => Decimal::new(152, 2),
            Self::Cad => Decimal::new(136, 2),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Static conversion table. Rates are configuration, never fetched.
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    rates: HashMap<Currency, Decimal>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        let rates = Currency::all()
            .iter()
            .map(|c| (*c, c.default_rate()))
            .collect();
        Self { rates }
    }
}

impl ExchangeRates {
    pub fn with_rate(mut self, currency: Currency, rate: Decimal) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Units of `currency` per base unit. Missing or non-positive rates count as 1.
    pub fn rate(&self, currency: Currency) -> Decimal {
        self.rates
            .get(&currency)
            .copied()
            .filter(|r| *r > Decimal::ZERO)
            .unwrap_or(Decimal::ONE)
    }

    /// `None` when the result does not fit in a `Decimal`.
    pub fn to_base(&self, amount: Decimal, currency: Currency) -> Option<Decimal> {
        amount.checked_div(self.rate(currency))
    }

    /// `None` when the result does not fit in a `Decimal`.
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Option<Decimal> {
        if from == to {
            return Some(amount);
        }
        self.to_base(amount, from)?.checked_mul(self.rate(to))
    }
}
