//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Quantity;

/// A price with currency information.
///
/// Arithmetic is exact; rounding to two decimals happens only in
/// [`Price::display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit.
    ///
    /// ```
    /// use confeitaria_core::{CurrencyCode, Price};
    ///
    /// let price = Price::from_cents(350, CurrencyCode::BRL);
    /// assert_eq!(price.display(), "R$ 3,50");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Format the amount with two decimals in the currency's local style,
    /// e.g. `R$ 6,40`. No thousands grouping is applied.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.currency_code.symbol(), self.display_amount())
    }

    /// Format only the amount with two decimals and the currency's decimal
    /// separator.
    #[must_use]
    pub fn display_amount(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{rounded:.2}");
        match self.currency_code.decimal_separator() {
            '.' => text,
            sep => text.replace('.', &sep.to_string()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds two amounts, keeping the currency of the left operand.
    fn add(self, rhs: Self) -> Self {
        Self {
            amount: self.amount + rhs.amount,
            currency_code: self.currency_code,
        }
    }
}

impl Mul<Quantity> for Price {
    type Output = Self;

    fn mul(self, rhs: Quantity) -> Self {
        Self {
            amount: self.amount * Decimal::from(rhs.get()),
            currency_code: self.currency_code,
        }
    }
}

impl Sum for Price {
    /// Sums prices. An empty iterator yields zero in the default currency.
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add)
            .unwrap_or_else(|| Self::zero(CurrencyCode::default()))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol used in front of amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Decimal separator used when displaying amounts.
    #[must_use]
    pub const fn decimal_separator(&self) -> char {
        match self {
            Self::BRL | Self::EUR => ',',
            Self::USD => '.',
        }
    }
}
