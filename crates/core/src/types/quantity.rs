//! Bounded order quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A selected quantity for one product.
///
/// ## Constraints
///
/// - Range: 0-999 inclusive
/// - Out-of-range input is clamped, never rejected
///
/// ## Examples
///
/// ```
/// use confeitaria_core::Quantity;
///
/// assert_eq!(Quantity::clamped(12).get(), 12);
/// assert_eq!(Quantity::clamped(-3).get(), 0);
/// assert_eq!(Quantity::clamped(5000).get(), 999);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u16);

impl Quantity {
    /// Largest quantity a single product can hold.
    pub const MAX_VALUE: u16 = 999;

    /// The empty quantity.
    pub const ZERO: Self = Self(0);

    /// The largest quantity.
    pub const MAX: Self = Self(Self::MAX_VALUE);

    /// Build a quantity from any integer, clamping into `0..=999`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(0, i64::from(Self::MAX_VALUE));
        Self(u16::try_from(bounded).unwrap_or(Self::MAX_VALUE))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Whether this quantity selects nothing.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// One more, saturating at the maximum.
    #[must_use]
    pub fn increment(self) -> Self {
        Self::clamped(i64::from(self.0) + 1)
    }

    /// One less, saturating at zero.
    #[must_use]
    pub fn decrement(self) -> Self {
        Self::clamped(i64::from(self.0) - 1)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}
