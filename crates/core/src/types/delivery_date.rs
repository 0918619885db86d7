//! Event/delivery date type.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing or validating a [`DeliveryDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryDateError {
    /// The input is not an ISO `YYYY-MM-DD` calendar date.
    #[error("delivery date must be a YYYY-MM-DD calendar date, got {0:?}")]
    Malformed(String),
    /// The date is earlier than the current calendar day.
    #[error("delivery date {date} is before today ({today})")]
    InPast {
        /// The rejected date.
        date: NaiveDate,
        /// The day it was compared against.
        today: NaiveDate,
    },
}

/// A calendar day chosen for the event or delivery.
///
/// Dates are compared at day granularity; there is no time-of-day component.
/// Parsing does not check against "today" - use [`DeliveryDate::parse_from`]
/// for input coming from a user.
///
/// ## Examples
///
/// ```
/// use chrono::NaiveDate;
/// use confeitaria_core::DeliveryDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
///
/// assert!(DeliveryDate::parse_from("2026-10-19", today).is_ok());
/// assert!(DeliveryDate::parse_from("2026-10-18", today).is_err());
/// assert!(DeliveryDate::parse_from("19/10/2026", today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryDate(NaiveDate);

impl DeliveryDate {
    /// ISO format used for storage and input.
    pub const ISO_FORMAT: &'static str = "%Y-%m-%d";

    /// Wrap an already-validated date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse an ISO `YYYY-MM-DD` string without checking it against today.
    ///
    /// Used when restoring persisted data, which is not re-validated.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDateError::Malformed`] if the input is not a valid
    /// calendar date.
    pub fn parse(s: &str) -> Result<Self, DeliveryDateError> {
        NaiveDate::parse_from_str(s.trim(), Self::ISO_FORMAT)
            .map(Self)
            .map_err(|_| DeliveryDateError::Malformed(s.to_owned()))
    }

    /// Parse user input and reject days strictly before `today`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDateError::Malformed`] for non-dates and
    /// [`DeliveryDateError::InPast`] for days before `today`.
    pub fn parse_from(s: &str, today: NaiveDate) -> Result<Self, DeliveryDateError> {
        let date = Self::parse(s)?;
        if date.0 < today {
            return Err(DeliveryDateError::InPast {
                date: date.0,
                today,
            });
        }
        Ok(date)
    }

    /// The underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// ISO `YYYY-MM-DD` text, as stored.
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.0.format(Self::ISO_FORMAT).to_string()
    }

    /// Brazilian `DD/MM/YYYY` text, as shown in messages.
    #[must_use]
    pub fn to_pt_br(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}

impl fmt::Display for DeliveryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::ISO_FORMAT))
    }
}

impl std::str::FromStr for DeliveryDate {
    type Err = DeliveryDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
