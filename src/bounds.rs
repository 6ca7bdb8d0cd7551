use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::consts::RANGE_SEPARATOR;
use crate::prelude::*;
use crate::{CalendarDate, DateError};

/// The inclusive calendar window a picker operates over.
/// The minimum date must be less than or equal to the maximum date;
/// dates strictly outside the window are never selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{minimum}/{maximum}")]
pub struct DateBounds {
    minimum: CalendarDate,
    maximum: CalendarDate,
}

/// Error type for picker configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Minimum date is after maximum date.
    #[error("Invalid bounds: minimum ({minimum}) is after maximum ({maximum})")]
    InvalidBounds {
        minimum: CalendarDate,
        maximum: CalendarDate,
    },

    /// Error parsing a date component.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid bounds format.
    #[error("Invalid bounds format: {0}")]
    InvalidFormat(String),
}

impl DateBounds {
    /// Creates a new window with validation.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBounds` if minimum > maximum.
    pub fn new(minimum: CalendarDate, maximum: CalendarDate) -> Result<Self, ConfigError> {
        if minimum > maximum {
            return Err(ConfigError::InvalidBounds { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// Returns the earliest selectable date
    pub const fn minimum(&self) -> CalendarDate {
        self.minimum
    }

    /// Returns the latest selectable date
    pub const fn maximum(&self) -> CalendarDate {
        self.maximum
    }

    /// Returns both ends as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.minimum, self.maximum)
    }

    /// Checks if the window contains a given date (inclusive on both ends)
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.minimum <= date && date <= self.maximum
    }
}

impl FromStr for DateBounds {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 interval format: use RANGE_SEPARATOR to separate min/max
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(ConfigError::InvalidFormat(format!(
                "No bounds separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                // SAFETY: We just verified separator_count == 1, so find() must succeed
                let pos = trimmed.find(RANGE_SEPARATOR).ok_or_else(|| {
                    ConfigError::InvalidFormat(format!(
                        "Separator '{RANGE_SEPARATOR}' not found despite count == 1"
                    ))
                })?;
                let minimum_str = trimmed[..pos].trim();
                let maximum_str = trimmed[pos + 1..].trim();

                let minimum = minimum_str.parse::<CalendarDate>()?;
                let maximum = maximum_str.parse::<CalendarDate>()?;

                Self::new(minimum, maximum)
            }
            _ => Err(ConfigError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for DateBounds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateBounds {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare minimums first, then maximums
        match self.minimum.cmp(&other.minimum) {
            Ordering::Equal => self.maximum.cmp(&other.maximum),
            ord => ord,
        }
    }
}

impl Serialize for DateBounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
