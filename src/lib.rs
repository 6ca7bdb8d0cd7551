mod bounds;
mod cells;
mod consts;
pub mod grid;
mod picker;
mod prelude;
mod selection;
mod types;

pub use bounds::{ConfigError, DateBounds};
pub use cells::{CellCategory, GridCell};
pub use consts::*;
pub use grid::{GridPosition, MonthGrid};
pub use picker::{PickerConfig, RangePicker};
pub use selection::{Selection, SelectionEvent, SelectionMode, SelectionObserver};
pub use types::{
    CalendarDate, Day, FirstDayOfWeek, Month, Year, days_in_month, is_leap_year, weekday_abbrev,
    weekday_index,
};

use crate::prelude::*;

/// Error type for invalid date components or unparseable date text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}
