use serde::{Deserialize, Serialize};

use crate::DateBounds;
use crate::consts::{DAYS_PER_WEEK, WEEKDAY_ROW_ITEMS};
use crate::prelude::*;
use crate::types::{CalendarDate, FirstDayOfWeek, days_in_month, month_ordinal, weekday_index};

/// (section, item) coordinate into the flattened day grid.
///
/// Sections index months starting from the month containing the window's
/// minimum date. Items index a row-major 7-wide grid within the section:
/// a weekday-label row, then blank padding, then day cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display(fmt = "{section}:{item}")]
pub struct GridPosition {
    pub section: usize,
    pub item: usize,
}

impl GridPosition {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Number of month sections spanned by the window: the count of distinct
/// (year, month) pairs intersecting it. Section 0 is the month containing
/// the minimum date even when that date is not the 1st.
pub fn section_count(bounds: &DateBounds) -> usize {
    let first = bounds.minimum();
    let last = bounds.maximum();
    let span = month_ordinal(last.year(), last.month()) - month_ordinal(first.year(), first.month());
    span as usize + 1
}

/// One month's worth of grid layout: a 7-cell weekday-label row, then
/// `leading_blanks` padding cells aligning the 1st under its weekday column,
/// then one cell per day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: CalendarDate,
    leading_blanks: usize,
    days: usize,
}

impl MonthGrid {
    /// Lays out the month containing `date`.
    pub fn new(date: CalendarDate, first_day: FirstDayOfWeek) -> Self {
        let first = date.first_of_month();
        let leading_blanks = usize::from(weekday_index(first, first_day)) - 1;
        let days = usize::from(days_in_month(first.year(), first.month()));
        Self {
            first,
            leading_blanks,
            days,
        }
    }

    /// Lays out the given section of the window, or `None` if `section`
    /// is past the last month.
    pub fn for_section(
        bounds: &DateBounds,
        section: usize,
        first_day: FirstDayOfWeek,
    ) -> Option<Self> {
        if section >= section_count(bounds) {
            return None;
        }
        let months = u32::try_from(section).ok()?;
        let first = bounds.minimum().first_of_month().add_months(months)?;
        Some(Self::new(first, first_day))
    }

    /// The 1st of this section's month
    pub const fn first(&self) -> CalendarDate {
        self.first
    }

    /// Blank padding cells between the weekday row and the 1st
    pub const fn leading_blanks(&self) -> usize {
        self.leading_blanks
    }

    /// Days in this section's month
    pub const fn day_count(&self) -> usize {
        self.days
    }

    /// Total cells in this section
    pub const fn item_count(&self) -> usize {
        WEEKDAY_ROW_ITEMS + self.leading_blanks + self.days
    }

    /// Item index of the month's first day cell
    pub const fn day_grid_start(&self) -> usize {
        WEEKDAY_ROW_ITEMS + self.leading_blanks
    }

    /// True if `item` falls in the leading weekday-label row
    pub const fn is_weekday_label(item: usize) -> bool {
        item < WEEKDAY_ROW_ITEMS
    }

    /// True if `item` falls in the blank padding region
    pub const fn is_blank(&self, item: usize) -> bool {
        item >= WEEKDAY_ROW_ITEMS && item < self.day_grid_start()
    }

    /// The date a day cell represents; `None` for the weekday-label row,
    /// blank padding, and out-of-range items.
    pub fn date_for_item(&self, item: usize) -> Option<CalendarDate> {
        if item < self.day_grid_start() || item >= self.item_count() {
            return None;
        }
        let day = (item - self.day_grid_start() + 1) as u8;
        CalendarDate::new(self.first.year(), self.first.month(), day).ok()
    }

    /// Inverse of `date_for_item` for dates within this section's month.
    pub fn item_for_date(&self, date: CalendarDate) -> Option<usize> {
        if date.first_of_month() != self.first {
            return None;
        }
        Some(self.day_grid_start() + usize::from(date.day()) - 1)
    }

    /// Column of `item` within its 7-wide row
    pub const fn column(item: usize) -> usize {
        item % DAYS_PER_WEEK
    }

    /// True if `item` sits in the leftmost grid column
    pub const fn is_left_edge(item: usize) -> bool {
        Self::column(item) == 0
    }

    /// True if `item` sits in the rightmost grid column
    pub const fn is_right_edge(item: usize) -> bool {
        Self::column(item) == DAYS_PER_WEEK - 1
    }
}

/// Resolves a grid position to the date its cell represents, if any.
pub fn date_at(
    bounds: &DateBounds,
    position: GridPosition,
    first_day: FirstDayOfWeek,
) -> Option<CalendarDate> {
    MonthGrid::for_section(bounds, position.section, first_day)?.date_for_item(position.item)
}

/// Maps a date to its grid position. Covers every date whose month is one
/// of the window's sections, including dates outside the selectable window
/// itself (their cells still exist, just unselectable).
pub fn position_for_date(
    bounds: &DateBounds,
    date: CalendarDate,
    first_day: FirstDayOfWeek,
) -> Option<GridPosition> {
    let first = bounds.minimum();
    let section = month_ordinal(date.year(), date.month())
        .checked_sub(month_ordinal(first.year(), first.month()))? as usize;
    if section >= section_count(bounds) {
        return None;
    }
    let grid = MonthGrid::for_section(bounds, section, first_day)?;
    let item = grid.item_for_date(date)?;
    Some(GridPosition::new(section, item))
}
