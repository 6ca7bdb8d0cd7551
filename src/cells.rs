use std::collections::BTreeSet;

use crate::grid::MonthGrid;
use crate::selection::{Selection, SelectionMode};
use crate::{CalendarDate, DateBounds};

/// Visual category of one grid cell, computed fresh per query and never
/// stored. The renderer maps categories to whatever styling it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellCategory {
    /// Cell in the leading weekday-label row
    WeekdayLabel,
    /// Blank padding cell before the month's first day
    Blank,
    /// Date outside the selectable window
    OutOfBounds,
    /// Date in the disabled set
    Disabled,
    /// Date strictly between a completed range's endpoints. The edge flags
    /// mark the grid's outer columns so a renderer can break its continuous
    /// highlight bar at row boundaries.
    InRange { left_edge: bool, right_edge: bool },
    /// The sole selected date: single mode, or a range whose endpoints meet
    SelectedSingle,
    /// Start of a pending or completed range
    SelectedStart,
    /// End of a completed range
    SelectedEnd,
    /// Decorative highlight, independent of selection
    Highlighted,
    /// An ordinary selectable day
    Plain,
}

/// One resolved grid cell: the date it represents, if any, and its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: Option<CalendarDate>,
    pub category: CellCategory,
}

impl GridCell {
    pub(crate) const fn dateless(category: CellCategory) -> Self {
        Self {
            date: None,
            category,
        }
    }
}

/// Read-only view over picker state answering "what is this cell".
/// Queries are pure; calling twice with no intervening mutation yields
/// identical results.
pub(crate) struct GridModel<'a> {
    pub bounds: &'a DateBounds,
    pub disabled: &'a BTreeSet<CalendarDate>,
    pub highlighted: &'a BTreeSet<CalendarDate>,
    pub mode: SelectionMode,
    pub selection: &'a Selection,
}

impl GridModel<'_> {
    pub fn classify(&self, grid: &MonthGrid, item: usize) -> GridCell {
        if MonthGrid::is_weekday_label(item) {
            return GridCell::dateless(CellCategory::WeekdayLabel);
        }
        if grid.is_blank(item) {
            return GridCell::dateless(CellCategory::Blank);
        }
        let Some(date) = grid.date_for_item(item) else {
            // Past the section's last cell; nothing to render
            return GridCell::dateless(CellCategory::Blank);
        };
        GridCell {
            date: Some(date),
            category: self.categorize(date, item),
        }
    }

    // Precedence is significant: the window and disabled set suppress
    // selection rendering even for a date equal to an endpoint.
    fn categorize(&self, date: CalendarDate, item: usize) -> CellCategory {
        if !self.bounds.contains(date) {
            return CellCategory::OutOfBounds;
        }
        if self.disabled.contains(&date) {
            return CellCategory::Disabled;
        }

        let start = self.selection.start();
        let end = self.selection.end();

        if self.mode == SelectionMode::Range {
            if let (Some(start), Some(end)) = (start, end) {
                if start < date && date < end {
                    return CellCategory::InRange {
                        left_edge: MonthGrid::is_left_edge(item),
                        right_edge: MonthGrid::is_right_edge(item),
                    };
                }
            }
        }

        if start == Some(date) {
            return match (self.mode, end) {
                (SelectionMode::Single, _) => CellCategory::SelectedSingle,
                (SelectionMode::Range, None) => CellCategory::SelectedStart,
                (SelectionMode::Range, Some(end)) if end == date => CellCategory::SelectedSingle,
                (SelectionMode::Range, Some(_)) => CellCategory::SelectedStart,
            };
        }
        if end == Some(date) {
            return CellCategory::SelectedEnd;
        }
        if self.highlighted.contains(&date) {
            return CellCategory::Highlighted;
        }
        CellCategory::Plain
    }
}
