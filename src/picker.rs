use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cells::{CellCategory, GridCell, GridModel};
use crate::consts::MONTH_NAMES;
use crate::grid::{self, GridPosition, MonthGrid};
use crate::selection::{Selection, SelectionEvent, SelectionMode, SelectionObserver};
use crate::types::{CalendarDate, FirstDayOfWeek, weekday_abbrev};
use crate::{ConfigError, DateBounds};

/// A picker's whole configuration, replaced wholesale by `configure`.
/// Serializes with ISO dates so host applications can keep picker setups
/// in their own config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    pub minimum: CalendarDate,
    pub maximum: CalendarDate,
    #[serde(default)]
    pub disabled_dates: BTreeSet<CalendarDate>,
    #[serde(default)]
    pub highlighted_dates: BTreeSet<CalendarDate>,
    #[serde(default)]
    pub mode: SelectionMode,
    #[serde(default)]
    pub first_day_of_week: FirstDayOfWeek,
}

impl PickerConfig {
    /// A range-mode, Monday-first configuration with no exclusions.
    pub fn new(minimum: CalendarDate, maximum: CalendarDate) -> Self {
        Self {
            minimum,
            maximum,
            disabled_dates: BTreeSet::new(),
            highlighted_dates: BTreeSet::new(),
            mode: SelectionMode::default(),
            first_day_of_week: FirstDayOfWeek::default(),
        }
    }
}

/// The date-range picker core.
///
/// Owns the selection state machine and answers per-cell category queries;
/// everything visual belongs to the renderer driving it. All mutation happens
/// through `&mut self` methods, so category queries can never observe a
/// half-applied transition.
pub struct RangePicker {
    bounds: DateBounds,
    disabled: BTreeSet<CalendarDate>,
    highlighted: BTreeSet<CalendarDate>,
    mode: SelectionMode,
    first_day: FirstDayOfWeek,
    selection: Selection,
    observer: Option<Box<dyn SelectionObserver>>,
}

impl RangePicker {
    /// Creates a picker from a configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBounds` if the configured minimum date
    /// is after the maximum date.
    pub fn new(config: PickerConfig) -> Result<Self, ConfigError> {
        let bounds = DateBounds::new(config.minimum, config.maximum)?;
        debug!(%bounds, mode = ?config.mode, "picker created");
        Ok(Self {
            bounds,
            disabled: config.disabled_dates,
            highlighted: config.highlighted_dates,
            mode: config.mode,
            first_day: config.first_day_of_week,
            selection: Selection::default(),
            observer: None,
        })
    }

    /// Replaces the configuration wholesale and resets the selection.
    /// The registered observer is kept.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBounds` for an inverted window; the
    /// previous configuration stays in effect on error.
    pub fn configure(&mut self, config: PickerConfig) -> Result<(), ConfigError> {
        let bounds = DateBounds::new(config.minimum, config.maximum)?;
        debug!(%bounds, mode = ?config.mode, "picker reconfigured");
        self.bounds = bounds;
        self.disabled = config.disabled_dates;
        self.highlighted = config.highlighted_dates;
        self.mode = config.mode;
        self.first_day = config.first_day_of_week;
        self.selection.clear();
        Ok(())
    }

    /// Registers the observer notified synchronously from `handle_tap`,
    /// `commit`, and `cancel`.
    pub fn set_observer(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observer = Some(observer);
    }

    /// Removes the registered observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// The selectable window
    pub const fn bounds(&self) -> DateBounds {
        self.bounds
    }

    /// The configured selection mode
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// The configured first day of the week
    pub const fn first_day_of_week(&self) -> FirstDayOfWeek {
        self.first_day
    }

    /// The current selection
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected start date, if any
    pub const fn start_date(&self) -> Option<CalendarDate> {
        self.selection.start()
    }

    /// The selected end date, if any
    pub const fn end_date(&self) -> Option<CalendarDate> {
        self.selection.end()
    }

    /// Number of month sections in the grid
    pub fn section_count(&self) -> usize {
        grid::section_count(&self.bounds)
    }

    /// Number of cells in `section`; 0 for a section past the window
    pub fn item_count(&self, section: usize) -> usize {
        self.grid_for_section(section)
            .map_or(0, |grid| grid.item_count())
    }

    /// The date a cell represents, if it is a day cell
    pub fn date_at(&self, position: GridPosition) -> Option<CalendarDate> {
        grid::date_at(&self.bounds, position, self.first_day)
    }

    /// The grid position of a date displayed in any of the window's months
    pub fn position_of(&self, date: CalendarDate) -> Option<GridPosition> {
        grid::position_for_date(&self.bounds, date, self.first_day)
    }

    /// The cell the renderer should bring into view after a selection:
    /// the start cell in single mode, otherwise the end cell falling back
    /// to the start cell. How to scroll there is the renderer's concern.
    pub fn scroll_target(&self) -> Option<GridPosition> {
        let target = match self.mode {
            SelectionMode::Single => self.selection.start(),
            SelectionMode::Range => self.selection.end().or_else(|| self.selection.start()),
        }?;
        self.position_of(target)
    }

    /// Classifies one cell for rendering. Pure read; safe to call once per
    /// visible cell per render pass.
    pub fn category_for_cell(&self, position: GridPosition) -> GridCell {
        let Some(grid) = self.grid_for_section(position.section) else {
            return GridCell::dateless(CellCategory::Blank);
        };
        self.model().classify(&grid, position.item)
    }

    /// Advances the selection state machine for a tap on `position`.
    ///
    /// Taps on weekday-label cells, blank padding, disabled dates, and dates
    /// outside the window are ignored silently. Otherwise the transition's
    /// notification is delivered to the observer within this call, and the
    /// emitted event is returned.
    pub fn handle_tap(&mut self, position: GridPosition) -> Option<SelectionEvent> {
        let Some(date) = self.date_at(position) else {
            trace!(%position, "tap on a dateless cell ignored");
            return None;
        };
        if !self.bounds.contains(date) || self.disabled.contains(&date) {
            trace!(%date, "tap on an unselectable date ignored");
            return None;
        }

        let event = self.selection.apply_tap(date, self.mode, &self.disabled);
        if let Some(observer) = self.observer.as_deref_mut() {
            match event {
                SelectionEvent::StartSelected(date) => observer.on_start_selected(date),
                SelectionEvent::EndSelected(date) => observer.on_end_selected(date),
                SelectionEvent::Cancelled | SelectionEvent::Completed { .. } => {}
            }
        }
        Some(event)
    }

    /// Commits a completed selection, notifying the observer. Returns `None`
    /// without notifying if either endpoint is missing, so hosts gate their
    /// confirm control on completeness.
    pub fn commit(&mut self) -> Option<(CalendarDate, CalendarDate)> {
        let start = self.selection.start()?;
        let end = self.selection.end()?;
        debug!(%start, %end, "selection committed");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_completed(start, end);
        }
        Some((start, end))
    }

    /// Signals that picking was abandoned. The selection itself is left
    /// intact; discarding it is the host's decision.
    pub fn cancel(&mut self) {
        debug!("selection cancelled");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_cancelled();
        }
    }

    /// Section header text, e.g. "January 2024"
    pub fn month_label(&self, section: usize) -> Option<String> {
        let grid = self.grid_for_section(section)?;
        let first = grid.first();
        Some(format!(
            "{} {}",
            MONTH_NAMES[usize::from(first.month())],
            first.year()
        ))
    }

    /// Abbreviated weekday name for a weekday-row position in `1..=7`
    pub fn weekday_label(&self, index: u8) -> Option<&'static str> {
        weekday_abbrev(index, self.first_day)
    }

    fn grid_for_section(&self, section: usize) -> Option<MonthGrid> {
        MonthGrid::for_section(&self.bounds, section, self.first_day)
    }

    fn model(&self) -> GridModel<'_> {
        GridModel {
            bounds: &self.bounds,
            disabled: &self.disabled,
            highlighted: &self.highlighted,
            mode: self.mode,
            selection: &self.selection,
        }
    }
}

impl fmt::Debug for RangePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangePicker")
            .field("bounds", &self.bounds)
            .field("mode", &self.mode)
            .field("first_day", &self.first_day)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
