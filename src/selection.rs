use std::collections::BTreeSet;
use std::ops::Bound::Excluded;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CalendarDate;

/// Whether a picker session collects one date or a start/end pair.
/// Fixed for the lifetime of a configuration; reconfiguring resets selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    #[default]
    Range,
}

/// The dates picked so far.
///
/// Invariant: the end date is only ever set together with a start date no
/// later than it, and with no disabled date strictly between the two. The
/// tap state machine enforces this at selection time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    start: Option<CalendarDate>,
    end: Option<CalendarDate>,
}

impl Selection {
    /// Returns the selected start date, if any
    pub const fn start(&self) -> Option<CalendarDate> {
        self.start
    }

    /// Returns the selected end date, if any
    pub const fn end(&self) -> Option<CalendarDate> {
        self.end
    }

    /// True if nothing is selected
    pub const fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// True if both endpoints are selected
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Discards the selection
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Advances the state machine for a tap on a selectable date.
    ///
    /// The caller has already rejected taps outside the window and taps on
    /// disabled dates. A tap either extends a pending range selection to its
    /// end date, or restarts the selection at the tapped date.
    pub(crate) fn apply_tap(
        &mut self,
        tapped: CalendarDate,
        mode: SelectionMode,
        disabled: &BTreeSet<CalendarDate>,
    ) -> SelectionEvent {
        if let (Some(start), None) = (self.start, self.end) {
            if mode == SelectionMode::Range
                && start <= tapped
                && !span_is_blocked(disabled, start, tapped)
            {
                self.end = Some(tapped);
                debug!(%start, end = %tapped, "range completed");
                return SelectionEvent::EndSelected(tapped);
            }
        }

        // Everything else restarts the selection at the tapped date: the
        // first tap, a tap before the pending start, a blocked span, every
        // tap in single mode, and any tap after a completed range.
        self.start = Some(tapped);
        self.end = None;
        debug!(start = %tapped, "start selected");
        SelectionEvent::StartSelected(tapped)
    }
}

/// True if any disabled date lies strictly between `start` and `end`.
/// The endpoints themselves never block (they were selectable to begin with).
pub(crate) fn span_is_blocked(
    disabled: &BTreeSet<CalendarDate>,
    start: CalendarDate,
    end: CalendarDate,
) -> bool {
    disabled
        .range((Excluded(start), Excluded(end)))
        .next()
        .is_some()
}

/// Notification emitted by a state transition or an explicit commit/cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    StartSelected(CalendarDate),
    EndSelected(CalendarDate),
    Cancelled,
    Completed {
        start: CalendarDate,
        end: CalendarDate,
    },
}

/// Synchronous selection notifications, fired within the picker call that
/// caused them. Commit/cancel notifications have default empty bodies so
/// observers that only track taps implement just the first two.
pub trait SelectionObserver {
    fn on_start_selected(&mut self, date: CalendarDate);
    fn on_end_selected(&mut self, date: CalendarDate);
    fn on_cancelled(&mut self) {}
    fn on_completed(&mut self, start: CalendarDate, end: CalendarDate) {
        let _ = (start, end);
    }
}
