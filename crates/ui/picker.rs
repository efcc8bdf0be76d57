use chrono::{Duration, NaiveDate};
use rental::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Start,
    End,
}

/// Date range selection limited to the loaded data.
///
/// Invariant: `bounds.start <= range.start <= range.end <= bounds.end`.
#[derive(Debug, Clone)]
pub struct RangePicker {
    bounds: DateRange,
    range: DateRange,
    focus: Focus,
}

impl RangePicker {
    pub fn new(bounds: DateRange, initial: DateRange) -> Self {
        let mut range = initial.clamp_to(&bounds);
        if range.is_inverted() {
            range = DateRange::new(range.end, range.start);
        }
        RangePicker {
            bounds,
            range,
            focus: Focus::Start,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn bounds(&self) -> DateRange {
        self.bounds
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Start => Focus::End,
            Focus::End => Focus::Start,
        };
    }

    /// Moves the focused end by `days`. Returns whether the range changed.
    pub fn shift(&mut self, days: i64) -> bool {
        let before = self.range;
        match self.focus {
            Focus::Start => {
                self.range.start = clamp(
                    offset(self.range.start, days),
                    self.bounds.start,
                    self.range.end,
                );
            }
            Focus::End => {
                self.range.end = clamp(
                    offset(self.range.end, days),
                    self.range.start,
                    self.bounds.end,
                );
            }
        }
        before != self.range
    }

    /// Back to the full data range. Returns whether the range changed.
    pub fn reset(&mut self) -> bool {
        let before = self.range;
        self.range = self.bounds;
        before != self.range
    }
}

fn offset(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .unwrap_or(date)
}

fn clamp(date: NaiveDate, low: NaiveDate, high: NaiveDate) -> NaiveDate {
    date.max(low).min(high)
}
