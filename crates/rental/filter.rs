use crate::record::RentalRecord;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// Inclusive calendar range. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Pulls both ends into `bounds`, the way a date picker limited to the
    /// loaded data would.
    pub fn clamp_to(&self, bounds: &DateRange) -> DateRange {
        let clamp = |d: NaiveDate| d.max(bounds.start).min(bounds.end);
        DateRange::new(clamp(self.start), clamp(self.end))
    }
}

/// Records with `start <= date <= end`, in their original order.
pub fn filter_by_date(
    records: &[RentalRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<RentalRecord> {
    let range = DateRange::new(start, end);
    let filtered: Vec<RentalRecord> = records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect();
    debug!(
        "filter_by_date {}..={}: {} of {} rows",
        start,
        end,
        filtered.len(),
        records.len()
    );
    filtered
}
