use chrono::NaiveDate;
use serde::Serialize;

/// One row of the daily rental table.
///
/// `weekday` is kept as the raw integer read from the file; it is only
/// checked against the 0-6 range when weekday totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
    pub instant: i64,
    pub date: NaiveDate,
    pub weekday: i64,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl RentalRecord {
    pub fn new(
        instant: i64,
        date: NaiveDate,
        weekday: i64,
        casual: u64,
        registered: u64,
        cnt: u64,
    ) -> Self {
        RentalRecord {
            instant,
            date,
            weekday,
            casual,
            registered,
            cnt,
        }
    }
}
