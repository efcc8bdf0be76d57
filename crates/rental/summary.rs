//! Per-day and per-weekday summaries of a filtered record set.
//!
//! All functions are pure: they read the slice they are given and build a new
//! table each call. Groups only exist for keys present in the input.

use crate::error::{RentalError, Result};
use crate::record::RentalRecord;
use crate::weekday::{weekday_label, Locale};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub order_count: u64,
    pub cnt: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyComparison {
    pub date: NaiveDate,
    pub order_count: u64,
    pub casual_total: u64,
    pub registered_total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdaySummary {
    pub weekday: u8,
    pub weekday_label: &'static str,
    pub cnt_total: u64,
}

#[derive(Default)]
struct DayGroup {
    instants: HashSet<i64>,
    cnt: u64,
    casual: u64,
    registered: u64,
}

impl DayGroup {
    fn order_count(&self) -> u64 {
        self.instants.len() as u64
    }
}

/// Adds `value` to a running total of `column`, failing instead of wrapping.
pub(crate) fn add_count(total: u64, value: u64, column: &str) -> Result<u64> {
    total
        .checked_add(value)
        .ok_or_else(|| RentalError::Overflow(column.to_string()))
}

fn group_by_date(records: &[RentalRecord]) -> Result<BTreeMap<NaiveDate, DayGroup>> {
    let mut grouped: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();
    for record in records {
        let group = grouped.entry(record.date).or_default();
        group.instants.insert(record.instant);
        group.cnt = add_count(group.cnt, record.cnt, "cnt")?;
        group.casual = add_count(group.casual, record.casual, "casual")?;
        group.registered = add_count(group.registered, record.registered, "registered")?;
    }
    debug!("{} rows grouped into {} days", records.len(), grouped.len());
    Ok(grouped)
}

/// Distinct orders and total rentals per day, ascending by date.
pub fn daily_orders(records: &[RentalRecord]) -> Result<Vec<DailyOrders>> {
    Ok(group_by_date(records)?
        .into_iter()
        .map(|(date, group)| DailyOrders {
            date,
            order_count: group.order_count(),
            cnt: group.cnt,
        })
        .collect())
}

/// Casual and registered totals per day, ascending by date.
pub fn daily_comparison(records: &[RentalRecord]) -> Result<Vec<DailyComparison>> {
    Ok(group_by_date(records)?
        .into_iter()
        .map(|(date, group)| DailyComparison {
            date,
            order_count: group.order_count(),
            casual_total: group.casual,
            registered_total: group.registered,
        })
        .collect())
}

/// Total rentals per weekday present in `records`.
///
/// Rows come out in weekday-number order, but callers must not rely on it;
/// use [`sort_by_count_desc`] for a ranking. Fails on the first weekday value
/// outside 0-6 or on a total that does not fit in `u64`.
pub fn weekday_totals(records: &[RentalRecord], locale: Locale) -> Result<Vec<WeekdaySummary>> {
    let mut grouped: BTreeMap<i64, u64> = BTreeMap::new();
    for record in records {
        let total = grouped.entry(record.weekday).or_insert(0);
        *total = add_count(*total, record.cnt, "cnt")?;
    }

    let mut summary = Vec::with_capacity(grouped.len());
    for (weekday, cnt_total) in grouped {
        let label = weekday_label(weekday, locale)?;
        summary.push(WeekdaySummary {
            weekday: u8::try_from(weekday).map_err(|_| RentalError::UnknownWeekday(weekday))?,
            weekday_label: label,
            cnt_total,
        });
    }
    Ok(summary)
}

/// Ranks by `cnt_total`, highest first. Ties keep their input order.
pub fn sort_by_count_desc(mut summary: Vec<WeekdaySummary>) -> Vec<WeekdaySummary> {
    summary.sort_by(|a, b| b.cnt_total.cmp(&a.cnt_total));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
        use crate::filter::filter_by_date;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_days() -> Vec<RentalRecord> {
        vec![
            RentalRecord::new(1, date(2011, 1, 1), 6, 30, 70, 100),
            RentalRecord::new(2, date(2011, 1, 2), 0, 50, 100, 150),
        ]
    }

    fn two_weeks() -> Vec<RentalRecord> {
        (0..14)
            .map(|i| {
                let d = date(2011, 1, 1) + chrono::Duration::days(i);
                // 2011-01-01 was a Saturday
                let weekday = (i + 6) % 7;
                let cnt = 10 * (i as u64 + 1);
                RentalRecord::new(i + 1, d, weekday, cnt / 4, cnt - cnt / 4, cnt)
            })
            .collect()
    }

    #[test]
    fn test_daily_orders_scenario() {
        let got = daily_orders(&two_days()).unwrap();
        assert_eq!(
            got,
            vec![
                DailyOrders {
                    date: date(2011, 1, 1),
                    order_count: 1,
                    cnt: 100
                },
                DailyOrders {
                    date: date(2011, 1, 2),
                    order_count: 1,
                    cnt: 150
                },
            ]
        );
    }

    #[test]
    fn test_weekday_totals_scenario() {
        let got = weekday_totals(&two_days(), Locale::English).unwrap();
        assert_eq!(got.len(), 2);
        let saturday = got.iter().find(|s| s.weekday_label == "Saturday").unwrap();
        let sunday = got.iter().find(|s| s.weekday_label == "Sunday").unwrap();
        assert_eq!(saturday.cnt_total, 100);
        assert_eq!(sunday.cnt_total, 150);

        let ranked = sort_by_count_desc(got);
        assert_eq!(ranked[0].weekday_label, "Sunday");
        assert_eq!(ranked[0].cnt_total, 150);
        assert_eq!(ranked[1].weekday_label, "Saturday");
        assert_eq!(ranked[1].cnt_total, 100);
    }

    #[test]
    fn test_daily_comparison() {
        let got = daily_comparison(&two_days()).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].casual_total, 30);
        assert_eq!(got[0].registered_total, 70);
        assert_eq!(got[1].date, date(2011, 1, 2));
        assert_eq!(got[1].order_count, 1);
        assert_eq!(got[1].casual_total, 50);
        assert_eq!(got[1].registered_total, 100);
    }

    #[test]
    fn test_daily_groups_multiple_rows_per_day() {
        let records = vec![
            RentalRecord::new(7, date(2011, 1, 2), 0, 1, 2, 3),
            RentalRecord::new(5, date(2011, 1, 1), 6, 4, 5, 9),
            RentalRecord::new(8, date(2011, 1, 2), 0, 10, 20, 30),
            // same instant twice counts once
            RentalRecord::new(8, date(2011, 1, 2), 0, 0, 0, 0),
        ];
        let orders = daily_orders(&records).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].date, date(2011, 1, 1));
        assert_eq!(orders[1].order_count, 2);
        assert_eq!(orders[1].cnt, 33);

        let comparison = daily_comparison(&records).unwrap();
        assert_eq!(comparison[1].casual_total, 11);
        assert_eq!(comparison[1].registered_total, 22);
    }

    #[test]
    fn test_sum_conservation_and_key_coverage() {
        let records = two_weeks();
        for (s, e) in [(0, 13), (3, 9), (5, 5), (12, 20)] {
            let start = date(2011, 1, 1) + chrono::Duration::days(s);
            let end = date(2011, 1, 1) + chrono::Duration::days(e);
            let filtered = filter_by_date(&records, start, end);
            let orders = daily_orders(&filtered).unwrap();

            let total: u64 = orders.iter().map(|o| o.cnt).sum();
            let want: u64 = filtered.iter().map(|r| r.cnt).sum();
            assert_eq!(total, want);

            let got_dates: Vec<NaiveDate> = orders.iter().map(|o| o.date).collect();
            let mut want_dates: Vec<NaiveDate> = filtered.iter().map(|r| r.date).collect();
            want_dates.sort();
            want_dates.dedup();
            assert_eq!(got_dates, want_dates);

            let weekday_total: u64 = weekday_totals(&filtered, Locale::English)
                .unwrap()
                .iter()
                .map(|w| w.cnt_total)
                .sum();
            assert_eq!(weekday_total, want);
        }
    }

    #[test]
    fn test_weekday_totals_only_present_keys() {
        let records = two_weeks();
        let filtered = filter_by_date(&records, date(2011, 1, 3), date(2011, 1, 5));
        let got = weekday_totals(&filtered, Locale::English).unwrap();
        let labels: Vec<&str> = got.iter().map(|w| w.weekday_label).collect();
        assert_eq!(labels, vec!["Monday", "Tuesday", "Wednesday"]);
    }

    #[test]
    fn test_weekday_totals_unknown_weekday() {
        let mut records = two_days();
        records.push(RentalRecord::new(3, date(2011, 1, 3), 7, 1, 1, 2));
        assert!(matches!(
            weekday_totals(&records, Locale::English),
            Err(RentalError::UnknownWeekday(7))
        ));
    }

    #[test]
    fn test_totals_past_u64_fail() {
        let same_day = vec![
            RentalRecord::new(1, date(2011, 1, 1), 6, 1, u64::MAX, u64::MAX),
            RentalRecord::new(2, date(2011, 1, 1), 6, 1, 1, 1),
        ];
        assert!(matches!(
            daily_orders(&same_day),
            Err(RentalError::Overflow(ref column)) if column == "cnt"
        ));
        assert!(matches!(
            daily_comparison(&same_day),
            Err(RentalError::Overflow(_))
        ));

        let same_weekday = vec![
            RentalRecord::new(1, date(2011, 1, 1), 6, 1, 1, u64::MAX),
            RentalRecord::new(2, date(2011, 1, 8), 6, 1, 1, 1),
        ];
        // separate days still fit
        assert_eq!(daily_orders(&same_weekday).unwrap().len(), 2);
        assert!(matches!(
            weekday_totals(&same_weekday, Locale::English),
            Err(RentalError::Overflow(_))
        ));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let summary = vec![
            WeekdaySummary {
                weekday: 1,
                weekday_label: "Monday",
                cnt_total: 5,
            },
            WeekdaySummary {
                weekday: 2,
                weekday_label: "Tuesday",
                cnt_total: 9,
            },
            WeekdaySummary {
                weekday: 3,
                weekday_label: "Wednesday",
                cnt_total: 5,
            },
        ];
        let ranked = sort_by_count_desc(summary);
        let labels: Vec<&str> = ranked.iter().map(|w| w.weekday_label).collect();
        assert_eq!(labels, vec!["Tuesday", "Monday", "Wednesday"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(daily_orders(&[]).unwrap().is_empty());
        assert!(daily_comparison(&[]).unwrap().is_empty());
        assert!(weekday_totals(&[], Locale::English).unwrap().is_empty());
        assert!(sort_by_count_desc(vec![]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let records = two_weeks();
        assert_eq!(daily_orders(&records).unwrap(), daily_orders(&records).unwrap());
        assert_eq!(daily_comparison(&records).unwrap(), daily_comparison(&records).unwrap());
        assert_eq!(
            weekday_totals(&records, Locale::Indonesian).unwrap(),
            weekday_totals(&records, Locale::Indonesian).unwrap()
        );
    }
}
