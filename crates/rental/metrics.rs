use crate::error::{RentalError, Result};
use crate::filter::{filter_by_date, DateRange};
use crate::record::RentalRecord;
use crate::summary::{
    add_count, daily_comparison, daily_orders, sort_by_count_desc, weekday_totals, DailyComparison,
    DailyOrders, WeekdaySummary,
};
use crate::weekday::Locale;
use log::debug;
use serde::Serialize;

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_rentals: u64,
    /// Last day minus the day before it; `None` with fewer than two days.
    pub day_over_day: Option<i64>,
    pub days: u64,
    pub casual_total: u64,
    pub registered_total: u64,
    /// Casual riders as a fraction of all riders; `None` when there are none.
    pub casual_share: Option<f64>,
    pub busiest: Option<WeekdaySummary>,
    pub quietest: Option<WeekdaySummary>,
}

impl Metrics {
    /// `ranked` must already be ordered by [`sort_by_count_desc`].
    pub fn from_summaries(
        orders: &[DailyOrders],
        comparison: &[DailyComparison],
        ranked: &[WeekdaySummary],
    ) -> Result<Self> {
        let casual_total = sum_counts(comparison.iter().map(|c| c.casual_total), "casual")?;
        let registered_total =
            sum_counts(comparison.iter().map(|c| c.registered_total), "registered")?;
        let riders = casual_total as f64 + registered_total as f64;

        Ok(Metrics {
            total_rentals: sum_counts(orders.iter().map(|o| o.cnt), "cnt")?,
            day_over_day: day_over_day(orders)?,
            days: sum_counts(orders.iter().map(|o| o.order_count), "order_count")?,
            casual_total,
            registered_total,
            casual_share: (riders > 0.0).then(|| casual_total as f64 / riders),
            busiest: ranked.first().cloned(),
            quietest: ranked.last().cloned(),
        })
    }
}

fn sum_counts<I: Iterator<Item = u64>>(mut values: I, column: &str) -> Result<u64> {
    values.try_fold(0, |acc, v| add_count(acc, v, column))
}

fn day_over_day(orders: &[DailyOrders]) -> Result<Option<i64>> {
    match orders {
        [.., previous, last] => {
            let delta = i128::from(last.cnt) - i128::from(previous.cnt);
            i64::try_from(delta)
                .map(Some)
                .map_err(|_| RentalError::Overflow("day_over_day".to_string()))
        }
        _ => Ok(None),
    }
}

/// Everything the presentation layer draws for one date range.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub daily_orders: Vec<DailyOrders>,
    pub daily_comparison: Vec<DailyComparison>,
    /// Weekday totals ranked busiest first.
    pub weekdays: Vec<WeekdaySummary>,
    pub metrics: Metrics,
}

impl Dashboard {
    /// Filters `records` to `range` and recomputes every summary from scratch.
    pub fn build(records: &[RentalRecord], range: DateRange, locale: Locale) -> Result<Self> {
        let filtered = filter_by_date(records, range.start, range.end);
        let daily_orders = daily_orders(&filtered)?;
        let daily_comparison = daily_comparison(&filtered)?;
        let weekdays = sort_by_count_desc(weekday_totals(&filtered, locale)?);
        let metrics = Metrics::from_summaries(&daily_orders, &daily_comparison, &weekdays)?;
        debug!(
            "dashboard {}..={}: {} days, {} rentals",
            range.start, range.end, metrics.days, metrics.total_rentals
        );
        Ok(Dashboard {
            range,
            daily_orders,
            daily_comparison,
            weekdays,
            metrics,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.daily_orders.is_empty()
    }
}
