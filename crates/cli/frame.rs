use polars::prelude::*;
use rental::Dashboard;
use ui::data;

fn date_column<'a>(dates: impl Iterator<Item = &'a chrono::NaiveDate>) -> Vec<String> {
    dates.map(|d| d.format("%Y-%m-%d").to_string()).collect()
}

/// Daily orders joined with the daily casual/registered split.
pub fn daily_frame(dashboard: &Dashboard) -> PolarsResult<DataFrame> {
    let orders = &dashboard.daily_orders;
    let comparison = &dashboard.daily_comparison;
    let orders_df = df!(
        "date" => date_column(orders.iter().map(|o| &o.date)),
        "order_count" => orders.iter().map(|o| o.order_count).collect::<Vec<u64>>(),
        "cnt" => orders.iter().map(|o| o.cnt).collect::<Vec<u64>>()
    )?;
    let comparison_df = df!(
        "date" => date_column(comparison.iter().map(|c| &c.date)),
        "casual" => comparison.iter().map(|c| c.casual_total).collect::<Vec<u64>>(),
        "registered" => comparison.iter().map(|c| c.registered_total).collect::<Vec<u64>>()
    )?;

    orders_df
        .lazy()
        .join(
            comparison_df.lazy(),
            [col("date")],
            [col("date")],
            JoinArgs::new(JoinType::Inner),
        )
        .sort(["date"], SortMultipleOptions::default())
        .collect()
}

/// Weekday totals in ranked order.
pub fn weekday_frame(dashboard: &Dashboard) -> PolarsResult<DataFrame> {
    let weekdays = &dashboard.weekdays;
    df!(
        "weekday" => weekdays.iter().map(|w| w.weekday_label).collect::<Vec<&str>>(),
        "cnt" => weekdays.iter().map(|w| w.cnt_total).collect::<Vec<u64>>()
    )
}

pub fn metrics_frame(dashboard: &Dashboard) -> PolarsResult<DataFrame> {
    let metrics = &dashboard.metrics;
    let lines: Vec<data::MetricLine> = data::daily_metrics(metrics)
        .into_iter()
        .chain(data::rider_metrics(metrics))
        .chain(data::weekday_metrics(metrics))
        .collect();
    df!(
        "metric" => lines.iter().map(|m| m.title).collect::<Vec<&str>>(),
        "value" => lines.iter().map(|m| m.value.clone()).collect::<Vec<String>>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rental::{DateRange, Locale, RentalRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dashboard(start: NaiveDate, end: NaiveDate) -> Dashboard {
        let records = vec![
            RentalRecord::new(2, date(2011, 1, 2), 0, 50, 100, 150),
            RentalRecord::new(1, date(2011, 1, 1), 6, 30, 70, 100),
        ];
        Dashboard::build(&records, DateRange::new(start, end), Locale::English).unwrap()
    }

    #[test]
    fn test_daily_frame() {
        let df = daily_frame(&dashboard(date(2011, 1, 1), date(2011, 1, 2))).unwrap();
        println!("{}", df);
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names(),
            &["date", "order_count", "cnt", "casual", "registered"]
        );
        let cnt: Vec<Option<u64>> = df.column("cnt").unwrap().u64().unwrap().into_iter().collect();
        assert_eq!(cnt, vec![Some(100), Some(150)]);
    }

    #[test]
    fn test_weekday_frame_is_ranked() {
        let df = weekday_frame(&dashboard(date(2011, 1, 1), date(2011, 1, 2))).unwrap();
        let labels: Vec<Option<&str>> =
            df.column("weekday").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(labels, vec![Some("Sunday"), Some("Saturday")]);
    }

    #[test]
    fn test_empty_frames() {
        let dash = dashboard(date(2012, 1, 1), date(2012, 1, 31));
        assert_eq!(daily_frame(&dash).unwrap().height(), 0);
        assert_eq!(weekday_frame(&dash).unwrap().height(), 0);
        assert_eq!(metrics_frame(&dash).unwrap().height(), 8);
    }
}
