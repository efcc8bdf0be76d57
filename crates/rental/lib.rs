pub mod error;
pub mod filter;
pub mod metrics;
pub mod record;
pub mod store;
pub mod summary;
pub mod weekday;

pub use error::{RentalError, Result};
pub use filter::{filter_by_date, DateRange};
pub use metrics::{Dashboard, Metrics};
pub use record::RentalRecord;
pub use store::RecordStore;
pub use summary::{
    daily_comparison, daily_orders, sort_by_count_desc, weekday_totals, DailyComparison,
    DailyOrders, WeekdaySummary,
};
pub use weekday::{weekday_label, Locale};
