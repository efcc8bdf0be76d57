use rental::Metrics;
use unicode_width::UnicodeWidthStr;

pub const NOT_AVAILABLE: &str = "n/a";

/// One labelled number in a metrics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    pub title: &'static str,
    pub value: String,
}

impl MetricLine {
    fn new(title: &'static str, value: String) -> Self {
        MetricLine { title, value }
    }

    pub fn render(&self) -> String {
        format!("{}: {}", self.title, self.value)
    }
}

pub fn daily_metrics(metrics: &Metrics) -> Vec<MetricLine> {
    vec![
        MetricLine::new("Total rentals", format_count(metrics.total_rentals)),
        MetricLine::new("vs previous day", format_delta(metrics.day_over_day)),
        MetricLine::new("Days in range", format!("{} days", metrics.days)),
    ]
}

pub fn rider_metrics(metrics: &Metrics) -> Vec<MetricLine> {
    vec![
        MetricLine::new("Casual riders", format_count(metrics.casual_total)),
        MetricLine::new("Registered riders", format_count(metrics.registered_total)),
        MetricLine::new("Casual share", format_share(metrics.casual_share)),
    ]
}

pub fn weekday_metrics(metrics: &Metrics) -> Vec<MetricLine> {
    let describe = |w: &Option<rental::WeekdaySummary>| match w {
        Some(w) => format!("{} ({})", w.weekday_label, format_count(w.cnt_total)),
        None => NOT_AVAILABLE.to_string(),
    };
    vec![
        MetricLine::new("Busiest day", describe(&metrics.busiest)),
        MetricLine::new("Quietest day", describe(&metrics.quietest)),
    ]
}

/// Display width of the widest rendered line, used to size a panel.
pub fn panel_width(items: &[MetricLine]) -> u16 {
    let width = items
        .iter()
        .map(MetricLine::render)
        .map(|s| UnicodeWidthStr::width(s.as_str()))
        .max()
        .unwrap_or(0);
    u16::try_from(width).unwrap_or(u16::MAX)
}

/// `1234567` -> `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_delta(delta: Option<i64>) -> String {
    match delta {
        Some(d) if d >= 0 => format!("+{}", format_count(d as u64)),
        Some(d) => format!("-{}", format_count(d.unsigned_abs())),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_share(share: Option<f64>) -> String {
    match share {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}
