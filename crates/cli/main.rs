mod frame;

use config::Config;
use rental::{Dashboard, DateRange, Locale, RecordStore};

use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use env_logger::Env;
use polars::prelude::*;
use std::error::Error;
use std::fs::File;

use log::{debug, error, info, warn};

enum OutputType {
    CSV,
    TABLE,
    POLAR,
    JSON,
}

impl OutputType {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(OutputType::CSV),
            "table" => Some(OutputType::TABLE),
            "polar" => Some(OutputType::POLAR),
            "json" => Some(OutputType::JSON),
            _ => None,
        }
    }
}

trait Output {
    fn output(&self) -> Result<(), Box<dyn Error>>;
}

struct PolarOutput {
    dashboard: Dashboard,
}

impl PolarOutput {
    fn new(dashboard: Dashboard) -> Self {
        PolarOutput { dashboard }
    }
}

impl Output for PolarOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        let range = self.dashboard.range;
        println!("rentals from {} to {}", range.start, range.end);
        println!("{}", frame::metrics_frame(&self.dashboard)?);
        println!("{}", frame::daily_frame(&self.dashboard)?);
        println!("{}", frame::weekday_frame(&self.dashboard)?);
        Ok(())
    }
}

struct CsvOutput {
    filename: String,
    dashboard: Dashboard,
}

impl CsvOutput {
    fn new(filename: String, dashboard: Dashboard) -> Self {
        CsvOutput {
            filename,
            dashboard,
        }
    }
}

impl Output for CsvOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        let mut df = frame::daily_frame(&self.dashboard)?;
        let mut file = File::create(&self.filename)?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        info!("CSV file written successfully: {}", self.filename);
        Ok(())
    }
}

struct JsonOutput {
    dashboard: Dashboard,
}

impl Output for JsonOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        println!("{}", serde_json::to_string_pretty(&self.dashboard)?);
        Ok(())
    }
}

struct TableOutput {
    store: RecordStore,
    bounds: DateRange,
    range: DateRange,
    locale: Locale,
}

impl Output for TableOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        ui::tui::run(self.store.records(), self.bounds, self.range, self.locale)
    }
}

/// Daily bike rental dashboard
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short = 'F',
        long = "format",
        value_parser = PossibleValuesParser::new(["table", "polar", "csv", "json"]),
        default_value = "table",
        help = "output format"
    )]
    format: String,

    #[arg(short = 'c', long = "config", default_value = config::DEFAULT_CONFIG, help = "yaml config file")]
    config: String,

    #[arg(long = "source", help = "daily rental csv, overrides `source` in config")]
    source: Option<String>,

    #[arg(long = "locale", value_parser = parse_locale, help = "weekday labels, en|id")]
    locale: Option<Locale>,

    /// since date
    #[arg(long = "since", value_parser = parse_date, help = "start date, 2011-01-01")]
    since: Option<NaiveDate>,

    /// until date
    #[arg(long = "until", value_parser = parse_date, help = "end date, 2012-12-31")]
    until: Option<NaiveDate>,

    #[arg(long = "report", help = "csv report file for --format csv")]
    report: Option<String>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        error!("parse date err: {}", e);
        format!("invalid date `{}`, expected YYYY-MM-DD", s)
    })
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse()
}

/// Picks the requested range, filling open ends from the data and keeping
/// both ends inside it.
fn resolve_range(bounds: DateRange, since: Option<NaiveDate>, until: Option<NaiveDate>) -> DateRange {
    let requested = DateRange::new(since.unwrap_or(bounds.start), until.unwrap_or(bounds.end));
    let range = requested.clamp_to(&bounds);
    if range != requested {
        warn!(
            "date range {}..={} clamped to {}..={}",
            requested.start, requested.end, range.start, range.end
        );
    }
    range
}

fn apply_args(mut conf: Config, args: &Args) -> Config {
    if let Some(source) = &args.source {
        conf.source = source.clone();
    }
    if let Some(locale) = args.locale {
        conf.locale = locale;
    }
    if let Some(report) = &args.report {
        conf.report = report.clone();
    }
    conf
}

fn get_output(
    output_type: OutputType,
    store: RecordStore,
    range: DateRange,
    conf: &Config,
) -> Result<Box<dyn Output>, Box<dyn Error>> {
    let locale = conf.locale;
    let output: Box<dyn Output> = match output_type {
        OutputType::TABLE => Box::new(TableOutput {
            bounds: store.bounds()?,
            store,
            range,
            locale,
        }),
        OutputType::CSV => Box::new(CsvOutput::new(
            conf.report.clone(),
            Dashboard::build(store.records(), range, locale)?,
        )),
        OutputType::POLAR => Box::new(PolarOutput::new(Dashboard::build(
            store.records(),
            range,
            locale,
        )?)),
        OutputType::JSON => Box::new(JsonOutput {
            dashboard: Dashboard::build(store.records(), range, locale)?,
        }),
    };
    Ok(output)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let conf = apply_args(Config::load_or_default(&args.config)?, &args);
    debug!("config: {:?}", conf);

    let store = RecordStore::from_path(&conf.source, &conf.date_formats)?;
    // without bounds there is nothing to pick a range from
    let bounds = store.bounds()?;
    let range = resolve_range(bounds, args.since, args.until);
    info!("date range: {} to {}", range.start, range.end);

    let out_type = OutputType::from_str(args.format.as_str()).ok_or("output not match")?;
    get_output(out_type, store, range, &conf)?.output()
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounds() -> DateRange {
        DateRange::new(date(2011, 1, 1), date(2012, 12, 31))
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2011-03-04").unwrap(), date(2011, 3, 4));
        assert!(parse_date("04/03/2011").is_err());
    }

    #[test]
    fn test_resolve_range_defaults_to_bounds() {
        assert_eq!(resolve_range(bounds(), None, None), bounds());
        assert_eq!(
            resolve_range(bounds(), Some(date(2011, 6, 1)), None),
            DateRange::new(date(2011, 6, 1), date(2012, 12, 31))
        );
    }

    #[test]
    fn test_resolve_range_clamps() {
        assert_eq!(
            resolve_range(bounds(), Some(date(2010, 1, 1)), Some(date(2014, 1, 1))),
            bounds()
        );
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "bike-stat",
            "-F",
            "json",
            "--since",
            "2011-02-01",
            "--locale",
            "id",
        ])
        .unwrap();
        assert_eq!(args.format, "json");
        assert_eq!(args.config, ".bike-stat.yml");
        assert_eq!(args.since, Some(date(2011, 2, 1)));
        assert_eq!(args.locale, Some(Locale::Indonesian));

        let conf = apply_args(Config::default(), &args);
        assert_eq!(conf.locale, Locale::Indonesian);
        assert_eq!(conf.source, "main_data.csv");

        assert!(Args::try_parse_from(["bike-stat", "-F", "xml"]).is_err());
        assert!(Args::try_parse_from(["bike-stat", "--until", "tomorrow"]).is_err());
    }
}
