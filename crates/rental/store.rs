use crate::error::{RentalError, Result};
use crate::filter::DateRange;
use crate::record::RentalRecord;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Formats tried on `dteday` when the caller supplies none.
pub const DEFAULT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// Every column comes in as text so a bad cell can be reported with its column name.
#[derive(Debug, Deserialize)]
struct RawRecord {
    instant: String,
    dteday: String,
    weekday: String,
    casual: String,
    registered: String,
    cnt: String,
}

impl RawRecord {
    fn into_record<S: AsRef<str>>(self, line: u64, formats: &[S]) -> Result<RentalRecord> {
        let date = parse_date(&self.dteday, formats).ok_or_else(|| {
            RentalError::parse(line, "dteday", format!("unparseable date `{}`", self.dteday))
        })?;
        Ok(RentalRecord::new(
            parse_number(line, "instant", &self.instant)?,
            date,
            parse_number(line, "weekday", &self.weekday)?,
            parse_number(line, "casual", &self.casual)?,
            parse_number(line, "registered", &self.registered)?,
            parse_number(line, "cnt", &self.cnt)?,
        ))
    }
}

fn parse_number<T>(line: u64, column: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| RentalError::parse(line, column, format!("`{}`: {}", value, e)))
}

/// Parses a date cell, trying `formats` first and then full timestamps,
/// which are truncated to their calendar day.
pub fn parse_date<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDate> {
    let value = value.trim();
    let found = if formats.is_empty() {
        DEFAULT_DATE_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
    } else {
        formats
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(value, f.as_ref()).ok())
    };
    found.or_else(|| {
        DATETIME_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
            .map(|dt| dt.date())
    })
}

/// In-memory copy of the daily table, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<RentalRecord>,
}

impl RecordStore {
    /// Reads CSV rows in file order. Columns other than the six used here are ignored.
    pub fn load<R: Read, S: AsRef<str>>(reader: R, date_formats: &[S]) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<RawRecord>().enumerate() {
            // header is line 1
            let line = idx as u64 + 2;
            let raw = row?;
            records.push(raw.into_record(line, date_formats)?);
        }
        debug!("loaded {} rental rows", records.len());
        Ok(RecordStore { records })
    }

    pub fn from_path<P: AsRef<Path>, S: AsRef<str>>(path: P, date_formats: &[S]) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let store = Self::load(file, date_formats)?;
        match store.bounds() {
            Ok(range) => info!(
                "data source {:?}: {} rows from {} to {}",
                path.as_ref(),
                store.len(),
                range.start,
                range.end
            ),
            Err(_) => info!("data source {:?}: no rows", path.as_ref()),
        }
        Ok(store)
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_date(&self) -> Result<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.date)
            .min()
            .ok_or(RentalError::EmptyDataset)
    }

    pub fn max_date(&self) -> Result<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.date)
            .max()
            .ok_or(RentalError::EmptyDataset)
    }

    /// The full `[min_date, max_date]` range.
    pub fn bounds(&self) -> Result<DateRange> {
        Ok(DateRange::new(self.min_date()?, self.max_date()?))
    }
}
