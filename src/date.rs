use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::parser::ParsedLine;

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Weekday labels used as report keys, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日",
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_sunday() as usize]
}

/// Calendar day of an accepted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogDate(NaiveDate);

impl LogDate {
    pub fn new(date: NaiveDate) -> LogDate {
        LogDate(date)
    }

    /// `YYYY/MM/DD`, the aggregation key.
    pub fn canonical(&self) -> String {
        self.0.format("%Y/%m/%d").to_string()
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.0.weekday())
    }
}

/// Parses `DD/Mon/YYYY:HH:MM:SS`, ignoring anything after the first space (the zone
/// offset).
pub fn parse_timestamp(datetime: &str) -> Option<NaiveDateTime> {
    let stamp = datetime.split(' ').next()?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

/// Accepts a record when its timestamp parses and falls in `target_month`.
pub fn accept(parsed: &ParsedLine, target_month: u32) -> Option<LogDate> {
    let timestamp = parse_timestamp(parsed.datetime?)?;
    if timestamp.month() != target_month {
        return None;
    }
    Some(LogDate(timestamp.date()))
}
