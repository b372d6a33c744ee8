use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::aggregator::DayBucket;
use crate::date::WEEKDAY_NAMES;

/// Effective hits per weekday, Sunday first. Always serialised with all seven keys.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeekdayStat([u64; 7]);

impl WeekdayStat {
    pub fn add(&mut self, weekday_name: &str, count: u64) {
        if let Some(i) = WEEKDAY_NAMES.iter().position(|name| *name == weekday_name) {
            self.0[i] += count;
        }
    }

    pub fn get(&self, weekday_name: &str) -> Option<u64> {
        WEEKDAY_NAMES
            .iter()
            .position(|name| *name == weekday_name)
            .map(|i| self.0[i])
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

impl Serialize for WeekdayStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEKDAY_NAMES.len()))?;
        for (name, count) in WEEKDAY_NAMES.iter().zip(self.0.iter()) {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Monthly summary handed to the output file.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "total_stat")]
    pub total_effective: u64,
    #[serde(rename = "route_stat")]
    pub total_route: u64,
    #[serde(rename = "diagram_stat")]
    pub total_diagram: u64,
    #[serde(rename = "fare_stat")]
    pub total_fare: u64,
    pub weekday_stat: WeekdayStat,
    pub daily_stat: BTreeMap<String, u64>,
}

impl Report {
    /// Builds the summary from the day buckets, in date order.
    pub fn build(mut buckets: Vec<DayBucket>) -> Report {
        buckets.sort_by(|a, b| a.date.cmp(&b.date));

        let mut report = Report::default();
        for bucket in buckets {
            report
                .weekday_stat
                .add(bucket.weekday_name, bucket.counts.effective);
            report.daily_stat.insert(bucket.date, bucket.counts.effective);

            report.total_effective += bucket.counts.effective;
            report.total_route += bucket.counts.route;
            report.total_diagram += bucket.counts.diagram;
            report.total_fare += bucket.counts.fare;
        }
        report
    }

    /// Writes the report as JSON, replacing any earlier file at `path`.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Counts;

    fn bucket(date: &str, weekday_name: &'static str, effective: u64, route: u64) -> DayBucket {
        DayBucket {
            date: date.to_string(),
            weekday_name,
            counts: Counts {
                effective,
                route,
                diagram: 0,
                fare: effective - route,
            },
        }
    }

    #[test]
    fn empty_report_has_every_weekday() {
        let json = serde_json::to_string(&Report::build(vec![])).unwrap();

        assert_eq!(
            "{\"total_stat\":0,\"route_stat\":0,\"diagram_stat\":0,\"fare_stat\":0,\
             \"weekday_stat\":{\"日曜日\":0,\"月曜日\":0,\"火曜日\":0,\"水曜日\":0,\
             \"木曜日\":0,\"金曜日\":0,\"土曜日\":0},\"daily_stat\":{}}",
            json
        );
    }

    #[test]
    fn totals_match_daily_and_weekday_sums() {
        let report = Report::build(vec![
            bucket("2019/02/10", "日曜日", 5, 2),
            bucket("2019/02/03", "日曜日", 4, 1),
            bucket("2019/02/04", "月曜日", 3, 3),
        ]);

        assert_eq!(12, report.total_effective);
        assert_eq!(6, report.total_route);
        assert_eq!(0, report.total_diagram);
        assert_eq!(6, report.total_fare);
        assert_eq!(report.total_effective, report.daily_stat.values().sum::<u64>());
        assert_eq!(report.total_effective, report.weekday_stat.total());
        assert_eq!(Some(9), report.weekday_stat.get("日曜日"));
        assert_eq!(Some(3), report.weekday_stat.get("月曜日"));
        assert_eq!(Some(0), report.weekday_stat.get("土曜日"));
    }

    #[test]
    fn daily_stat_is_in_date_order() {
        let report = Report::build(vec![
            bucket("2019/02/28", "木曜日", 1, 0),
            bucket("2019/02/01", "金曜日", 2, 0),
            bucket("2019/02/14", "木曜日", 0, 0),
        ]);
        let json = serde_json::to_string(&report.daily_stat).unwrap();

        assert_eq!("{\"2019/02/01\":2,\"2019/02/14\":0,\"2019/02/28\":1}", json);
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fukuoka-sp-2.json");
        fs::write(&path, "stale content that is longer than the report").unwrap();

        let report = Report::build(vec![bucket("2019/02/01", "金曜日", 1, 1)]);
        report.write_to(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(1, written["total_stat"]);
        assert_eq!(1, written["weekday_stat"]["金曜日"]);
        assert!(fs::read_to_string(&path).unwrap().contains("金曜日"));
    }
}
