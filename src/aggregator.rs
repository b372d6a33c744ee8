use std::collections::HashMap;

use crate::classifier::Counts;
use crate::date::LogDate;

/// Running totals for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: String,
    pub weekday_name: &'static str,
    pub counts: Counts,
}

/// Per-day totals keyed by canonical date. Records may arrive in any order.
#[derive(Debug, Default)]
pub struct DailyAggregator {
    buckets: HashMap<String, DayBucket>,
}

impl DailyAggregator {
    pub fn new() -> DailyAggregator {
        DailyAggregator::default()
    }

    /// Adds one record's counts to its day, creating the day on first sight. Every call
    /// counts; the same record absorbed twice is counted twice.
    pub fn absorb(&mut self, date: &LogDate, counts: Counts) {
        let key = date.canonical();
        let bucket = self
            .buckets
            .entry(key.clone())
            .or_insert_with(|| DayBucket {
                date: key,
                weekday_name: date.weekday_name(),
                counts: Counts::default(),
            });
        bucket.counts += counts;
    }

    /// Folds another aggregator into this one by summing matching days.
    pub fn merge(&mut self, other: DailyAggregator) {
        for (key, theirs) in other.buckets {
            match self.buckets.get_mut(&key) {
                Some(ours) => ours.counts += theirs.counts,
                None => {
                    self.buckets.insert(key, theirs);
                }
            }
        }
    }

    pub fn get(&self, canonical_date: &str) -> Option<&DayBucket> {
        self.buckets.get(canonical_date)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_buckets(self) -> Vec<DayBucket> {
        self.buckets.into_iter().map(|(_, bucket)| bucket).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> LogDate {
        LogDate::new(NaiveDate::from_ymd_opt(2019, 2, d).unwrap())
    }

    fn hit(effective: u64, route: u64, diagram: u64, fare: u64) -> Counts {
        Counts {
            effective,
            route,
            diagram,
            fare,
        }
    }

    #[test]
    fn first_record_creates_bucket() {
        let mut aggregator = DailyAggregator::new();
        aggregator.absorb(&day(3), hit(1, 1, 0, 0));

        let bucket = aggregator.get("2019/02/03").unwrap();
        assert_eq!("2019/02/03", bucket.date);
        assert_eq!("日曜日", bucket.weekday_name);
        assert_eq!(hit(1, 1, 0, 0), bucket.counts);
    }

    #[test]
    fn zero_counts_still_create_the_day() {
        let mut aggregator = DailyAggregator::new();
        aggregator.absorb(&day(4), Counts::default());

        assert_eq!(1, aggregator.len());
        assert_eq!(Counts::default(), aggregator.get("2019/02/04").unwrap().counts);
    }

    #[test]
    fn repeated_records_are_not_deduplicated() {
        let mut aggregator = DailyAggregator::new();
        aggregator.absorb(&day(5), hit(1, 0, 0, 1));
        aggregator.absorb(&day(5), hit(1, 0, 0, 1));

        assert_eq!(1, aggregator.len());
        assert_eq!(hit(2, 0, 0, 2), aggregator.get("2019/02/05").unwrap().counts);
    }

    #[test]
    fn order_of_records_does_not_matter() {
        let records = vec![
            (day(7), hit(1, 1, 0, 0)),
            (day(1), hit(1, 0, 1, 0)),
            (day(7), hit(0, 0, 0, 0)),
            (day(1), hit(1, 0, 0, 1)),
        ];
        let mut forward = DailyAggregator::new();
        for (date, counts) in records.iter() {
            forward.absorb(date, *counts);
        }
        let mut backward = DailyAggregator::new();
        for (date, counts) in records.iter().rev() {
            backward.absorb(date, *counts);
        }

        for key in &["2019/02/01", "2019/02/07"] {
            assert_eq!(forward.get(key), backward.get(key));
        }
    }

    #[test]
    fn merge_sums_matching_days() {
        let mut left = DailyAggregator::new();
        left.absorb(&day(1), hit(1, 1, 0, 0));
        left.absorb(&day(2), hit(1, 0, 0, 0));
        let mut right = DailyAggregator::new();
        right.absorb(&day(2), hit(1, 0, 1, 0));
        right.absorb(&day(3), hit(0, 0, 0, 0));

        left.merge(right);

        assert_eq!(3, left.len());
        assert_eq!(hit(1, 1, 0, 0), left.get("2019/02/01").unwrap().counts);
        assert_eq!(hit(2, 0, 1, 0), left.get("2019/02/02").unwrap().counts);
        assert_eq!("日曜日", left.get("2019/02/03").unwrap().weekday_name);
    }
}
