//! Tests for day-bucketed ranch reports

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{bucket_history_by_day, DateRange, IrrigationHistory, WeeklyUsage};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn history(date: NaiveDate, block_id: Uuid, gallons: i64) -> IrrigationHistory {
    let gallons_used = Decimal::from(gallons);
    IrrigationHistory {
        id: Uuid::new_v4(),
        block_id,
        well_id: None,
        date,
        minutes_irrigated: gallons_used / Decimal::from(50),
        gallons_used,
        acre_feet_used: gallons_used / Decimal::from(27154),
        days_between_irrigations: None,
        interval_between_irrigations: Some(3),
    }
}

mod buckets {
    use super::*;

    #[test]
    fn records_grouped_by_day_with_weekday() {
        let (set1, set2) = (Uuid::new_v4(), Uuid::new_v4());
        let records = vec![
            history(date(2024, 7, 15), set1, 1000),
            history(date(2024, 7, 15), set2, 2000),
            history(date(2024, 7, 17), set1, 3000),
        ];
        let range = DateRange::new(date(2024, 7, 14), date(2024, 7, 21));

        let buckets: Vec<_> = bucket_history_by_day(records, range).collect();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].day, "Monday");
        assert_eq!(buckets[0].histories.len(), 2);
        assert_eq!(buckets[0].histories[0].block_id, set1);
        assert_eq!(buckets[0].histories[1].block_id, set2);
        assert_eq!(buckets[1].day, "Wednesday");
    }

    #[test]
    fn default_range_covers_last_week() {
        let today = date(2024, 7, 21);
        let range = DateRange::trailing_days(today, 7);
        let records = vec![
            history(date(2024, 7, 13), Uuid::nil(), 10), // eight days ago
            history(date(2024, 7, 14), Uuid::nil(), 20),
            history(today, Uuid::nil(), 30),
        ];

        let buckets: Vec<_> = bucket_history_by_day(records, range).collect();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, date(2024, 7, 14));
    }

    #[test]
    fn empty_history_produces_no_buckets() {
        let range = DateRange::trailing_days(date(2024, 7, 21), 7);
        let buckets = bucket_history_by_day(Vec::<IrrigationHistory>::new(), range);

        assert_eq!(buckets.count(), 0);
    }

    #[test]
    fn weekly_usage_runs_monday_to_sunday() {
        let records = vec![
            history(date(2024, 7, 15), Uuid::nil(), 27154),
            history(date(2024, 7, 21), Uuid::nil(), 27154),
            history(date(2024, 7, 22), Uuid::nil(), 27154),
        ];

        let usage = WeeklyUsage::for_week(date(2024, 7, 21), &records);

        assert_eq!(usage.week, DateRange::new(date(2024, 7, 15), date(2024, 7, 21)));
        assert_eq!(usage.total_acre_feet, Decimal::from(2));
    }
}

mod properties {
    use super::*;

    proptest! {
        /// Buckets are non-empty, strictly ascending and lose no in-range record
        #[test]
        fn prop_buckets_ascending_and_complete(offsets in prop::collection::vec(0u64..30, 0..60)) {
            let start = date(2024, 6, 1);
            let range = DateRange::new(
                start.checked_add_days(Days::new(5)).unwrap(),
                start.checked_add_days(Days::new(20)).unwrap(),
            );
            let records: Vec<_> = offsets
                .iter()
                .map(|&offset| history(start.checked_add_days(Days::new(offset)).unwrap(), Uuid::nil(), 100))
                .collect();
            let expected = records.iter().filter(|r| range.contains(r.date)).count();

            let buckets: Vec<_> = bucket_history_by_day(records, range).collect();

            prop_assert!(buckets.iter().all(|b| !b.histories.is_empty()));
            prop_assert!(buckets.windows(2).all(|w| w[0].date < w[1].date));
            prop_assert!(buckets.iter().all(|b| b.histories.iter().all(|h| h.date == b.date)));
            prop_assert_eq!(buckets.iter().map(|b| b.histories.len()).sum::<usize>(), expected);
        }
    }
}
