//! Ranch water-use reporting

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::ranch::{Ranch, RanchService};
use crate::error::{AppError, AppResult};
use shared::{bucket_history_by_day, weekday_name, DateRange, DayBucket, Dated};

#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// One history record as it appears in a ranch report
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReportHistoryRow {
    pub history_id: Uuid,
    pub date: NaiveDate,
    pub set_number: i32,
    pub block_id: Uuid,
    pub block_name: String,
    pub variety: String,
    pub well_name: Option<String>,
    pub minutes_irrigated: Decimal,
    pub gallons_used: Decimal,
    pub acre_feet_used: Decimal,
}

impl Dated for ReportHistoryRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Flat CSV line of a report
#[derive(Debug, Serialize)]
pub struct ReportCsvRow {
    pub date: NaiveDate,
    pub day: String,
    pub set_number: i32,
    pub block_name: String,
    pub variety: String,
    pub well_name: Option<String>,
    pub minutes_irrigated: Decimal,
    pub gallons_used: Decimal,
    pub acre_feet_used: Decimal,
}

impl From<&ReportHistoryRow> for ReportCsvRow {
    fn from(row: &ReportHistoryRow) -> Self {
        ReportCsvRow {
            date: row.date,
            day: weekday_name(row.date),
            set_number: row.set_number,
            block_name: row.block_name.clone(),
            variety: row.variety.clone(),
            well_name: row.well_name.clone(),
            minutes_irrigated: row.minutes_irrigated,
            gallons_used: row.gallons_used,
            acre_feet_used: row.acre_feet_used,
        }
    }
}

/// Day-bucketed report for a ranch
#[derive(Debug, Serialize)]
pub struct RanchReport {
    pub ranch: Ranch,
    pub range: DateRange,
    pub days: Vec<DayBucket<ReportHistoryRow>>,
    pub total_gallons: Decimal,
    pub total_acre_feet: Decimal,
}

impl RanchReport {
    /// Report lines in bucket order
    pub fn csv_rows(&self) -> Vec<ReportCsvRow> {
        self.days
            .iter()
            .flat_map(|bucket| bucket.histories.iter().map(ReportCsvRow::from))
            .collect()
    }
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// History of a ranch over `range`, grouped by day
    pub async fn get_ranch_report(&self, ranch_id: Uuid, range: DateRange) -> AppResult<RanchReport> {
        shared::validate_date_range(&range).map_err(|msg| AppError::validation("from", msg))?;

        let ranch = RanchService::new(self.db.clone())
            .get_ranch(ranch_id)
            .await?;

        let rows = sqlx::query_as::<_, ReportHistoryRow>(
            r#"
            SELECT h.id AS history_id, h.date, s.number AS set_number, b.id AS block_id,
                   b.name AS block_name, b.variety, w.name AS well_name,
                   h.minutes_irrigated, h.gallons_used, h.acre_feet_used
            FROM irrigation_histories h
            JOIN blocks b ON b.id = h.block_id
            JOIN irrigation_sets s ON s.id = b.set_id
            LEFT JOIN wells w ON w.id = h.well_id
            WHERE s.ranch_id = $1 AND h.date BETWEEN $2 AND $3
            ORDER BY h.date ASC, s.number ASC, b.name ASC
            "#,
        )
        .bind(ranch_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        let total_gallons: Decimal = rows.iter().map(|r| r.gallons_used).sum();
        let total_acre_feet: Decimal = rows.iter().map(|r| r.acre_feet_used).sum();
        let days = bucket_history_by_day(rows, range).collect();

        Ok(RanchReport {
            ranch,
            range,
            days,
            total_gallons,
            total_acre_feet,
        })
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: NaiveDate, set_number: i32, block_name: &str) -> ReportHistoryRow {
        ReportHistoryRow {
            history_id: Uuid::new_v4(),
            date,
            set_number,
            block_id: Uuid::new_v4(),
            block_name: block_name.to_string(),
            variety: "Nonpareil".to_string(),
            well_name: None,
            minutes_irrigated: Decimal::from(60),
            gallons_used: Decimal::from(3000),
            acre_feet_used: Decimal::new(1105, 7),
        }
    }

    #[test]
    fn test_csv_export_has_weekday_column() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let rows = vec![ReportCsvRow::from(&row(date, 1, "North 40"))];

        let csv = ReportingService::export_to_csv(&rows).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("date,day,set_number,block_name,variety,well_name,minutes_irrigated,gallons_used,acre_feet_used")
        );
        assert_eq!(
            lines.next(),
            Some("2024-07-15,Monday,1,North 40,Nonpareil,,60,3000,0.0001105")
        );
    }

    #[test]
    fn test_csv_rows_follow_bucket_order() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 7, d).unwrap();
        let range = DateRange::new(day(14), day(16));
        let rows = vec![row(day(16), 1, "A"), row(day(15), 1, "B"), row(day(15), 2, "C")];

        let report = RanchReport {
            ranch: Ranch {
                id: Uuid::nil(),
                name: "Home".to_string(),
                allocation: Decimal::from(100),
                created_at: chrono::Utc::now(),
            },
            range,
            days: bucket_history_by_day(rows, range).collect(),
            total_gallons: Decimal::ZERO,
            total_acre_feet: Decimal::ZERO,
        };

        let names: Vec<_> = report.csv_rows().into_iter().map(|r| r.block_name).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
