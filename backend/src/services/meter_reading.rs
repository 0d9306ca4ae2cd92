//! Water meter reading service

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::well::WellService;
use crate::error::{AppError, AppResult};
use crate::models::WaterMeterReading;
use shared::{convert_volume, resolve_numeric, NumericInput};

#[derive(Clone)]
pub struct MeterReadingService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ReadingRow {
    id: Uuid,
    ranch_id: Uuid,
    well_id: Option<Uuid>,
    date: NaiveDate,
    gallons: Option<Decimal>,
    acre_feet: Option<Decimal>,
}

impl From<ReadingRow> for WaterMeterReading {
    fn from(row: ReadingRow) -> Self {
        WaterMeterReading {
            id: row.id,
            ranch_id: row.ranch_id,
            well_id: row.well_id,
            date: row.date,
            gallons: row.gallons,
            acre_feet: row.acre_feet,
        }
    }
}

/// Input for recording a meter reading; either volume may be omitted
#[derive(Debug, Deserialize)]
pub struct CreateMeterReadingInput {
    pub ranch_id: Uuid,
    pub well_id: Option<Uuid>,
    pub date: NaiveDate,
    pub gallons: Option<NumericInput>,
    pub acre_feet: Option<NumericInput>,
}

impl MeterReadingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a reading, filling in the missing volume from the other
    pub async fn create_reading(
        &self,
        input: CreateMeterReadingInput,
    ) -> AppResult<WaterMeterReading> {
        let gallons = resolve_numeric(&input.gallons, "gallons")?;
        let acre_feet = resolve_numeric(&input.acre_feet, "acre_feet")?;
        let volume = convert_volume(gallons, acre_feet)?;

        if volume.gallons.is_sign_negative() && !volume.gallons.is_zero() {
            return Err(AppError::validation("gallons", "Volume cannot be negative"));
        }
        if volume.acre_feet.is_sign_negative() && !volume.acre_feet.is_zero() {
            return Err(AppError::validation("acre_feet", "Volume cannot be negative"));
        }

        let ranch_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ranches WHERE id = $1")
                .bind(input.ranch_id)
                .fetch_one(&self.db)
                .await?;
        if ranch_exists == 0 {
            return Err(AppError::NotFound("Ranch".to_string()));
        }
        WellService::new(self.db.clone())
            .ensure_on_ranch(input.ranch_id, input.well_id)
            .await?;

        let reading = sqlx::query_as::<_, ReadingRow>(
            r#"
            INSERT INTO water_meter_readings (ranch_id, well_id, date, gallons, acre_feet)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, ranch_id, well_id, date, gallons, acre_feet
            "#,
        )
        .bind(input.ranch_id)
        .bind(input.well_id)
        .bind(input.date)
        .bind(volume.gallons)
        .bind(volume.acre_feet)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            reading_id = %reading.id,
            ranch_id = %reading.ranch_id,
            gallons = %volume.gallons,
            acre_feet = %volume.acre_feet,
            "Meter reading recorded"
        );

        Ok(reading.into())
    }

    /// Readings of a ranch, newest first
    pub async fn get_readings(&self, ranch_id: Uuid) -> AppResult<Vec<WaterMeterReading>> {
        let readings = sqlx::query_as::<_, ReadingRow>(
            r#"
            SELECT id, ranch_id, well_id, date, gallons, acre_feet
            FROM water_meter_readings
            WHERE ranch_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(ranch_id)
        .fetch_all(&self.db)
        .await?;

        Ok(readings.into_iter().map(WaterMeterReading::from).collect())
    }
}
