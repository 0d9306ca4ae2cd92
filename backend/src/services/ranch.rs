//! Ranch management service for ranches, irrigation sets and allocation status

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::block::{BlockRecord, BlockService};
use crate::error::{AppError, AppResult};
use crate::models::AllocationStatus;

/// Ranch service for managing ranches and their irrigation sets
#[derive(Clone)]
pub struct RanchService {
    db: PgPool,
}

/// Ranch information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ranch {
    pub id: Uuid,
    pub name: String,
    pub allocation: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Irrigation set information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IrrigationSet {
    pub id: Uuid,
    pub ranch_id: Uuid,
    pub number: i32,
    pub created_at: DateTime<Utc>,
}

/// Ranch with its sets and blocks
#[derive(Debug, Clone, Serialize)]
pub struct RanchDetail {
    #[serde(flatten)]
    pub ranch: Ranch,
    pub sets: Vec<IrrigationSet>,
    pub blocks: Vec<BlockRecord>,
}

/// Meter reading line in an allocation summary
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AllocationReading {
    pub id: Uuid,
    pub well_id: Option<Uuid>,
    pub date: NaiveDate,
    pub gallons: Option<Decimal>,
    pub acre_feet: Option<Decimal>,
}

/// Allocation status with the readings it was computed from
#[derive(Debug, Clone, Serialize)]
pub struct RanchAllocation {
    pub ranch: Ranch,
    #[serde(flatten)]
    pub status: AllocationStatus,
    pub readings: Vec<AllocationReading>,
}

/// Input for creating a ranch
#[derive(Debug, Deserialize)]
pub struct CreateRanchInput {
    pub name: String,
    pub allocation: Decimal,
}

/// Input for creating an irrigation set
#[derive(Debug, Deserialize)]
pub struct CreateSetInput {
    pub number: i32,
}

impl RanchService {
    /// Create a new RanchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all ranches
    pub async fn get_ranches(&self) -> AppResult<Vec<Ranch>> {
        let ranches = sqlx::query_as::<_, Ranch>(
            r#"
            SELECT id, name, allocation, created_at
            FROM ranches
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(ranches)
    }

    /// Get a ranch by ID
    pub async fn get_ranch(&self, ranch_id: Uuid) -> AppResult<Ranch> {
        sqlx::query_as::<_, Ranch>(
            "SELECT id, name, allocation, created_at FROM ranches WHERE id = $1",
        )
        .bind(ranch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ranch".to_string()))
    }

    /// Get a ranch with its sets and blocks
    pub async fn get_ranch_detail(&self, ranch_id: Uuid) -> AppResult<RanchDetail> {
        let ranch = self.get_ranch(ranch_id).await?;
        let sets = self.get_sets(ranch_id).await?;
        let blocks = BlockService::new(self.db.clone())
            .get_blocks(ranch_id)
            .await?;

        Ok(RanchDetail {
            ranch,
            sets,
            blocks,
        })
    }

    /// Create a new ranch
    pub async fn create_ranch(&self, input: CreateRanchInput) -> AppResult<Ranch> {
        shared::validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        shared::validate_allocation(input.allocation)
            .map_err(|msg| AppError::validation("allocation", msg))?;

        let ranch = sqlx::query_as::<_, Ranch>(
            r#"
            INSERT INTO ranches (name, allocation)
            VALUES ($1, $2)
            RETURNING id, name, allocation, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.allocation)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(ranch_id = %ranch.id, name = %ranch.name, "Ranch created");

        Ok(ranch)
    }

    /// Get the irrigation sets of a ranch
    pub async fn get_sets(&self, ranch_id: Uuid) -> AppResult<Vec<IrrigationSet>> {
        let sets = sqlx::query_as::<_, IrrigationSet>(
            r#"
            SELECT id, ranch_id, number, created_at
            FROM irrigation_sets
            WHERE ranch_id = $1
            ORDER BY number ASC
            "#,
        )
        .bind(ranch_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sets)
    }

    /// Create an irrigation set on a ranch
    pub async fn create_set(
        &self,
        ranch_id: Uuid,
        input: CreateSetInput,
    ) -> AppResult<IrrigationSet> {
        shared::validate_set_number(input.number)
            .map_err(|msg| AppError::validation("number", msg))?;

        // Ensure ranch exists
        self.get_ranch(ranch_id).await?;

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM irrigation_sets WHERE ranch_id = $1 AND number = $2",
        )
        .bind(ranch_id)
        .bind(input.number)
        .fetch_one(&self.db)
        .await?;

        if duplicate > 0 {
            return Err(AppError::Conflict {
                resource: "irrigation_set".to_string(),
                message: format!("Set {} already exists on this ranch", input.number),
            });
        }

        let set = sqlx::query_as::<_, IrrigationSet>(
            r#"
            INSERT INTO irrigation_sets (ranch_id, number)
            VALUES ($1, $2)
            RETURNING id, ranch_id, number, created_at
            "#,
        )
        .bind(ranch_id)
        .bind(input.number)
        .fetch_one(&self.db)
        .await?;

        Ok(set)
    }

    /// Total metered usage against the ranch's allocation
    pub async fn get_allocation_status(&self, ranch_id: Uuid) -> AppResult<RanchAllocation> {
        let ranch = self.get_ranch(ranch_id).await?;

        let readings = sqlx::query_as::<_, AllocationReading>(
            r#"
            SELECT id, well_id, date, gallons, acre_feet
            FROM water_meter_readings
            WHERE ranch_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(ranch_id)
        .fetch_all(&self.db)
        .await?;

        let status = AllocationStatus::from_readings(
            ranch.allocation,
            readings.iter().map(|r| (r.gallons, r.acre_feet)),
        );

        Ok(RanchAllocation {
            ranch,
            status,
            readings,
        })
    }
}
