//! Well management service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct WellService {
    db: PgPool,
}

/// Well information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Well {
    pub id: Uuid,
    pub ranch_id: Uuid,
    pub name: String,
    pub gpm: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a well
#[derive(Debug, Deserialize)]
pub struct CreateWellInput {
    pub name: String,
    #[serde(default)]
    pub gpm: Decimal,
}

impl WellService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all wells of a ranch
    pub async fn get_wells(&self, ranch_id: Uuid) -> AppResult<Vec<Well>> {
        let wells = sqlx::query_as::<_, Well>(
            r#"
            SELECT id, ranch_id, name, gpm, created_at
            FROM wells
            WHERE ranch_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(ranch_id)
        .fetch_all(&self.db)
        .await?;

        Ok(wells)
    }

    /// Create a well on a ranch
    pub async fn create_well(&self, ranch_id: Uuid, input: CreateWellInput) -> AppResult<Well> {
        shared::validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        shared::validate_well_gpm(input.gpm).map_err(|msg| AppError::validation("gpm", msg))?;

        let ranch_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ranches WHERE id = $1")
                .bind(ranch_id)
                .fetch_one(&self.db)
                .await?;

        if ranch_exists == 0 {
            return Err(AppError::NotFound("Ranch".to_string()));
        }

        let well = sqlx::query_as::<_, Well>(
            r#"
            INSERT INTO wells (ranch_id, name, gpm)
            VALUES ($1, $2, $3)
            RETURNING id, ranch_id, name, gpm, created_at
            "#,
        )
        .bind(ranch_id)
        .bind(input.name.trim())
        .bind(input.gpm)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(well_id = %well.id, ranch_id = %ranch_id, "Well created");

        Ok(well)
    }

    /// Check that an optional well belongs to the ranch
    pub async fn ensure_on_ranch(&self, ranch_id: Uuid, well_id: Option<Uuid>) -> AppResult<()> {
        let Some(well_id) = well_id else {
            return Ok(());
        };

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM wells WHERE id = $1 AND ranch_id = $2",
        )
        .bind(well_id)
        .bind(ranch_id)
        .fetch_one(&self.db)
        .await?;

        if count == 0 {
            return Err(AppError::NotFound("Well".to_string()));
        }

        Ok(())
    }
}
