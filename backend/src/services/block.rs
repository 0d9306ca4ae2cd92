//! Block management service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::well::WellService;
use crate::error::{AppError, AppResult};
use crate::models::BlockParameters;

/// Block service for managing irrigation blocks
#[derive(Clone)]
pub struct BlockService {
    db: PgPool,
}

/// Block row joined with its set and ranch
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BlockRecord {
    pub id: Uuid,
    pub ranch_id: Uuid,
    pub set_id: Uuid,
    pub set_number: i32,
    pub well_id: Option<Uuid>,
    pub name: String,
    pub variety: String,
    pub acreage: Decimal,
    pub gpm: Decimal,
    pub tree_spacing: Option<Decimal>,
    pub emitter_output: Option<Decimal>,
    pub has_crop_x: bool,
    pub et_crop_coefficient: Option<Decimal>,
    pub water_quality: Option<Decimal>,
    pub days_between_irrigations: Option<i32>,
    pub interval_between_irrigations: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlockRecord {
    /// Attributes the calculator works from
    pub fn parameters(&self) -> BlockParameters {
        BlockParameters {
            acreage: self.acreage,
            gpm: self.gpm,
            tree_spacing: self.tree_spacing,
            emitter_output: self.emitter_output,
            has_crop_x: self.has_crop_x,
            et_crop_coefficient: self.et_crop_coefficient,
            water_quality: self.water_quality,
            days_between_irrigations: self.days_between_irrigations,
            interval_between_irrigations: self.interval_between_irrigations,
        }
    }
}

/// Input for creating a block
#[derive(Debug, Deserialize)]
pub struct CreateBlockInput {
    /// Defaults to the ranch's lowest-numbered set
    pub set_id: Option<Uuid>,
    pub well_id: Option<Uuid>,
    pub name: String,
    pub variety: String,
    #[serde(flatten)]
    pub parameters: BlockParameters,
}

/// Input for updating a block.
///
/// Omitted fields keep their current value. Optional attributes sent as
/// `null` are cleared.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlockInput {
    pub set_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub well_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub variety: Option<String>,
    pub acreage: Option<Decimal>,
    pub gpm: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub tree_spacing: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub emitter_output: Option<Option<Decimal>>,
    pub has_crop_x: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub et_crop_coefficient: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub water_quality: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub days_between_irrigations: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub interval_between_irrigations: Option<Option<i32>>,
}

/// Present field (including `null`) becomes `Some`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateBlockInput {
    /// Calculator attributes after applying this update to `existing`
    pub fn merge_parameters(&self, existing: &BlockRecord) -> BlockParameters {
        BlockParameters {
            acreage: self.acreage.unwrap_or(existing.acreage),
            gpm: self.gpm.unwrap_or(existing.gpm),
            tree_spacing: self.tree_spacing.unwrap_or(existing.tree_spacing),
            emitter_output: self.emitter_output.unwrap_or(existing.emitter_output),
            has_crop_x: self.has_crop_x.unwrap_or(existing.has_crop_x),
            et_crop_coefficient: self
                .et_crop_coefficient
                .unwrap_or(existing.et_crop_coefficient),
            water_quality: self.water_quality.unwrap_or(existing.water_quality),
            days_between_irrigations: self
                .days_between_irrigations
                .unwrap_or(existing.days_between_irrigations),
            interval_between_irrigations: self
                .interval_between_irrigations
                .unwrap_or(existing.interval_between_irrigations),
        }
    }
}

pub(crate) const BLOCK_COLUMNS: &str = r#"
    b.id, s.ranch_id, b.set_id, s.number AS set_number, b.well_id, b.name, b.variety,
    b.acreage, b.gpm, b.tree_spacing, b.emitter_output, b.has_crop_x,
    b.et_crop_coefficient, b.water_quality, b.days_between_irrigations,
    b.interval_between_irrigations, b.created_at, b.updated_at
"#;

fn validate_block(name: &str, variety: &str, parameters: &BlockParameters) -> AppResult<()> {
    shared::validate_name(name).map_err(|msg| AppError::validation("name", msg))?;
    shared::validate_name(variety).map_err(|msg| AppError::validation("variety", msg))?;
    shared::validate_block_parameters(parameters)
        .map_err(|(field, msg)| AppError::validation(field, msg))
}

impl BlockService {
    /// Create a new BlockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all blocks of a ranch, ordered by set number then name
    pub async fn get_blocks(&self, ranch_id: Uuid) -> AppResult<Vec<BlockRecord>> {
        let query = format!(
            r#"
            SELECT {BLOCK_COLUMNS}
            FROM blocks b
            JOIN irrigation_sets s ON s.id = b.set_id
            WHERE s.ranch_id = $1
            ORDER BY s.number ASC, b.name ASC
            "#
        );

        let blocks = sqlx::query_as::<_, BlockRecord>(&query)
            .bind(ranch_id)
            .fetch_all(&self.db)
            .await?;

        Ok(blocks)
    }

    /// Get a block by ID
    pub async fn get_block(&self, block_id: Uuid) -> AppResult<BlockRecord> {
        let query = format!(
            r#"
            SELECT {BLOCK_COLUMNS}
            FROM blocks b
            JOIN irrigation_sets s ON s.id = b.set_id
            WHERE b.id = $1
            "#
        );

        sqlx::query_as::<_, BlockRecord>(&query)
            .bind(block_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Block".to_string()))
    }

    /// Create a block within one of the ranch's sets
    pub async fn create_block(
        &self,
        ranch_id: Uuid,
        input: CreateBlockInput,
    ) -> AppResult<BlockRecord> {
        validate_block(&input.name, &input.variety, &input.parameters)?;

        let set_id = match input.set_id {
            Some(set_id) => self.ensure_set_on_ranch(ranch_id, set_id).await?,
            None => self.first_set(ranch_id).await?,
        };
        WellService::new(self.db.clone())
            .ensure_on_ranch(ranch_id, input.well_id)
            .await?;

        let params = &input.parameters;
        let block_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO blocks (set_id, well_id, name, variety, acreage, gpm, tree_spacing,
                                emitter_output, has_crop_x, et_crop_coefficient, water_quality,
                                days_between_irrigations, interval_between_irrigations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(set_id)
        .bind(input.well_id)
        .bind(input.name.trim())
        .bind(input.variety.trim())
        .bind(params.acreage)
        .bind(params.gpm)
        .bind(params.tree_spacing)
        .bind(params.emitter_output)
        .bind(params.has_crop_x)
        .bind(params.et_crop_coefficient)
        .bind(params.water_quality)
        .bind(params.days_between_irrigations)
        .bind(params.interval_between_irrigations)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(block_id = %block_id, ranch_id = %ranch_id, "Block created");

        self.get_block(block_id).await
    }

    /// Update a block; omitted fields keep their current values, `null` clears
    pub async fn update_block(
        &self,
        block_id: Uuid,
        input: UpdateBlockInput,
    ) -> AppResult<BlockRecord> {
        let existing = self.get_block(block_id).await?;

        let parameters = input.merge_parameters(&existing);
        let name = input.name.unwrap_or_else(|| existing.name.clone());
        let variety = input.variety.unwrap_or_else(|| existing.variety.clone());
        validate_block(&name, &variety, &parameters)?;

        let set_id = match input.set_id {
            Some(set_id) => self.ensure_set_on_ranch(existing.ranch_id, set_id).await?,
            None => existing.set_id,
        };
        let well_id = input.well_id.unwrap_or(existing.well_id);
        WellService::new(self.db.clone())
            .ensure_on_ranch(existing.ranch_id, well_id)
            .await?;

        sqlx::query(
            r#"
            UPDATE blocks
            SET set_id = $1, well_id = $2, name = $3, variety = $4, acreage = $5, gpm = $6,
                tree_spacing = $7, emitter_output = $8, has_crop_x = $9,
                et_crop_coefficient = $10, water_quality = $11,
                days_between_irrigations = $12, interval_between_irrigations = $13,
                updated_at = NOW()
            WHERE id = $14
            "#,
        )
        .bind(set_id)
        .bind(well_id)
        .bind(name.trim())
        .bind(variety.trim())
        .bind(parameters.acreage)
        .bind(parameters.gpm)
        .bind(parameters.tree_spacing)
        .bind(parameters.emitter_output)
        .bind(parameters.has_crop_x)
        .bind(parameters.et_crop_coefficient)
        .bind(parameters.water_quality)
        .bind(parameters.days_between_irrigations)
        .bind(parameters.interval_between_irrigations)
        .bind(block_id)
        .execute(&self.db)
        .await?;

        self.get_block(block_id).await
    }

    async fn ensure_set_on_ranch(&self, ranch_id: Uuid, set_id: Uuid) -> AppResult<Uuid> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM irrigation_sets WHERE id = $1 AND ranch_id = $2",
        )
        .bind(set_id)
        .bind(ranch_id)
        .fetch_one(&self.db)
        .await?;

        if count == 0 {
            return Err(AppError::NotFound("Irrigation set".to_string()));
        }

        Ok(set_id)
    }

    async fn first_set(&self, ranch_id: Uuid) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM irrigation_sets WHERE ranch_id = $1 ORDER BY number ASC LIMIT 1",
        )
        .bind(ranch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::validation("set_id", "Ranch has no irrigation sets"))
    }
}
