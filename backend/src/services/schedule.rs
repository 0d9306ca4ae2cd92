//! Irrigation scheduling service
//!
//! Applies one set of schedule inputs to many blocks of a ranch. Every
//! block's timing and water use is computed before anything is written, so a
//! calculation failure on any block leaves the database untouched.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::block::{BlockRecord, BlockService, BLOCK_COLUMNS};
use super::well::WellService;
use crate::error::{AppError, AppResult};
use crate::models::{
    CalculationBranch, FertilizationInfo, HistoryVolumes, IrrigationHistory, IrrigationSchedule,
    IrrigationTiming, ScheduleInput,
};
use shared::{
    derive_history_volumes, evapotranspiration_demand, resolve_numeric, DepthFormula,
    EvapotranspirationDemand, IrrigationCalculator,
};

/// Scheduling service
#[derive(Clone)]
pub struct ScheduleService {
    db: PgPool,
    calculator: IrrigationCalculator,
}

/// Input for applying a schedule to blocks of a ranch
#[derive(Debug, Deserialize)]
pub struct ApplyScheduleInput {
    pub block_ids: Vec<Uuid>,
    #[serde(flatten)]
    pub schedule: ScheduleInput,
    /// Overrides each block's own well on the history records
    pub well_id: Option<Uuid>,
    #[serde(default)]
    pub fertilized: bool,
    pub fertilization_details: Option<String>,
}

/// One block's outcome of a schedule submission
#[derive(Debug, Serialize)]
pub struct ScheduleRunEntry {
    pub block_name: String,
    pub set_number: i32,
    pub schedule: IrrigationSchedule,
    pub history: IrrigationHistory,
}

/// Result of applying a schedule
#[derive(Debug, Serialize)]
pub struct ScheduleRunSummary {
    pub date: NaiveDate,
    pub entries: Vec<ScheduleRunEntry>,
    pub total_gallons: Decimal,
    pub total_acre_feet: Decimal,
}

/// A block's place in the ranch schedule plan
#[derive(Debug, Serialize)]
pub struct SchedulePlanEntry {
    pub block: BlockRecord,
    pub schedule_id: Option<Uuid>,
    pub timing: Option<IrrigationTiming>,
    pub fertilization: FertilizationInfo,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Every block of a ranch with its latest schedule
#[derive(Debug, Serialize)]
pub struct SchedulePlan {
    pub ranch_id: Uuid,
    pub entries: Vec<SchedulePlanEntry>,
}

/// Input for previewing a block's irrigation time
#[derive(Debug, Deserialize)]
pub struct CalculationPreviewInput {
    pub block_id: Uuid,
    #[serde(flatten)]
    pub schedule: ScheduleInput,
}

/// Calculator output for one block without persisting anything
#[derive(Debug, Serialize)]
pub struct CalculationPreview {
    pub block_id: Uuid,
    pub branch: CalculationBranch,
    pub depth_formula: DepthFormula,
    pub timing: IrrigationTiming,
    pub volumes: HistoryVolumes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evapotranspiration: Option<EvapotranspirationDemand>,
}

#[derive(Debug, sqlx::FromRow)]
struct LatestSchedule {
    id: Uuid,
    block_id: Uuid,
    minutes_needed: Decimal,
    fertilized: bool,
    fertilization_details: Option<String>,
    created_at: DateTime<Utc>,
}

/// Schedule inputs after resolving submitted text into numbers
struct ResolvedInputs {
    inches_needed: Option<Decimal>,
    leaching_factor: Option<Decimal>,
    reference_evapotranspiration: Option<Decimal>,
    distribution_uniformity: Option<Decimal>,
}

impl ResolvedInputs {
    fn resolve(input: &ScheduleInput) -> AppResult<Self> {
        let resolved = Self {
            inches_needed: resolve_numeric(&input.inches_needed, "inches_needed")?,
            leaching_factor: resolve_numeric(&input.leaching_factor, "leaching_factor")?,
            reference_evapotranspiration: resolve_numeric(
                &input.reference_evapotranspiration,
                "reference_evapotranspiration",
            )?,
            distribution_uniformity: resolve_numeric(
                &input.distribution_uniformity,
                "distribution_uniformity",
            )?,
        };

        let percentages = [
            ("leaching_factor", resolved.leaching_factor),
            ("distribution_uniformity", resolved.distribution_uniformity),
        ];
        for (field, value) in percentages {
            if let Some(value) = value {
                shared::validate_percentage(value)
                    .map_err(|msg| AppError::validation(field, msg))?;
            }
        }

        Ok(resolved)
    }
}

impl ScheduleService {
    /// Create a new ScheduleService instance
    pub fn new(db: PgPool, calculator: IrrigationCalculator) -> Self {
        Self { db, calculator }
    }

    /// Apply schedule inputs to blocks of a ranch, recording one schedule and
    /// one history record per block dated `today`
    pub async fn apply_schedule(
        &self,
        ranch_id: Uuid,
        input: ApplyScheduleInput,
        today: NaiveDate,
    ) -> AppResult<ScheduleRunSummary> {
        if input.block_ids.is_empty() {
            return Err(AppError::validation("block_ids", "Select at least one block"));
        }

        let resolved = ResolvedInputs::resolve(&input.schedule)?;
        WellService::new(self.db.clone())
            .ensure_on_ranch(ranch_id, input.well_id)
            .await?;

        let blocks = self.load_ranch_blocks(ranch_id, &input.block_ids).await?;
        let fertilization = FertilizationInfo::new(input.fertilized, input.fertilization_details);

        // Compute everything before the first write
        let mut planned = Vec::with_capacity(blocks.len());
        for block in blocks {
            let parameters = block.parameters();
            let timing = self.calculator.compute_timing(&parameters, &input.schedule)?;
            let volumes = derive_history_volumes(&parameters, timing.minutes_needed())?;
            planned.push((block, parameters.scheduling_hint(), timing, volumes));
        }

        let mut tx = self.db.begin().await?;
        let mut entries = Vec::with_capacity(planned.len());

        for (block, hint, timing, volumes) in planned {
            let well_id = input.well_id.or(block.well_id);

            let schedule_id = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO irrigation_schedules (block_id, well_id, minutes_needed, hours_needed,
                                                  inches_needed, leaching_factor,
                                                  reference_evapotranspiration,
                                                  distribution_uniformity, fertilized,
                                                  fertilization_details)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id
                "#,
            )
            .bind(block.id)
            .bind(well_id)
            .bind(timing.minutes_needed())
            .bind(timing.hours_needed())
            .bind(resolved.inches_needed)
            .bind(resolved.leaching_factor)
            .bind(resolved.reference_evapotranspiration)
            .bind(resolved.distribution_uniformity)
            .bind(fertilization.fertilized)
            .bind(&fertilization.details)
            .fetch_one(&mut *tx)
            .await?;

            let history_id = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO irrigation_histories (block_id, well_id, date, minutes_irrigated,
                                                  gallons_used, acre_feet_used,
                                                  days_between_irrigations,
                                                  interval_between_irrigations)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(block.id)
            .bind(well_id)
            .bind(today)
            .bind(timing.minutes_needed())
            .bind(volumes.gallons_used)
            .bind(volumes.acre_feet_used)
            .bind(hint.days_between_irrigations)
            .bind(hint.interval_between_irrigations)
            .fetch_one(&mut *tx)
            .await?;

            entries.push(ScheduleRunEntry {
                schedule: IrrigationSchedule {
                    id: schedule_id,
                    block_id: block.id,
                    well_id,
                    timing,
                    inches_needed: resolved.inches_needed,
                    leaching_factor: resolved.leaching_factor,
                    reference_evapotranspiration: resolved.reference_evapotranspiration,
                    distribution_uniformity: resolved.distribution_uniformity,
                    fertilized: fertilization.fertilized,
                    fertilization_details: fertilization.details.clone(),
                },
                history: IrrigationHistory {
                    id: history_id,
                    block_id: block.id,
                    well_id,
                    date: today,
                    minutes_irrigated: timing.minutes_needed(),
                    gallons_used: volumes.gallons_used,
                    acre_feet_used: volumes.acre_feet_used,
                    days_between_irrigations: hint.days_between_irrigations,
                    interval_between_irrigations: hint.interval_between_irrigations,
                },
                block_name: block.name,
                set_number: block.set_number,
            });
        }

        tx.commit().await?;

        let total_gallons: Decimal = entries.iter().map(|e| e.history.gallons_used).sum();
        let total_acre_feet: Decimal = entries.iter().map(|e| e.history.acre_feet_used).sum();

        tracing::info!(
            ranch_id = %ranch_id,
            blocks = entries.len(),
            %total_gallons,
            %today,
            "Schedule applied"
        );

        Ok(ScheduleRunSummary {
            date: today,
            entries,
            total_gallons,
            total_acre_feet,
        })
    }

    /// Every block of a ranch by set number with its latest schedule
    pub async fn get_schedule_plan(&self, ranch_id: Uuid) -> AppResult<SchedulePlan> {
        let blocks = BlockService::new(self.db.clone())
            .get_blocks(ranch_id)
            .await?;

        let latest = sqlx::query_as::<_, LatestSchedule>(
            r#"
            SELECT DISTINCT ON (sc.block_id)
                   sc.id, sc.block_id, sc.minutes_needed, sc.fertilized,
                   sc.fertilization_details, sc.created_at
            FROM irrigation_schedules sc
            JOIN blocks b ON b.id = sc.block_id
            JOIN irrigation_sets s ON s.id = b.set_id
            WHERE s.ranch_id = $1
            ORDER BY sc.block_id, sc.created_at DESC
            "#,
        )
        .bind(ranch_id)
        .fetch_all(&self.db)
        .await?;

        let mut latest: HashMap<Uuid, LatestSchedule> =
            latest.into_iter().map(|s| (s.block_id, s)).collect();

        let entries = blocks
            .into_iter()
            .map(|block| match latest.remove(&block.id) {
                Some(schedule) => SchedulePlanEntry {
                    block,
                    schedule_id: Some(schedule.id),
                    timing: Some(IrrigationTiming::from_minutes(schedule.minutes_needed)),
                    fertilization: FertilizationInfo::new(
                        schedule.fertilized,
                        schedule.fertilization_details,
                    ),
                    scheduled_at: Some(schedule.created_at),
                },
                None => SchedulePlanEntry {
                    block,
                    schedule_id: None,
                    timing: None,
                    fertilization: FertilizationInfo::default(),
                    scheduled_at: None,
                },
            })
            .collect();

        Ok(SchedulePlan { ranch_id, entries })
    }

    /// Run the calculator for one block without writing anything
    pub async fn preview(&self, input: CalculationPreviewInput) -> AppResult<CalculationPreview> {
        ResolvedInputs::resolve(&input.schedule)?;

        let block = BlockService::new(self.db.clone())
            .get_block(input.block_id)
            .await?;
        let parameters = block.parameters();

        let timing = self.calculator.compute_timing(&parameters, &input.schedule)?;
        let volumes = derive_history_volumes(&parameters, timing.minutes_needed())?;
        let evapotranspiration = match parameters.branch() {
            CalculationBranch::Evapotranspiration => {
                Some(evapotranspiration_demand(&parameters, &input.schedule)?)
            }
            CalculationBranch::DepthRequest => None,
        };

        Ok(CalculationPreview {
            block_id: block.id,
            branch: parameters.branch(),
            depth_formula: self.calculator.depth_formula(),
            timing,
            volumes,
            evapotranspiration,
        })
    }

    /// Load the requested blocks, all of which must belong to the ranch
    async fn load_ranch_blocks(
        &self,
        ranch_id: Uuid,
        block_ids: &[Uuid],
    ) -> AppResult<Vec<BlockRecord>> {
        let requested: HashSet<Uuid> = block_ids.iter().copied().collect();
        let ids: Vec<Uuid> = requested.iter().copied().collect();

        let query = format!(
            r#"
            SELECT {BLOCK_COLUMNS}
            FROM blocks b
            JOIN irrigation_sets s ON s.id = b.set_id
            WHERE b.id = ANY($1) AND s.ranch_id = $2
            ORDER BY s.number ASC, b.name ASC
            "#
        );

        let blocks = sqlx::query_as::<_, BlockRecord>(&query)
            .bind(&ids)
            .bind(ranch_id)
            .fetch_all(&self.db)
            .await?;

        if blocks.len() != requested.len() {
            return Err(AppError::NotFound("Block".to_string()));
        }

        Ok(blocks)
    }
}
