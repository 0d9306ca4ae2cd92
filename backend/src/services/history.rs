//! Irrigation history service

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::block::{BlockRecord, BlockService};
use crate::error::AppResult;
use crate::models::{IrrigationHistory, WeeklyUsage};

#[derive(Clone)]
pub struct HistoryService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    block_id: Uuid,
    well_id: Option<Uuid>,
    date: NaiveDate,
    minutes_irrigated: Decimal,
    gallons_used: Decimal,
    acre_feet_used: Decimal,
    days_between_irrigations: Option<i32>,
    interval_between_irrigations: Option<i32>,
}

impl From<HistoryRow> for IrrigationHistory {
    fn from(row: HistoryRow) -> Self {
        IrrigationHistory {
            id: row.id,
            block_id: row.block_id,
            well_id: row.well_id,
            date: row.date,
            minutes_irrigated: row.minutes_irrigated,
            gallons_used: row.gallons_used,
            acre_feet_used: row.acre_feet_used,
            days_between_irrigations: row.days_between_irrigations,
            interval_between_irrigations: row.interval_between_irrigations,
        }
    }
}

/// A block's irrigation history with the current week's totals
#[derive(Debug, Serialize)]
pub struct BlockHistory {
    pub block: BlockRecord,
    pub histories: Vec<IrrigationHistory>,
    pub weekly_usage: WeeklyUsage,
}

impl HistoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// History records of a block, newest first
    pub async fn get_block_history(
        &self,
        block_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<BlockHistory> {
        let block = BlockService::new(self.db.clone())
            .get_block(block_id)
            .await?;

        let histories: Vec<IrrigationHistory> = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT id, block_id, well_id, date, minutes_irrigated, gallons_used,
                   acre_feet_used, days_between_irrigations, interval_between_irrigations
            FROM irrigation_histories
            WHERE block_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(block_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(IrrigationHistory::from)
        .collect();

        let weekly_usage = WeeklyUsage::for_week(today, &histories);

        Ok(BlockHistory {
            block,
            histories,
            weekly_usage,
        })
    }
}
