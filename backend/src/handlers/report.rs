//! Ranch report HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::DateRange;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::reporting::ReportingService;
use crate::AppState;

/// Query parameters for ranch reports
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub format: Option<String>, // "json" or "csv"
}

/// Water use of a ranch grouped by day
pub async fn get_ranch_report(
    State(state): State<AppState>,
    Path(ranch_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let today = Utc::now().date_naive();
    let default_range = DateRange::trailing_days(today, state.config.irrigation.report_default_days);
    let range = DateRange::new(
        query.from.unwrap_or(default_range.start),
        query.to.unwrap_or(default_range.end),
    );

    let service = ReportingService::new(state.db);
    let report = service.get_ranch_report(ranch_id, range).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&report.csv_rows())?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"irrigation_report.csv\""),
            ],
            csv,
        )
            .into_response());
    }

    Ok(Json(report).into_response())
}
