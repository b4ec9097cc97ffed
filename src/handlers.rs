use crate::calendar;
use crate::catalog::{self, BeverageKind};
use crate::convert::{estimate_from_strength, round_kcal};
use crate::errors::{AppError, LedgerError};
use crate::models::{
    CalculateRequest, CalculateResponse, ClearedResponse, CommitDayRequest, ConsumptionEntry,
    DayResponse, ImportResponse, MonthQuery, MonthRef, MonthView,
};
use crate::state::AppState;
use crate::stats::{current_month, day_totals, month_view};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use tracing::{info, warn};

pub async fn get_catalog() -> Json<Vec<BeverageKind>> {
    Json(catalog::all().to_vec())
}

pub async fn get_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthView>, AppError> {
    let month = resolve_month(&query)?;
    let store = state.store.lock().await;
    let view = month_view(store.ledger(), month.year, i64::from(month.month_index))?;
    Ok(Json(view))
}

pub async fn clear_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ClearedResponse>, AppError> {
    let month = resolve_month(&query)?;
    let removed = state
        .with_store_blocking(move |store| {
            store.clear_month(month.year, i64::from(month.month_index))
        })
        .await??;
    info!(year = month.year, month = month.month_index, removed, "month cleared");
    Ok(Json(ClearedResponse { removed }))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    calendar::parse_iso_date(&date)?;
    let store = state.store.lock().await;
    let entries = store.get_day(&date).unwrap_or_default().to_vec();
    Ok(Json(day_response(date, entries, 0)))
}

/// Commits a day from raw input rows. Rows that do not describe a valid drink
/// are left out; a submission where every row is invalid is refused.
pub async fn put_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<CommitDayRequest>,
) -> Result<Json<DayResponse>, AppError> {
    calendar::parse_iso_date(&date)?;
    let submitted = payload.entries.len();
    let entries: Vec<_> = payload
        .entries
        .into_iter()
        .filter_map(|row| row.into_entry())
        .collect();
    let dropped = submitted - entries.len();
    if submitted > 0 && entries.is_empty() {
        warn!(%date, submitted, "no valid entries submitted");
        return Err(AppError::bad_request(
            "entries need a beverage kind with a positive volume, or positive grams",
        ));
    }

    let (date, entries) = state
        .with_store_blocking(move |store| {
            store.set_day(&date, entries.clone())?;
            Ok::<_, LedgerError>((date, entries))
        })
        .await??;
    info!(%date, entries = entries.len(), dropped, "day saved");

    Ok(Json(day_response(date, entries, dropped)))
}

pub async fn delete_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ClearedResponse>, AppError> {
    calendar::parse_iso_date(&date)?;
    let (date, existed) = state
        .with_store_blocking(move |store| {
            let existed = store.delete_day(&date)?;
            Ok::<_, LedgerError>((date, existed))
        })
        .await??;
    let removed = usize::from(existed);
    info!(%date, removed, "day cleared");
    Ok(Json(ClearedResponse { removed }))
}

pub async fn calculate(
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, AppError> {
    let estimate = estimate_from_strength(payload.abv_percent, payload.volume_ml).ok_or_else(
        || AppError::bad_request("strength must be in (0, 100] and volume must be positive"),
    )?;
    Ok(Json(CalculateResponse {
        grams: estimate.grams,
        kcal: round_kcal(estimate.kcal),
    }))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store.lock().await;
    let document = store.export_document()?;
    let filename = format!(
        "alco-ledger-{}.json",
        Local::now().date_naive().format("%Y-%m-%d")
    );
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, document))
}

pub async fn import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let days = state
        .with_store_blocking(move |store| store.import_document(&body))
        .await?
        .map_err(|err| {
            warn!("import rejected: {err}");
            AppError::from(err)
        })?;
    info!(days, "ledger imported");
    Ok(Json(ImportResponse { days }))
}

/// Missing query values default to the current month; out-of-range month
/// indices are normalized into the adjacent years.
fn resolve_month(query: &MonthQuery) -> Result<MonthRef, AppError> {
    let current = current_month();
    let year = query.year.unwrap_or(current.year);
    let month_index = query
        .month
        .map(i64::from)
        .unwrap_or(i64::from(current.month_index));
    Ok(calendar::normalize(year, month_index)?)
}

fn day_response(date: String, entries: Vec<ConsumptionEntry>, dropped: usize) -> DayResponse {
    DayResponse {
        summary: day_totals(&entries).summary(),
        date,
        entries,
        dropped,
    }
}
