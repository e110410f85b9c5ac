// src/handlers/reports.rs
use axum::extract::State;
use axum::Json;
use chrono::{Datelike, Utc};
use tracing::instrument;

use crate::dtos::reports::{
    BreakdownQuery, BreakdownRow, DayLedgerQuery, DayLedgerResponse, MonthlyQuery, StatsResponse,
};
use crate::error::AppError;
use crate::extract::QueryParams;
use crate::handlers::trip::Labels;
use crate::ledger::{self, GroupBy, LedgerSummary, TripFilter, YearSummary};
use crate::models::driver::Driver;
use crate::models::trip::Trip;
use crate::models::truck::Truck;
use crate::state::AppState;

const ACTIVITY_DAYS: u32 = 7;

// GET /stats
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let drivers = state.repo::<Driver>().count().await?;
    let trucks = state.repo::<Truck>().count().await?;
    let trips = state.repo::<Trip>().list().await?;

    let totals = LedgerSummary::of(trips.iter().map(|t| &t.data));
    let today = Utc::now().date_naive();

    Ok(Json(StatsResponse {
        drivers,
        trucks,
        income: totals.total_bill,
        expense: totals.total_expenses,
        pending: totals.amount_pending,
        mileage: totals.mileage,
        activity: ledger::activity(trips.iter().map(|t| &t.data), today, ACTIVITY_DAYS),
    }))
}

// GET /ledger?date=
#[instrument(skip(state))]
pub async fn day_ledger(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DayLedgerQuery>,
) -> Result<Json<DayLedgerResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let trips = state.repo::<Trip>().list().await?;
    let summary = LedgerSummary::of(trips.iter().map(|t| &t.data).filter(|t| t.date == date));
    Ok(Json(DayLedgerResponse { date, summary }))
}

// GET /ledger/monthly?year=
#[instrument(skip(state))]
pub async fn monthly_ledger(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MonthlyQuery>,
) -> Result<Json<YearSummary>, AppError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let trips = state.repo::<Trip>().list().await?;
    Ok(Json(ledger::monthly(trips.iter().map(|t| &t.data), year)))
}

// GET /ledger/breakdown?by=dealer|driver|truck
#[instrument(skip(state))]
pub async fn breakdown_ledger(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BreakdownQuery>,
    QueryParams(filter): QueryParams<TripFilter>,
) -> Result<Json<Vec<BreakdownRow>>, AppError> {
    filter.validate()?;
    let trips = filter.apply(state.repo::<Trip>().list().await?);
    let labels = Labels::load(&state).await?;
    let names = match query.by {
        GroupBy::Dealer => &labels.dealers,
        GroupBy::Driver => &labels.drivers,
        GroupBy::Truck => &labels.trucks,
    };

    let mut rows: Vec<BreakdownRow> = ledger::breakdown(trips.iter().map(|t| &t.data), query.by)
        .into_iter()
        .map(|(id, summary)| BreakdownRow {
            id,
            label: names.get(&id).cloned().unwrap_or_default(),
            summary,
        })
        .collect();
    rows.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
    Ok(Json(rows))
}
