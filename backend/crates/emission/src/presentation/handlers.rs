//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use kernel::time_window::NamedRange;

use crate::application::coal_burn::CalculateCoalBurnUseCase;
use crate::application::delete_record::DeleteTodayRecordUseCase;
use crate::application::electricity::CalculateElectricityUseCase;
use crate::application::explosion::CalculateExplosionUseCase;
use crate::application::fetch_records::FetchRecordsUseCase;
use crate::application::fuel_combustion::CalculateFuelCombustionUseCase;
use crate::application::methane::CalculateMethaneUseCase;
use crate::application::shipping::CalculateShippingUseCase;
use crate::domain::entities::{CategoryRecords, CoalBurnPayload, ExplosionPayload, ShippingResult};
use crate::domain::estimator::EmissionEstimator;
use crate::domain::repository::EmissionRecordRepository;
use crate::error::EmissionResult;
use crate::presentation::dto::{
    CoalBurnBody, DateRecordsResponse, DeleteResponse, ElectricityQuery, ExplosionBody,
    FuelCombustionQuery, MethaneBody, MethaneResponse, MethaneTotal, PastRangeResponse,
    PollutantResultResponse, ShippingBody,
};

/// Shared state for emission handlers
#[derive(Clone)]
pub struct EmissionAppState<R, E>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub estimator: Arc<E>,
}

/// GET /api/electricity-consumption
pub async fn electricity_consumption<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Query(query): Query<ElectricityQuery>,
) -> EmissionResult<Json<PollutantResultResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let use_case = CalculateElectricityUseCase::new(state.repo.clone(), state.estimator.clone());
    let result = use_case.execute(query.into()).await?;
    Ok(Json(PollutantResultResponse { result }))
}

/// GET /api/fuel-combustion
pub async fn fuel_combustion<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Query(query): Query<FuelCombustionQuery>,
) -> EmissionResult<Json<PollutantResultResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let use_case = CalculateFuelCombustionUseCase::new(state.repo.clone(), state.estimator.clone());
    let result = use_case.execute(query.into()).await?;
    Ok(Json(PollutantResultResponse { result }))
}

/// POST /api/shipping-emissions
pub async fn shipping_emissions<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Json(body): Json<ShippingBody>,
) -> EmissionResult<Json<ShippingResult>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let use_case = CalculateShippingUseCase::new(state.repo.clone(), state.estimator.clone());
    Ok(Json(use_case.execute(body.into()).await?))
}

/// POST /api/explosion-emissions
pub async fn explosion_emissions<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Json(body): Json<ExplosionBody>,
) -> EmissionResult<Json<ExplosionPayload>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let use_case = CalculateExplosionUseCase::new(state.repo.clone());
    Ok(Json(use_case.execute(body.into()).await?))
}

/// POST /api/coal-emission
pub async fn coal_emission<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Json(body): Json<CoalBurnBody>,
) -> EmissionResult<Json<CoalBurnPayload>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let use_case = CalculateCoalBurnUseCase::new(state.repo.clone());
    Ok(Json(use_case.execute(body.into()).await?))
}

/// POST /api/methane-emission
pub async fn methane_emission<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Json(body): Json<MethaneBody>,
) -> EmissionResult<Json<MethaneResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let use_case = CalculateMethaneUseCase::new(state.repo.clone());
    let total_methane = use_case.execute(body.into()).await?;
    Ok(Json(MethaneResponse {
        success: true,
        data: MethaneTotal { total_methane },
    }))
}

/// GET /api/data/{date}
pub async fn records_for_date<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Path(date): Path<String>,
) -> EmissionResult<Json<DateRecordsResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let records = FetchRecordsUseCase::new(state.repo.clone())
        .for_date(&date)
        .await?;
    Ok(Json(DateRecordsResponse { date, records }))
}

/// GET /api/data/{startDate}/{endDate}
pub async fn records_for_range<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> EmissionResult<Json<CategoryRecords>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let records = FetchRecordsUseCase::new(state.repo.clone())
        .for_date_range(&start_date, &end_date)
        .await?;
    Ok(Json(records))
}

/// DELETE /api/delete/{id}
pub async fn delete_record<R, E>(
    State(state): State<EmissionAppState<R, E>>,
    Path(id): Path<String>,
) -> EmissionResult<Json<DeleteResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let deleted = DeleteTodayRecordUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;
    Ok(Json(DeleteResponse {
        message: "Entry deleted successfully.",
        data: deleted,
    }))
}

/// GET /api/reports/past-day
pub async fn past_day<R, E>(
    State(state): State<EmissionAppState<R, E>>,
) -> EmissionResult<Json<PastRangeResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    past_range(&state, NamedRange::Daily, "Past Day").await
}

/// GET /api/reports/past-week
pub async fn past_week<R, E>(
    State(state): State<EmissionAppState<R, E>>,
) -> EmissionResult<Json<PastRangeResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    past_range(&state, NamedRange::Weekly, "Past Week").await
}

async fn past_range<R, E>(
    state: &EmissionAppState<R, E>,
    range: NamedRange,
    label: &'static str,
) -> EmissionResult<Json<PastRangeResponse>>
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let data = FetchRecordsUseCase::new(state.repo.clone())
        .for_named_range(range)
        .await?;
    tracing::info!(range = label, records = data.total_len(), "Past range data fetched");
    Ok(Json(PastRangeResponse { range: label, data }))
}
