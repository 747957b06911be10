//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::application::delete::DeleteSinkUseCase;
use crate::application::fetch::FetchSinksUseCase;
use crate::application::register::RegisterSinkUseCase;
use crate::application::required_land::RequiredLandUseCase;
use crate::domain::entities::SinkKind;
use crate::domain::repository::SinkRepository;
use crate::error::SinkResult;
use crate::presentation::dto::{
    DeleteSinkResponse, ExistingSinkDateResponse, ExistingSinkRangeResponse, RegisterSinkBody,
    RegisterSinkResponse, RequiredLandBody, RequiredLandResponse, SinkDateResponse,
    SinkRangeResponse,
};

/// Shared state for sink handlers
#[derive(Clone)]
pub struct SinkAppState<R>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /api/sinks
pub async fn create_sink<R>(
    State(state): State<SinkAppState<R>>,
    Json(body): Json<RegisterSinkBody>,
) -> SinkResult<(StatusCode, Json<RegisterSinkResponse>)>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let data = RegisterSinkUseCase::new(state.repo.clone())
        .execute(SinkKind::Planned, body.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterSinkResponse {
            message: "Carbon sink created successfully",
            data,
        }),
    ))
}

/// POST /api/existing-sinks
pub async fn create_existing_sink<R>(
    State(state): State<SinkAppState<R>>,
    Json(body): Json<RegisterSinkBody>,
) -> SinkResult<(StatusCode, Json<RegisterSinkResponse>)>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let data = RegisterSinkUseCase::new(state.repo.clone())
        .execute(SinkKind::Existing, body.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterSinkResponse {
            message: "Existing carbon sink created successfully",
            data,
        }),
    ))
}

/// GET /api/sink/date/{date}
pub async fn sinks_for_date<R>(
    State(state): State<SinkAppState<R>>,
    Path(date): Path<String>,
) -> SinkResult<Json<SinkDateResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let sink_data = FetchSinksUseCase::new(state.repo.clone())
        .for_date(SinkKind::Planned, &date)
        .await?;
    Ok(Json(SinkDateResponse { date, sink_data }))
}

/// GET /api/sink/daterange/{startDate}/{endDate}
pub async fn sinks_for_range<R>(
    State(state): State<SinkAppState<R>>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> SinkResult<Json<SinkRangeResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let sink_data = FetchSinksUseCase::new(state.repo.clone())
        .for_date_range(SinkKind::Planned, &start_date, &end_date)
        .await?;
    Ok(Json(SinkRangeResponse {
        start_date,
        end_date,
        sink_data,
    }))
}

/// DELETE /api/sink/{id}
pub async fn delete_sink<R>(
    State(state): State<SinkAppState<R>>,
    Path(id): Path<String>,
) -> SinkResult<Json<DeleteSinkResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let data = DeleteSinkUseCase::new(state.repo.clone())
        .execute(SinkKind::Planned, &id)
        .await?;
    Ok(Json(DeleteSinkResponse {
        message: "Sink entry deleted successfully.",
        data,
    }))
}

/// GET /api/existingsinks/date/{date}
pub async fn existing_sinks_for_date<R>(
    State(state): State<SinkAppState<R>>,
    Path(date): Path<String>,
) -> SinkResult<Json<ExistingSinkDateResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let existing_sink_data = FetchSinksUseCase::new(state.repo.clone())
        .for_date(SinkKind::Existing, &date)
        .await?;
    Ok(Json(ExistingSinkDateResponse {
        date,
        existing_sink_data,
    }))
}

/// GET /api/existingsinks/date-range/{startDate}/{endDate}
pub async fn existing_sinks_for_range<R>(
    State(state): State<SinkAppState<R>>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> SinkResult<Json<ExistingSinkRangeResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let existing_sink_data = FetchSinksUseCase::new(state.repo.clone())
        .for_date_range(SinkKind::Existing, &start_date, &end_date)
        .await?;
    Ok(Json(ExistingSinkRangeResponse {
        start_date,
        end_date,
        existing_sink_data,
    }))
}

/// DELETE /api/existingsinks/{id}
pub async fn delete_existing_sink<R>(
    State(state): State<SinkAppState<R>>,
    Path(id): Path<String>,
) -> SinkResult<Json<DeleteSinkResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let data = DeleteSinkUseCase::new(state.repo.clone())
        .execute(SinkKind::Existing, &id)
        .await?;
    Ok(Json(DeleteSinkResponse {
        message: "ExistingSink entry deleted successfully.",
        data,
    }))
}

/// POST /api/requiredland
pub async fn required_land<R>(
    State(state): State<SinkAppState<R>>,
    Json(body): Json<RequiredLandBody>,
) -> SinkResult<Json<RequiredLandResponse>>
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let calculation = RequiredLandUseCase::new(state.repo.clone())
        .execute(body.into())
        .await?;
    Ok(Json(RequiredLandResponse {
        message: "Calculation Successful",
        soil_efficiency: calculation.soil_condition.suitability_factor(),
        data: calculation.result,
    }))
}
