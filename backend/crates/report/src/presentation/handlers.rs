//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::application::analysis::{AnalysisCache, AnalyzeEmissionsUseCase, EmissionAnalysis};
use crate::application::config::ReportSettings;
use crate::application::periodic_report::GenerateReportUseCase;
use crate::domain::provider::NarrativeProvider;
use crate::domain::source::ReportSource;
use crate::error::ReportResult;
use crate::presentation::dto::{AnalysisBody, EnvironmentalReportResponse};

/// Shared state for report handlers
#[derive(Clone)]
pub struct ReportAppState<S, N>
where
    S: ReportSource + Clone + Send + Sync + 'static,
    N: NarrativeProvider + Clone + Send + Sync + 'static,
{
    pub source: Arc<S>,
    /// Writes the periodic reports
    pub reporter: Arc<N>,
    /// Writes the forensic analyses
    pub analyst: Arc<N>,
    pub cache: Arc<AnalysisCache>,
    pub settings: ReportSettings,
}

/// GET /api/environmental-reports/{range}
pub async fn environmental_report<S, N>(
    State(state): State<ReportAppState<S, N>>,
    Path(range): Path<String>,
) -> ReportResult<Json<EnvironmentalReportResponse>>
where
    S: ReportSource + Clone + Send + Sync + 'static,
    N: NarrativeProvider + Clone + Send + Sync + 'static,
{
    let use_case = GenerateReportUseCase::new(
        state.source.clone(),
        state.reporter.clone(),
        state.settings.source_timeout,
    );
    let report = use_case.for_slug(&range).await?;
    Ok(Json(report.into()))
}

/// POST /api/genai/emissions-analysis
pub async fn emissions_analysis<S, N>(
    State(state): State<ReportAppState<S, N>>,
    Json(body): Json<AnalysisBody>,
) -> ReportResult<Json<EmissionAnalysis>>
where
    S: ReportSource + Clone + Send + Sync + 'static,
    N: NarrativeProvider + Clone + Send + Sync + 'static,
{
    let use_case = AnalyzeEmissionsUseCase::new(
        state.source.clone(),
        state.analyst.clone(),
        state.cache.clone(),
        state.settings,
    );
    let analysis = use_case.execute(body.start_date, body.end_date).await?;
    Ok(Json(analysis))
}
