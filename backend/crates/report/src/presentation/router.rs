//! Report Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use emission::PgEmissionRepository;
use sink::PgSinkRepository;

use crate::application::analysis::AnalysisCache;
use crate::application::config::{ReportConfig, ReportSettings};
use crate::domain::provider::NarrativeProvider;
use crate::domain::source::ReportSource;
use crate::infra::narrative::HttpNarrativeProvider;
use crate::infra::repository_source::RepositorySource;
use crate::presentation::handlers::{self, ReportAppState};

/// Create the report router over the PostgreSQL stores and the HTTP providers
pub fn report_router(
    emissions: PgEmissionRepository,
    sinks: PgSinkRepository,
    config: &ReportConfig,
    cache: Arc<AnalysisCache>,
) -> Router {
    let (reporter, analyst) = HttpNarrativeProvider::pair_from_config(config);
    report_router_generic(
        RepositorySource::new(emissions, sinks),
        reporter,
        analyst,
        cache,
        config.settings(),
    )
}

/// Create a report router for any source and narrative provider
pub fn report_router_generic<S, N>(
    source: S,
    reporter: N,
    analyst: N,
    cache: Arc<AnalysisCache>,
    settings: ReportSettings,
) -> Router
where
    S: ReportSource + Clone + Send + Sync + 'static,
    N: NarrativeProvider + Clone + Send + Sync + 'static,
{
    let state = ReportAppState {
        source: Arc::new(source),
        reporter: Arc::new(reporter),
        analyst: Arc::new(analyst),
        cache,
        settings,
    };

    Router::new()
        .route(
            "/environmental-reports/{range}",
            get(handlers::environmental_report::<S, N>),
        )
        .route(
            "/genai/emissions-analysis",
            post(handlers::emissions_analysis::<S, N>),
        )
        .with_state(state)
}
