//! Emission Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::application::config::EmissionConfig;
use crate::domain::estimator::EmissionEstimator;
use crate::domain::repository::EmissionRecordRepository;
use crate::infra::http_estimator::HttpEmissionEstimator;
use crate::infra::postgres::PgEmissionRepository;
use crate::presentation::handlers::{self, EmissionAppState};

/// Create the emission router with PostgreSQL storage and the HTTP providers
pub fn emission_router(repo: PgEmissionRepository, config: EmissionConfig) -> Router {
    let estimator = HttpEmissionEstimator::from_config(&config);
    emission_router_generic(repo, estimator)
}

/// Create an emission router for any repository and estimator implementation
pub fn emission_router_generic<R, E>(repo: R, estimator: E) -> Router
where
    R: EmissionRecordRepository + Clone + Send + Sync + 'static,
    E: EmissionEstimator + Clone + Send + Sync + 'static,
{
    let state = EmissionAppState {
        repo: Arc::new(repo),
        estimator: Arc::new(estimator),
    };

    Router::new()
        .route(
            "/electricity-consumption",
            get(handlers::electricity_consumption::<R, E>),
        )
        .route("/fuel-combustion", get(handlers::fuel_combustion::<R, E>))
        .route(
            "/shipping-emissions",
            post(handlers::shipping_emissions::<R, E>),
        )
        .route(
            "/explosion-emissions",
            post(handlers::explosion_emissions::<R, E>),
        )
        .route("/coal-emission", post(handlers::coal_emission::<R, E>))
        .route("/methane-emission", post(handlers::methane_emission::<R, E>))
        .route("/data/{date}", get(handlers::records_for_date::<R, E>))
        .route(
            "/data/{start_date}/{end_date}",
            get(handlers::records_for_range::<R, E>),
        )
        .route("/delete/{id}", delete(handlers::delete_record::<R, E>))
        .route("/reports/past-day", get(handlers::past_day::<R, E>))
        .route("/reports/past-week", get(handlers::past_week::<R, E>))
        .with_state(state)
}
