//! Sink Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::domain::repository::SinkRepository;
use crate::infra::postgres::PgSinkRepository;
use crate::presentation::handlers::{self, SinkAppState};

/// Create the sink router with PostgreSQL storage
pub fn sink_router(repo: PgSinkRepository) -> Router {
    sink_router_generic(repo)
}

/// Create a sink router for any repository implementation
pub fn sink_router_generic<R>(repo: R) -> Router
where
    R: SinkRepository + Clone + Send + Sync + 'static,
{
    let state = SinkAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/sinks", post(handlers::create_sink::<R>))
        .route("/existing-sinks", post(handlers::create_existing_sink::<R>))
        .route("/sink/date/{date}", get(handlers::sinks_for_date::<R>))
        .route(
            "/sink/daterange/{start_date}/{end_date}",
            get(handlers::sinks_for_range::<R>),
        )
        .route("/sink/{id}", delete(handlers::delete_sink::<R>))
        .route(
            "/existingsinks/date/{date}",
            get(handlers::existing_sinks_for_date::<R>),
        )
        .route(
            "/existingsinks/date-range/{start_date}/{end_date}",
            get(handlers::existing_sinks_for_range::<R>),
        )
        .route(
            "/existingsinks/{id}",
            delete(handlers::delete_existing_sink::<R>),
        )
        .route("/requiredland", post(handlers::required_land::<R>))
        .with_state(state)
}
