//! Carbon Sink Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - CarbonSink entity, land requirement calculator and ledger port
//! - `application/` - Register, fetch, delete and required-land use cases
//! - `infra/` - PostgreSQL ledger
//! - `presentation/` - HTTP handlers
//!
//! ## Ledgers
//! - Planned sinks: deletable only on the day they were registered
//! - Existing sinks: deletable any time; their absorption offsets
//!   emissions in reports

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::{CarbonSink, SinkKind, SinkRegistration};
pub use domain::land::{LandRequirement, LandType, SoilCondition};
pub use domain::repository::SinkRepository;
pub use error::{SinkError, SinkResult};
pub use infra::postgres::PgSinkRepository;
pub use presentation::router::{sink_router, sink_router_generic};

pub mod store {
    pub use crate::infra::postgres::PgSinkRepository as SinkStore;
}

#[cfg(test)]
mod tests;
