//! Emission Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Records, payload variants, formulas, ports
//! - `application/` - Use cases (one per calculation, fetch, delete)
//! - `infra/` - PostgreSQL store, CarbonKit and Carbon Interface clients
//! - `presentation/` - HTTP handlers
//!
//! ## Record Model
//! - Every calculation writes exactly one immutable record
//! - A provider failure saves nothing
//! - Deletion is limited to records created on the current calendar day

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::EmissionConfig;
pub use domain::entities::{
    CategoryRecords, EmissionCategory, EmissionPayload, EmissionRecord, PollutantTable,
};
pub use domain::repository::EmissionRecordRepository;
pub use error::{EmissionError, EmissionResult};
pub use infra::postgres::PgEmissionRepository;
pub use presentation::router::{emission_router, emission_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgEmissionRepository as EmissionStore;
}
