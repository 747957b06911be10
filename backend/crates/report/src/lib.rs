//! Environmental Report Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Normalization, aggregation, impact summary, narrative
//! - `application/` - Window collection, periodic reports, cached analyses
//! - `infra/` - Store-backed source, Gemini and Cohere clients
//! - `presentation/` - HTTP handlers
//!
//! ## Aggregation
//! - Every stored amount is converted to metric tons before summing
//! - A source that fails or times out is listed in `failedSources`;
//!   the request fails only when all of them do
//! - Existing sinks offset the CO2 total; methane is reported separately

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::analysis::{AnalysisCache, EmissionAnalysis};
pub use application::config::{ReportConfig, ReportSettings};
pub use domain::provider::NarrativeProvider;
pub use domain::source::{DataSource, ReportSource};
pub use domain::summary::{EmissionSummary, ImpactLevel};
pub use error::{ReportError, ReportResult};
pub use infra::narrative::HttpNarrativeProvider;
pub use infra::repository_source::RepositorySource;
pub use presentation::router::{report_router, report_router_generic};

#[cfg(test)]
mod tests;
