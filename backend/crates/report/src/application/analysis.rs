//! Emissions Analysis Use Case
//!
//! Forensic write-up of an explicit date range. Results built from every
//! source are cached per `"{startDate}-{endDate}"` exactly as the caller
//! spelled the dates.

use std::sync::Arc;

use kernel::time_window::TimeWindow;
use platform::cache::ExpiringCache;
use serde::Serialize;

use crate::application::collect_window::collect_window;
use crate::application::config::ReportSettings;
use crate::domain::prompt;
use crate::domain::provider::NarrativeProvider;
use crate::domain::source::ReportSource;
use crate::domain::summary::EmissionSummary;
use crate::error::{ReportError, ReportResult};

pub const MISSING_DATES_MESSAGE: &str = "Start and end dates are required.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionAnalysis {
    pub start_date: String,
    pub end_date: String,
    pub ai_analysis: String,
    pub emission_impact: EmissionSummary,
}

pub type AnalysisCache = ExpiringCache<String, EmissionAnalysis>;

pub fn cache_key(start_date: &str, end_date: &str) -> String {
    format!("{start_date}-{end_date}")
}

pub struct AnalyzeEmissionsUseCase<S, N>
where
    S: ReportSource + Sync,
    N: NarrativeProvider + Sync,
{
    source: Arc<S>,
    analyst: Arc<N>,
    cache: Arc<AnalysisCache>,
    settings: ReportSettings,
}

impl<S, N> AnalyzeEmissionsUseCase<S, N>
where
    S: ReportSource + Sync,
    N: NarrativeProvider + Sync,
{
    pub fn new(
        source: Arc<S>,
        analyst: Arc<N>,
        cache: Arc<AnalysisCache>,
        settings: ReportSettings,
    ) -> Self {
        Self {
            source,
            analyst,
            cache,
            settings,
        }
    }

    pub async fn execute(
        &self,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> ReportResult<EmissionAnalysis> {
        let (Some(start_date), Some(end_date)) = (
            start_date.filter(|d| !d.is_empty()),
            end_date.filter(|d| !d.is_empty()),
        ) else {
            return Err(ReportError::invalid_input(MISSING_DATES_MESSAGE));
        };

        let key = cache_key(&start_date, &end_date);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(cache_key = %key, "Serving cached emissions analysis");
            return Ok(cached);
        }

        let window = TimeWindow::from_date_strings(&start_date, &end_date)?;
        let data = collect_window(self.source.as_ref(), &window, self.settings.source_timeout).await?;
        let emission_impact = EmissionSummary::build(window, &data);

        let prompt = prompt::forensic_analysis(&start_date, &end_date, &emission_impact);
        let ai_analysis = self.analyst.generate(&prompt).await?;

        let analysis = EmissionAnalysis {
            start_date,
            end_date,
            ai_analysis,
            emission_impact,
        };
        // A partial window is served but not remembered.
        let complete = analysis.emission_impact.failed_sources.is_empty();
        if complete {
            self.cache
                .set(key.clone(), analysis.clone(), self.settings.analysis_ttl);
        }

        tracing::info!(
            cache_key = %key,
            cached = complete,
            impact = %analysis.emission_impact.impact_level,
            "Emissions analysis generated"
        );

        Ok(analysis)
    }
}
