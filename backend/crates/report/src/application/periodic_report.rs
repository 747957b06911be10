//! Periodic Report Use Case
//!
//! Daily, weekly, monthly or yearly report: collect the window, summarize
//! it and have the narrative provider write it up. A provider failure
//! still returns the figures.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::time_window::{NamedRange, TimeWindow};

use crate::application::collect_window::collect_window;
use crate::domain::narrative::Narrative;
use crate::domain::prompt;
use crate::domain::provider::NarrativeProvider;
use crate::domain::source::{ReportSource, WindowData};
use crate::domain::summary::EmissionSummary;
use crate::error::{ReportError, ReportResult};

/// Outcome of the narrative step
#[derive(Debug, Clone)]
pub enum NarrativeOutcome {
    Written(Narrative),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PeriodicReport {
    pub range: NamedRange,
    pub data: WindowData,
    pub summary: EmissionSummary,
    pub narrative: NarrativeOutcome,
    pub generated_at: DateTime<Utc>,
}

pub struct GenerateReportUseCase<S, N>
where
    S: ReportSource + Sync,
    N: NarrativeProvider + Sync,
{
    source: Arc<S>,
    writer: Arc<N>,
    source_timeout: Duration,
}

impl<S, N> GenerateReportUseCase<S, N>
where
    S: ReportSource + Sync,
    N: NarrativeProvider + Sync,
{
    pub fn new(source: Arc<S>, writer: Arc<N>, source_timeout: Duration) -> Self {
        Self {
            source,
            writer,
            source_timeout,
        }
    }

    /// Report for the path segment `daily`, `weekly`, `monthly` or `yearly`
    pub async fn for_slug(&self, slug: &str) -> ReportResult<PeriodicReport> {
        let range =
            NamedRange::from_slug(slug).ok_or_else(|| ReportError::UnknownRange(slug.to_string()))?;
        self.execute(range).await
    }

    pub async fn execute(&self, range: NamedRange) -> ReportResult<PeriodicReport> {
        let now = Utc::now();
        self.execute_for(range, range.window_ending_at(now), now).await
    }

    pub async fn execute_for(
        &self,
        range: NamedRange,
        window: TimeWindow,
        generated_at: DateTime<Utc>,
    ) -> ReportResult<PeriodicReport> {
        let data = collect_window(self.source.as_ref(), &window, self.source_timeout).await?;
        let summary = EmissionSummary::build(window, &data);

        let prompt = prompt::environmental_report(range.label(), &summary);
        let narrative = match self.writer.generate(&prompt).await {
            Ok(text) => NarrativeOutcome::Written(Narrative::parse(&text)),
            Err(e) => {
                tracing::error!(%range, error = %e, "Environmental report generation failed");
                NarrativeOutcome::Failed(e.to_string())
            }
        };

        tracing::info!(
            %range,
            net_emissions_t = summary.net_emissions,
            impact = %summary.impact_level,
            failed_sources = summary.failed_sources.len(),
            "Environmental report generated"
        );

        Ok(PeriodicReport {
            range,
            data,
            summary,
            narrative,
            generated_at,
        })
    }
}
