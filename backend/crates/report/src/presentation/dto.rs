//! Request and response bodies

use chrono::{DateTime, Utc};
use emission::CategoryRecords;
use serde::{Deserialize, Serialize};
use sink::CarbonSink;

use crate::application::periodic_report::{NarrativeOutcome, PeriodicReport};
use crate::domain::narrative::Narrative;
use crate::domain::source::DataSource;
use crate::domain::summary::EmissionSummary;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisBody {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReportResponse {
    pub success: bool,
    pub range: &'static str,
    pub report: ReportBody,
    pub data: ReportData,
    pub failed_sources: Vec<DataSource>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReportBody {
    /// `success` when the narrative was written, `error` otherwise
    pub status: &'static str,
    pub summary: EmissionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportData {
    #[serde(flatten)]
    pub records: CategoryRecords,
    pub sinks: Vec<CarbonSink>,
}

impl From<PeriodicReport> for EnvironmentalReportResponse {
    fn from(report: PeriodicReport) -> Self {
        let body = match report.narrative {
            NarrativeOutcome::Written(narrative) => ReportBody {
                status: "success",
                summary: report.summary,
                html: Some(narrative.to_html()),
                narrative: Some(narrative),
                message: None,
            },
            NarrativeOutcome::Failed(message) => ReportBody {
                status: "error",
                summary: report.summary,
                narrative: None,
                html: None,
                message: Some(message),
            },
        };

        Self {
            success: true,
            range: report.range.label(),
            failed_sources: report.data.failed_sources,
            report: body,
            data: ReportData {
                records: report.data.records,
                sinks: report.data.sinks,
            },
            timestamp: report.generated_at,
        }
    }
}
