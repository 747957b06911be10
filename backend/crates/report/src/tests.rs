//! Cross-module tests for the report crate
//!
//! Reports and analyses run against an in-memory source and a canned
//! narrative provider.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use emission::models::{
    ElectricityPayload, EmissionPayload, ExplosionPayload, Measurement, PollutantTable,
};
use emission::{CategoryRecords, EmissionCategory, EmissionError, EmissionRecord};
use kernel::id::SinkId;
use kernel::time_window::TimeWindow;
use platform::http::UpstreamError;
use sink::{CarbonSink, SinkKind};

use crate::application::analysis::AnalysisCache;
use crate::application::config::ReportSettings;
use crate::domain::provider::NarrativeProvider;
use crate::domain::source::{DataSource, ReportSource};
use crate::error::{ReportError, ReportResult};

#[derive(Clone, Default)]
struct MemorySource {
    records: CategoryRecords,
    sinks: Vec<CarbonSink>,
    failing: HashSet<DataSource>,
    stalled: HashSet<DataSource>,
}

impl MemorySource {
    fn failing_all() -> Self {
        Self {
            failing: DataSource::ALL.into_iter().collect(),
            ..Default::default()
        }
    }

    async fn gate(&self, source: DataSource) -> ReportResult<()> {
        if self.stalled.contains(&source) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.contains(&source) {
            return Err(EmissionError::Internal(format!("{source} store offline")).into());
        }
        Ok(())
    }
}

impl ReportSource for MemorySource {
    async fn emission_records(
        &self,
        category: EmissionCategory,
        window: &TimeWindow,
    ) -> ReportResult<Vec<EmissionRecord>> {
        self.gate(DataSource::Emissions(category)).await?;
        Ok(self
            .records
            .get(category)
            .iter()
            .filter(|r| window.contains(r.created_at))
            .cloned()
            .collect())
    }

    async fn existing_sinks(&self, window: &TimeWindow) -> ReportResult<Vec<CarbonSink>> {
        self.gate(DataSource::ExistingSinks).await?;
        Ok(self
            .sinks
            .iter()
            .filter(|s| window.contains(s.created_at))
            .cloned()
            .collect())
    }
}

#[derive(Clone)]
struct CannedProvider {
    reply: Option<&'static str>,
    prompts: Arc<AtomicUsize>,
}

impl CannedProvider {
    fn answering(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            prompts: Arc::default(),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            prompts: Arc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl NarrativeProvider for CannedProvider {
    async fn generate(&self, _prompt: &str) -> ReportResult<String> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Some(text) => Ok(text.to_string()),
            None => Err(ReportError::Upstream(UpstreamError::Status {
                service: "Gemini",
                status: 503,
                detail: "overloaded".to_string(),
            })),
        }
    }
}

const NARRATIVE: &str = "**Executive Summary**\n\nEmissions are moderate.\n\n- Cut diesel use\n- Expand grassland";

fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

fn electricity_at(co2_kg: f64, created_at: DateTime<Utc>) -> EmissionRecord {
    let mut result = PollutantTable::new();
    result.insert("CO2", Measurement::new(co2_kg, "kg/day"));
    EmissionRecord::new_at(
        EmissionPayload::Electricity(ElectricityPayload {
            state_name: "Jharkhand".to_string(),
            energy_per_time: 1200.0,
            responsible_area: 50.0,
            total_area: 100.0,
            result,
        }),
        created_at,
    )
}

fn explosion_at(co2: &str, created_at: DateTime<Utc>) -> EmissionRecord {
    EmissionRecord::new_at(
        EmissionPayload::Explosion(ExplosionPayload {
            explosive_type: "ANFO".to_string(),
            amount: 100.0,
            emissions: [("CO2".to_string(), co2.to_string())].into(),
        }),
        created_at,
    )
}

fn existing_sink_at(daily_rate: f64, area: f64, created_at: DateTime<Utc>) -> CarbonSink {
    CarbonSink {
        id: SinkId::new(),
        kind: SinkKind::Existing,
        name: "Reclaimed dump".to_string(),
        vegetation_type: None,
        area_covered: area,
        carbon_sequestration_rate: daily_rate * 365.0,
        daily_sequestration_rate: Some(daily_rate),
        location: None,
        additional_details: None,
        created_at,
    }
}

/// 0.5 t electricity CO2 + 0.5 t explosion CO2, 6 t/day absorbed
fn scenario_at(created_at: DateTime<Utc>) -> MemorySource {
    MemorySource {
        records: CategoryRecords {
            electricity: vec![electricity_at(500.0, created_at)],
            explosion: vec![explosion_at("0.5000 tons", created_at)],
            ..Default::default()
        },
        sinks: vec![existing_sink_at(2.0, 3.0, created_at)],
        ..Default::default()
    }
}

fn settings() -> ReportSettings {
    ReportSettings {
        source_timeout: Duration::from_secs(5),
        analysis_ttl: Duration::from_secs(60),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

mod collection_tests {
    use super::*;
    use crate::application::collect_window::collect_window;

    fn window() -> TimeWindow {
        TimeWindow::from_date_strings("2024-05-10", "2024-05-10").unwrap()
    }

    #[tokio::test]
    async fn test_failed_source_is_listed() {
        let mut source = scenario_at(local_noon(2024, 5, 10));
        source
            .failing
            .insert(DataSource::Emissions(EmissionCategory::Explosion));

        let data = collect_window(&source, &window(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(
            data.failed_sources,
            vec![DataSource::Emissions(EmissionCategory::Explosion)]
        );
        assert!(data.records.explosion.is_empty());
        assert_eq!(data.records.electricity.len(), 1);
        assert_eq!(data.sinks.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_times_out() {
        let mut source = scenario_at(local_noon(2024, 5, 10));
        source.stalled.insert(DataSource::ExistingSinks);

        let data = collect_window(&source, &window(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(data.failed_sources, vec![DataSource::ExistingSinks]);
        assert!(data.sinks.is_empty());
        assert_eq!(data.records.total_len(), 2);
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_an_error() {
        let result =
            collect_window(&MemorySource::failing_all(), &window(), Duration::from_secs(5)).await;
        assert!(matches!(result, Err(ReportError::AllSourcesFailed)));
    }
}

mod use_case_tests {
    use super::*;
    use crate::application::analysis::{AnalyzeEmissionsUseCase, MISSING_DATES_MESSAGE};
    use crate::application::periodic_report::{GenerateReportUseCase, NarrativeOutcome};
    use crate::domain::narrative::NarrativeBlock;
    use crate::domain::summary::ImpactLevel;
    use kernel::time_window::NamedRange;

    #[tokio::test]
    async fn test_daily_report_nets_sinks_against_co2() {
        let source = scenario_at(Utc::now() - chrono::Duration::hours(1));
        let writer = CannedProvider::answering(NARRATIVE);
        let use_case = GenerateReportUseCase::new(
            Arc::new(source),
            Arc::new(writer.clone()),
            Duration::from_secs(5),
        );

        let report = use_case.execute(NamedRange::Daily).await.unwrap();

        assert!(close(report.summary.total_of("CO2"), 1.0));
        assert!(close(report.summary.co2_by_source.total, 1.0));
        assert!(close(report.summary.sink_absorption, 6.0));
        assert!(close(report.summary.net_emissions, -5.0));
        assert_eq!(report.summary.sink_count, 1);
        assert_eq!(report.summary.impact_level, ImpactLevel::Low);
        assert_eq!(writer.calls(), 1);

        let NarrativeOutcome::Written(narrative) = report.narrative else {
            panic!("narrative should be written");
        };
        assert_eq!(
            narrative.blocks[0],
            NarrativeBlock::Heading("Executive Summary".to_string())
        );
        assert!(matches!(&narrative.blocks[2], NarrativeBlock::Bullets(items) if items.len() == 2));
    }

    #[tokio::test]
    async fn test_old_records_fall_outside_the_daily_window() {
        let source = scenario_at(Utc::now() - chrono::Duration::days(3));
        let use_case = GenerateReportUseCase::new(
            Arc::new(source),
            Arc::new(CannedProvider::answering(NARRATIVE)),
            Duration::from_secs(5),
        );

        let daily = use_case.execute(NamedRange::Daily).await.unwrap();
        assert_eq!(daily.summary.total_of("CO2"), 0.0);

        let weekly = use_case.execute(NamedRange::Weekly).await.unwrap();
        assert!(close(weekly.summary.total_of("CO2"), 1.0));
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_the_figures() {
        let use_case = GenerateReportUseCase::new(
            Arc::new(scenario_at(Utc::now())),
            Arc::new(CannedProvider::failing()),
            Duration::from_secs(5),
        );

        let report = use_case.execute(NamedRange::Monthly).await.unwrap();

        assert!(matches!(report.narrative, NarrativeOutcome::Failed(_)));
        assert!(close(report.summary.net_emissions, -5.0));
    }

    #[tokio::test]
    async fn test_unknown_range() {
        let use_case = GenerateReportUseCase::new(
            Arc::new(MemorySource::default()),
            Arc::new(CannedProvider::answering(NARRATIVE)),
            Duration::from_secs(5),
        );
        let err = use_case.for_slug("hourly").await.unwrap_err();
        assert!(matches!(err, ReportError::UnknownRange(slug) if slug == "hourly"));
    }

    fn analysis_use_case(
        source: MemorySource,
        analyst: &CannedProvider,
        cache: &Arc<AnalysisCache>,
    ) -> AnalyzeEmissionsUseCase<MemorySource, CannedProvider> {
        AnalyzeEmissionsUseCase::new(
            Arc::new(source),
            Arc::new(analyst.clone()),
            cache.clone(),
            settings(),
        )
    }

    #[tokio::test]
    async fn test_analysis_is_cached_per_date_pair() {
        let analyst = CannedProvider::answering("Explosions drove most CO2.");
        let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
        let use_case = analysis_use_case(scenario_at(local_noon(2024, 5, 10)), &analyst, &cache);

        let first = use_case
            .execute(Some("2024-05-10".into()), Some("2024-05-10".into()))
            .await
            .unwrap();
        let second = use_case
            .execute(Some("2024-05-10".into()), Some("2024-05-10".into()))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(analyst.calls(), 1);
        assert!(cache.has("2024-05-10-2024-05-10"));
        assert_eq!(first.ai_analysis, "Explosions drove most CO2.");
        assert!(close(first.emission_impact.net_emissions, -5.0));
    }

    #[tokio::test]
    async fn test_analysis_requires_both_dates() {
        let analyst = CannedProvider::answering("unused");
        let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
        let use_case = analysis_use_case(MemorySource::default(), &analyst, &cache);

        let err = use_case
            .execute(Some("2024-05-10".into()), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::InvalidInput(ref m) if m == MISSING_DATES_MESSAGE));
        assert_eq!(analyst.calls(), 0);
    }

    #[tokio::test]
    async fn test_partial_analysis_is_not_cached() {
        let analyst = CannedProvider::answering("Explosions drove most CO2.");
        let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
        let mut degraded = scenario_at(local_noon(2024, 5, 10));
        degraded
            .failing
            .insert(DataSource::Emissions(EmissionCategory::Explosion));

        let partial = analysis_use_case(degraded, &analyst, &cache)
            .execute(Some("2024-05-10".into()), Some("2024-05-10".into()))
            .await
            .unwrap();
        assert_eq!(
            partial.emission_impact.failed_sources,
            vec![DataSource::Emissions(EmissionCategory::Explosion)]
        );
        assert!(cache.is_empty());

        let healthy = analysis_use_case(scenario_at(local_noon(2024, 5, 10)), &analyst, &cache)
            .execute(Some("2024-05-10".into()), Some("2024-05-10".into()))
            .await
            .unwrap();
        assert!(healthy.emission_impact.failed_sources.is_empty());
        assert!(close(healthy.emission_impact.total_of("CO2"), 1.0));
        assert_eq!(analyst.calls(), 2);
        assert!(cache.has("2024-05-10-2024-05-10"));
    }

    #[tokio::test]
    async fn test_analysis_provider_failure_is_not_cached() {
        let analyst = CannedProvider::failing();
        let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
        let use_case = analysis_use_case(scenario_at(local_noon(2024, 5, 10)), &analyst, &cache);

        let err = use_case
            .execute(Some("2024-05-10".into()), Some("2024-05-11".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Upstream(_)));
        assert!(cache.is_empty());
    }
}

mod router_tests {
    use super::*;
    use crate::presentation::router::report_router_generic;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app(source: MemorySource, reporter: CannedProvider) -> axum::Router {
        report_router_generic(
            source,
            reporter,
            CannedProvider::answering("Analysis text."),
            Arc::new(AnalysisCache::new(Duration::from_secs(60))),
            settings(),
        )
    }

    #[tokio::test]
    async fn test_environmental_report_route() {
        let (status, body) = send(
            app(scenario_at(Utc::now()), CannedProvider::answering(NARRATIVE)),
            get("/environmental-reports/weekly"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["range"], "Weekly");
        assert_eq!(body["report"]["status"], "success");
        assert_eq!(body["report"]["narrative"]["blocks"][0]["type"], "heading");
        assert!(
            body["report"]["html"]
                .as_str()
                .unwrap()
                .starts_with("<h3>Executive Summary</h3>")
        );
        assert_eq!(body["data"]["electricity"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["sinks"].as_array().unwrap().len(), 1);
        assert_eq!(body["failedSources"], json!([]));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_report_with_failed_narrative_and_source() {
        let mut source = scenario_at(Utc::now());
        source
            .failing
            .insert(DataSource::Emissions(EmissionCategory::Methane));

        let (status, body) = send(
            app(source, CannedProvider::failing()),
            get("/environmental-reports/daily"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["status"], "error");
        assert!(body["report"]["message"].is_string());
        assert!(body["report"].get("narrative").is_none());
        assert_eq!(body["failedSources"], json!(["methane"]));
    }

    #[tokio::test]
    async fn test_unknown_range_route() {
        let (status, body) = send(
            app(MemorySource::default(), CannedProvider::answering(NARRATIVE)),
            get("/environmental-reports/hourly"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Unknown report range: hourly");
    }

    #[tokio::test]
    async fn test_all_sources_failing_route() {
        let (status, _) = send(
            app(MemorySource::failing_all(), CannedProvider::answering(NARRATIVE)),
            get("/environmental-reports/daily"),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_analysis_route() {
        let (status, body) = send(
            app(scenario_at(local_noon(2024, 5, 10)), CannedProvider::answering(NARRATIVE)),
            post_json(
                "/genai/emissions-analysis",
                json!({ "startDate": "2024-05-10", "endDate": "2024-05-10" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["startDate"], "2024-05-10");
        assert_eq!(body["aiAnalysis"], "Analysis text.");
        assert_eq!(body["emissionImpact"]["co2BySource"]["total"], 1.0);
        assert_eq!(body["emissionImpact"]["netEmissions"], -5.0);
    }

    #[tokio::test]
    async fn test_analysis_route_validation() {
        let (status, body) = send(
            app(MemorySource::default(), CannedProvider::answering(NARRATIVE)),
            post_json("/genai/emissions-analysis", json!({ "startDate": "2024-05-10" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Start and end dates are required.");

        let (status, body) = send(
            app(MemorySource::default(), CannedProvider::answering(NARRATIVE)),
            post_json(
                "/genai/emissions-analysis",
                json!({ "startDate": "2024-05-12", "endDate": "2024-05-10" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Start date must be before or equal to end date.");
    }
}
