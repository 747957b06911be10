//! Cross-module tests for the sink crate

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use kernel::id::SinkId;
use kernel::time_window::TimeWindow;

use crate::domain::entities::{CarbonSink, SinkKind};
use crate::domain::land::LandCalculation;
use crate::domain::repository::SinkRepository;
use crate::error::SinkResult;

#[derive(Clone, Default)]
struct MemoryRepo {
    sinks: Arc<Mutex<Vec<CarbonSink>>>,
    calculations: Arc<Mutex<Vec<LandCalculation>>>,
}

impl MemoryRepo {
    fn with(sinks: Vec<CarbonSink>) -> Self {
        Self {
            sinks: Arc::new(Mutex::new(sinks)),
            ..Default::default()
        }
    }

    fn all(&self) -> Vec<CarbonSink> {
        self.sinks.lock().unwrap().clone()
    }

    fn calculations(&self) -> Vec<LandCalculation> {
        self.calculations.lock().unwrap().clone()
    }
}

impl SinkRepository for MemoryRepo {
    async fn insert(&self, sink: &CarbonSink) -> SinkResult<()> {
        self.sinks.lock().unwrap().push(sink.clone());
        Ok(())
    }

    async fn find_in_window(
        &self,
        kind: SinkKind,
        window: &TimeWindow,
    ) -> SinkResult<Vec<CarbonSink>> {
        let mut found: Vec<_> = self
            .sinks
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.kind == kind && window.contains(s.created_at))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.created_at);
        Ok(found)
    }

    async fn delete(
        &self,
        kind: SinkKind,
        id: SinkId,
        within: Option<&TimeWindow>,
    ) -> SinkResult<Option<CarbonSink>> {
        let mut sinks = self.sinks.lock().unwrap();
        let position = sinks.iter().position(|s| {
            s.id == id && s.kind == kind && within.is_none_or(|w| w.contains(s.created_at))
        });
        Ok(position.map(|i| sinks.remove(i)))
    }

    async fn record_land_calculation(&self, calculation: &LandCalculation) -> SinkResult<()> {
        self.calculations.lock().unwrap().push(calculation.clone());
        Ok(())
    }
}

fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

fn sink_at(kind: SinkKind, created_at: DateTime<Utc>) -> CarbonSink {
    CarbonSink {
        id: SinkId::new(),
        kind,
        name: "Spoil heap grassland".to_string(),
        vegetation_type: Some("Grassland".to_string()),
        area_covered: 4.0,
        carbon_sequestration_rate: 3.65,
        daily_sequestration_rate: Some(0.01),
        location: Some("Pit 2".to_string()),
        additional_details: None,
        created_at,
    }
}

mod use_case_tests {
    use super::*;
    use crate::application::delete::DeleteSinkUseCase;
    use crate::application::fetch::FetchSinksUseCase;
    use crate::application::register::{RegisterSinkRequest, RegisterSinkUseCase};
    use crate::application::required_land::{
        INVALID_LAND_TYPE_MESSAGE, RequiredLandRequest, RequiredLandUseCase,
    };
    use crate::domain::land::{ForestType, LandType, SoilCondition};
    use crate::error::SinkError;
    use serde_json::json;

    fn request(area: serde_json::Value, rate: serde_json::Value) -> RegisterSinkRequest {
        RegisterSinkRequest {
            name: Some("Eastern belt".to_string()),
            vegetation_type: Some("Forest".to_string()),
            area_covered: Some(area),
            carbon_sequestration_rate: Some(rate),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_stores_per_hectare_daily_rate() {
        let repo = MemoryRepo::default();
        let registration = RegisterSinkUseCase::new(Arc::new(repo.clone()))
            .execute(SinkKind::Existing, request(json!(10), json!("7.3")))
            .await
            .unwrap();

        let stored = repo.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, SinkKind::Existing);
        assert!((stored[0].daily_sequestration_rate.unwrap() - 0.02).abs() < 1e-12);
        assert_eq!(
            registration.daily_sequestration_rate,
            "0.20 tons of CO2 per day"
        );
        assert_eq!(
            registration.total_sequestration,
            "73.00 tons of CO2 over 1 year(s)"
        );
    }

    #[tokio::test]
    async fn test_register_reports_whole_area_daily_absorption() {
        let registration = RegisterSinkUseCase::new(Arc::new(MemoryRepo::default()))
            .execute(SinkKind::Planned, request(json!(50), json!(73)))
            .await
            .unwrap();
        // 0.2 t per hectare per day over 50 hectares
        assert_eq!(registration.daily_sequestration_rate, "10.00 tons of CO2 per day");
    }

    #[tokio::test]
    async fn test_register_uses_timeframe() {
        let repo = MemoryRepo::default();
        let mut req = request(json!(2), json!(5));
        req.timeframe = Some(json!(3));
        let registration = RegisterSinkUseCase::new(Arc::new(repo))
            .execute(SinkKind::Planned, req)
            .await
            .unwrap();
        assert_eq!(
            registration.total_sequestration,
            "30.00 tons of CO2 over 3 year(s)"
        );
    }

    #[tokio::test]
    async fn test_register_rejects_missing_area() {
        let repo = MemoryRepo::default();
        let mut req = request(json!(1), json!(1));
        req.area_covered = None;
        let result = RegisterSinkUseCase::new(Arc::new(repo.clone()))
            .execute(SinkKind::Planned, req)
            .await;
        assert!(matches!(result, Err(SinkError::InvalidInput(_))));
        assert!(repo.all().is_empty());
    }

    fn land_request(target: serde_json::Value, land: &str) -> RequiredLandRequest {
        RequiredLandRequest {
            target_carbon_sequestration: Some(target),
            land_type: Some(land.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_required_land_defaults_and_records() {
        let repo = MemoryRepo::default();
        let mut req = land_request(json!("120"), "forest");
        req.forest_type = Some("tropical".to_string());
        let calculation = RequiredLandUseCase::new(Arc::new(repo.clone()))
            .execute(req)
            .await
            .unwrap();

        assert_eq!(calculation.land_type, LandType::Forest(ForestType::Tropical));
        assert_eq!(calculation.soil_condition, SoilCondition::Ideal);
        assert_eq!(calculation.project_duration, 20.0);
        assert_eq!(calculation.result.required_land, 12.0);
        assert!((calculation.result.total_carbon_sequestered - 2400.0).abs() < 1e-9);

        let stored = repo.calculations();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, calculation.id);
    }

    #[tokio::test]
    async fn test_required_land_applies_soil_and_duration() {
        let mut req = land_request(json!(30), "wetland");
        req.soil_condition = Some("marginally_suitable".to_string());
        req.project_duration = Some(json!(5));
        let calculation = RequiredLandUseCase::new(Arc::new(MemoryRepo::default()))
            .execute(req)
            .await
            .unwrap();

        // 30 / (4 * 0.5) = 15 hectares
        assert_eq!(calculation.result.required_land, 15.0);
        assert_eq!(calculation.result.sequestration_rate, 4.0);
        assert!((calculation.result.total_carbon_sequestered - 150.0).abs() < 1e-9);
        assert!((calculation.result.land_utilization_efficiency - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_required_land_rejects_bad_input() {
        let repo = MemoryRepo::default();
        let use_case = RequiredLandUseCase::new(Arc::new(repo.clone()));

        let err = use_case
            .execute(land_request(json!(10), "forest"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_LAND_TYPE_MESSAGE);

        let err = use_case
            .execute(land_request(json!(10), "desert"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_LAND_TYPE_MESSAGE);

        let err = use_case
            .execute(land_request(json!(0), "grassland"))
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::InvalidInput(_)));

        let mut req = land_request(json!(10), "grassland");
        req.project_duration = Some(json!(-2));
        assert!(use_case.execute(req).await.is_err());

        assert!(repo.calculations().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_filters_by_kind_and_day() {
        let repo = MemoryRepo::with(vec![
            sink_at(SinkKind::Existing, local_noon(2024, 3, 1)),
            sink_at(SinkKind::Planned, local_noon(2024, 3, 1)),
            sink_at(SinkKind::Existing, local_noon(2024, 3, 2)),
        ]);
        let fetch = FetchSinksUseCase::new(Arc::new(repo));

        let day = fetch.for_date(SinkKind::Existing, "2024-03-01").await.unwrap();
        assert_eq!(day.len(), 1);

        let range = fetch
            .for_date_range(SinkKind::Existing, "2024-03-01", "2024-03-02")
            .await
            .unwrap();
        assert_eq!(range.len(), 2);
        assert!(range[0].created_at < range[1].created_at);
    }

    #[tokio::test]
    async fn test_planned_delete_only_today() {
        let old = sink_at(SinkKind::Planned, Utc::now() - Duration::days(2));
        let fresh = sink_at(SinkKind::Planned, Utc::now());
        let repo = MemoryRepo::with(vec![old.clone(), fresh.clone()]);
        let delete = DeleteSinkUseCase::new(Arc::new(repo.clone()));

        let err = delete
            .execute(SinkKind::Planned, &old.id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::NotFound(SinkKind::Planned)));

        let deleted = delete
            .execute(SinkKind::Planned, &fresh.id.to_string())
            .await
            .unwrap();
        assert_eq!(deleted.id, fresh.id);
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_delete_any_day() {
        let old = sink_at(SinkKind::Existing, Utc::now() - Duration::days(400));
        let repo = MemoryRepo::with(vec![old.clone()]);
        let delete = DeleteSinkUseCase::new(Arc::new(repo.clone()));

        delete
            .execute(SinkKind::Existing, &old.id.to_string())
            .await
            .unwrap();
        assert!(repo.all().is_empty());

        let err = delete.execute(SinkKind::Existing, "not-an-id").await.unwrap_err();
        assert!(matches!(err, SinkError::NotFound(SinkKind::Existing)));
    }
}

mod router_tests {
    use super::*;
    use crate::presentation::router::sink_router_generic;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
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

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_existing_sink_route() {
        let repo = MemoryRepo::default();
        let (status, body) = send(
            sink_router_generic(repo.clone()),
            post_json(
                "/existing-sinks",
                json!({
                    "name": "Tailings wetland",
                    "vegetationType": "Wetland",
                    "areaCovered": 36.5,
                    "carbonSequestrationRate": 10,
                    "location": "North dam",
                    "timeframe": 2
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Existing carbon sink created successfully");
        assert_eq!(
            body["data"]["dailySequestrationRate"],
            "1.00 tons of CO2 per day"
        );
        assert_eq!(
            body["data"]["totalSequestration"],
            "730.00 tons of CO2 over 2 year(s)"
        );
        assert_eq!(body["data"]["sink"]["name"], "Tailings wetland");
        assert_eq!(repo.all()[0].kind, SinkKind::Existing);
    }

    #[tokio::test]
    async fn test_create_sink_without_name_is_bad_request() {
        let (status, body) = send(
            sink_router_generic(MemoryRepo::default()),
            post_json("/sinks", json!({ "areaCovered": 1, "carbonSequestrationRate": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is required");
    }

    #[tokio::test]
    async fn test_fetch_routes_use_ledger_keys() {
        let repo = MemoryRepo::with(vec![
            sink_at(SinkKind::Planned, local_noon(2024, 5, 10)),
            sink_at(SinkKind::Existing, local_noon(2024, 5, 10)),
            sink_at(SinkKind::Existing, local_noon(2024, 5, 11)),
        ]);

        let (status, body) = send(sink_router_generic(repo.clone()), get("/sink/date/2024-05-10")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2024-05-10");
        assert_eq!(body["sinkData"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            sink_router_generic(repo),
            get("/existingsinks/date-range/2024-05-10/2024-05-11"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["startDate"], "2024-05-10");
        assert_eq!(body["existingSinkData"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_inverted_range_route() {
        let (status, body) = send(
            sink_router_generic(MemoryRepo::default()),
            get("/sink/daterange/2024-05-11/2024-05-10"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Start date must be before or equal to end date.");
    }

    #[tokio::test]
    async fn test_delete_routes() {
        let planned = sink_at(SinkKind::Planned, Utc::now() - Duration::days(3));
        let existing = sink_at(SinkKind::Existing, Utc::now() - Duration::days(3));
        let repo = MemoryRepo::with(vec![planned.clone(), existing.clone()]);

        let (status, body) = send(
            sink_router_generic(repo.clone()),
            delete(&format!("/sink/{}", planned.id)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Sink entry not found for the current day.");

        let (status, body) = send(
            sink_router_generic(repo.clone()),
            delete(&format!("/existingsinks/{}", existing.id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "ExistingSink entry deleted successfully.");
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn test_required_land_route() {
        let repo = MemoryRepo::default();
        let (status, body) = send(
            sink_router_generic(repo.clone()),
            post_json(
                "/requiredland",
                json!({
                    "targetCarbonSequestration": 70,
                    "landType": "mangrove",
                    "soilCondition": "unsuitable",
                    "projectDuration": 10
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Calculation Successful");
        assert_eq!(body["soilEfficiency"], 0.2);
        // 70 / 2.8 = 25 hectares
        assert_eq!(body["data"]["requiredLand"], 25.0);
        assert_eq!(body["data"]["sequestrationRate"], 14.0);
        assert_eq!(repo.calculations().len(), 1);
    }

    #[tokio::test]
    async fn test_required_land_route_rejects_unknown_forest() {
        let (status, body) = send(
            sink_router_generic(MemoryRepo::default()),
            post_json(
                "/requiredland",
                json!({
                    "targetCarbonSequestration": 70,
                    "landType": "forest",
                    "forestType": "cloud"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid land type or forest type. Please check your inputs."
        );
    }
}
