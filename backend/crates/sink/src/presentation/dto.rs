//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::register::RegisterSinkRequest;
use crate::application::required_land::RequiredLandRequest;
use crate::domain::entities::{CarbonSink, SinkRegistration};
use crate::domain::land::LandRequirement;

/// Request for POST /api/sinks and /api/existing-sinks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterSinkBody {
    pub name: Option<String>,
    pub vegetation_type: Option<String>,
    pub area_covered: Option<serde_json::Value>,
    pub carbon_sequestration_rate: Option<serde_json::Value>,
    pub location: Option<String>,
    pub additional_details: Option<String>,
    pub timeframe: Option<serde_json::Value>,
}

impl From<RegisterSinkBody> for RegisterSinkRequest {
    fn from(b: RegisterSinkBody) -> Self {
        Self {
            name: b.name,
            vegetation_type: b.vegetation_type,
            area_covered: b.area_covered,
            carbon_sequestration_rate: b.carbon_sequestration_rate,
            location: b.location,
            additional_details: b.additional_details,
            timeframe: b.timeframe,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterSinkResponse {
    pub message: &'static str,
    pub data: SinkRegistration,
}

/// Response for GET /api/sink/date/{date}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkDateResponse {
    pub date: String,
    pub sink_data: Vec<CarbonSink>,
}

/// Response for GET /api/sink/daterange/{startDate}/{endDate}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkRangeResponse {
    pub start_date: String,
    pub end_date: String,
    pub sink_data: Vec<CarbonSink>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSinkDateResponse {
    pub date: String,
    pub existing_sink_data: Vec<CarbonSink>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSinkRangeResponse {
    pub start_date: String,
    pub end_date: String,
    pub existing_sink_data: Vec<CarbonSink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteSinkResponse {
    pub message: &'static str,
    pub data: CarbonSink,
}

/// Request for POST /api/requiredland
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredLandBody {
    pub target_carbon_sequestration: Option<serde_json::Value>,
    pub land_type: Option<String>,
    pub forest_type: Option<String>,
    pub project_duration: Option<serde_json::Value>,
    pub soil_condition: Option<String>,
}

impl From<RequiredLandBody> for RequiredLandRequest {
    fn from(b: RequiredLandBody) -> Self {
        Self {
            target_carbon_sequestration: b.target_carbon_sequestration,
            land_type: b.land_type,
            forest_type: b.forest_type,
            project_duration: b.project_duration,
            soil_condition: b.soil_condition,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredLandResponse {
    pub message: &'static str,
    /// Suitability factor applied for the soil condition
    pub soil_efficiency: f64,
    pub data: LandRequirement,
}
