//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::coal_burn::CoalBurnRequest;
use crate::application::electricity::ElectricityRequest;
use crate::application::explosion::ExplosionRequest;
use crate::application::fuel_combustion::FuelCombustionRequest;
use crate::application::methane::MethaneRequest;
use crate::application::shipping::ShippingRequest;
use crate::domain::entities::{CategoryRecords, EmissionRecord, PollutantTable};
use crate::domain::value_objects::AtmosphericConditions;

/// Query for GET /api/electricity-consumption
#[derive(Debug, Clone, Deserialize)]
pub struct ElectricityQuery {
    #[serde(rename = "stateName")]
    pub state_name: Option<String>,
    #[serde(rename = "values.EnergyperTime")]
    pub energy_per_time: Option<String>,
    #[serde(rename = "values.Responsiblearea")]
    pub responsible_area: Option<String>,
    #[serde(rename = "values.Totalarea")]
    pub total_area: Option<String>,
}

impl From<ElectricityQuery> for ElectricityRequest {
    fn from(q: ElectricityQuery) -> Self {
        Self {
            state_name: q.state_name,
            energy_per_time: q.energy_per_time.map(serde_json::Value::String),
            responsible_area: q.responsible_area.map(serde_json::Value::String),
            total_area: q.total_area.map(serde_json::Value::String),
        }
    }
}

/// Query for GET /api/fuel-combustion
#[derive(Debug, Clone, Deserialize)]
pub struct FuelCombustionQuery {
    pub fuel: Option<String>,
    #[serde(rename = "values.Volume")]
    pub volume: Option<String>,
}

impl From<FuelCombustionQuery> for FuelCombustionRequest {
    fn from(q: FuelCombustionQuery) -> Self {
        Self {
            fuel: q.fuel,
            volume: q.volume.map(serde_json::Value::String),
        }
    }
}

/// Response for the CarbonKit-backed calculations
#[derive(Debug, Clone, Serialize)]
pub struct PollutantResultResponse {
    pub result: PollutantTable,
}

/// Request for POST /api/shipping-emissions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShippingBody {
    pub weight_unit: Option<String>,
    pub weight_value: Option<serde_json::Value>,
    pub distance_unit: Option<String>,
    pub distance_value: Option<serde_json::Value>,
    pub transport_method: Option<String>,
}

impl From<ShippingBody> for ShippingRequest {
    fn from(b: ShippingBody) -> Self {
        Self {
            weight_unit: b.weight_unit,
            weight_value: b.weight_value,
            distance_unit: b.distance_unit,
            distance_value: b.distance_value,
            transport_method: b.transport_method,
        }
    }
}

/// Request for POST /api/explosion-emissions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplosionBody {
    pub explosive_type: Option<String>,
    pub amount: Option<serde_json::Value>,
}

impl From<ExplosionBody> for ExplosionRequest {
    fn from(b: ExplosionBody) -> Self {
        Self {
            explosive_type: b.explosive_type,
            amount: b.amount,
        }
    }
}

/// Request for POST /api/coal-emission
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoalBurnBody {
    pub coal_type: Option<String>,
    pub coal_consumption: Option<serde_json::Value>,
}

impl From<CoalBurnBody> for CoalBurnRequest {
    fn from(b: CoalBurnBody) -> Self {
        Self {
            coal_type: b.coal_type,
            coal_consumption: b.coal_consumption,
        }
    }
}

/// Request for POST /api/methane-emission
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethaneBody {
    pub mining_type: Option<String>,
    pub surface_coal_production: Option<f64>,
    pub surface_emission_factor: Option<f64>,
    pub underground_coal_production: Option<f64>,
    pub underground_emission_factor: Option<f64>,
    pub ventilation_emissions: Option<f64>,
    pub degasification_emissions: Option<f64>,
    pub atmospheric_conditions: Option<AtmosphericConditions>,
}

impl From<MethaneBody> for MethaneRequest {
    fn from(b: MethaneBody) -> Self {
        Self {
            mining_type: b.mining_type,
            surface_coal_production: b.surface_coal_production,
            surface_emission_factor: b.surface_emission_factor,
            underground_coal_production: b.underground_coal_production,
            underground_emission_factor: b.underground_emission_factor,
            ventilation_emissions: b.ventilation_emissions,
            degasification_emissions: b.degasification_emissions,
            atmospheric_conditions: b.atmospheric_conditions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethaneTotal {
    pub total_methane: f64,
}

/// Response for POST /api/methane-emission
#[derive(Debug, Clone, Serialize)]
pub struct MethaneResponse {
    pub success: bool,
    pub data: MethaneTotal,
}

/// Response for GET /api/data/{date}
#[derive(Debug, Clone, Serialize)]
pub struct DateRecordsResponse {
    pub date: String,
    #[serde(flatten)]
    pub records: CategoryRecords,
}

/// Response for DELETE /api/delete/{id}
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub data: EmissionRecord,
}

/// Response for GET /api/reports/past-day and past-week
#[derive(Debug, Clone, Serialize)]
pub struct PastRangeResponse {
    pub range: &'static str,
    pub data: CategoryRecords,
}
