//! Emission Estimator Port
//!
//! Calculations delegated to third-party providers. Implementations live in
//! the infrastructure layer; tests substitute canned estimators.

use serde::Serialize;

use crate::domain::entities::{PollutantTable, ShippingResult};
use crate::error::EmissionResult;

/// Grid electricity drawn by a state-connected site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricityInput {
    pub state_name: String,
    pub energy_per_time: f64,
    pub responsible_area: f64,
    pub total_area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelInput {
    pub fuel: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingInput {
    pub weight_unit: String,
    pub weight_value: f64,
    pub distance_unit: String,
    pub distance_value: f64,
    pub transport_method: String,
}

#[trait_variant::make(EmissionEstimator: Send)]
pub trait LocalEmissionEstimator {
    /// Daily pollutant amounts, unit `kg/day`
    async fn electricity(&self, input: &ElectricityInput) -> EmissionResult<PollutantTable>;

    /// Only the fuel methodology keys, with the provider's units
    async fn fuel_combustion(&self, input: &FuelInput) -> EmissionResult<PollutantTable>;

    async fn shipping(&self, input: &ShippingInput) -> EmissionResult<ShippingResult>;
}
