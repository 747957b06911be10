//! Methane Emission Use Case

use std::sync::Arc;

use crate::domain::entities::{EmissionPayload, EmissionRecord, MethanePayload};
use crate::domain::repository::EmissionRecordRepository;
use crate::domain::services::{MethaneInputs, total_methane};
use crate::domain::value_objects::{AtmosphericConditions, MiningType};
use crate::error::{EmissionError, EmissionResult};

#[derive(Debug, Clone, Default)]
pub struct MethaneRequest {
    pub mining_type: Option<String>,
    pub surface_coal_production: Option<f64>,
    pub surface_emission_factor: Option<f64>,
    pub underground_coal_production: Option<f64>,
    pub underground_emission_factor: Option<f64>,
    pub ventilation_emissions: Option<f64>,
    pub degasification_emissions: Option<f64>,
    pub atmospheric_conditions: Option<AtmosphericConditions>,
}

pub struct CalculateMethaneUseCase<R>
where
    R: EmissionRecordRepository,
{
    repo: Arc<R>,
}

impl<R> CalculateMethaneUseCase<R>
where
    R: EmissionRecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns total CH4 in kilograms
    pub async fn execute(&self, request: MethaneRequest) -> EmissionResult<f64> {
        let mining: MiningType = request
            .mining_type
            .as_deref()
            .ok_or(EmissionError::InvalidMiningType)?
            .parse()?;
        let conditions = request.atmospheric_conditions.ok_or_else(|| {
            EmissionError::invalid_input("Missing required input: atmosphericConditions")
        })?;

        // Only the fields for the chosen mining type are used and stored.
        let payload = match mining {
            MiningType::Surface => {
                let inputs = MethaneInputs {
                    coal_production: request.surface_coal_production,
                    emission_factor: request.surface_emission_factor,
                    ..Default::default()
                };
                MethanePayload {
                    mining_type: mining.as_str().to_string(),
                    surface_coal_production: request.surface_coal_production,
                    surface_emission_factor: request.surface_emission_factor,
                    atmospheric_conditions: conditions,
                    total_methane: total_methane(mining, &inputs, &conditions)?,
                    ..Default::default()
                }
            }
            MiningType::Underground => {
                let inputs = MethaneInputs {
                    coal_production: request.underground_coal_production,
                    emission_factor: request.underground_emission_factor,
                    ventilation_emissions: request.ventilation_emissions,
                    degasification_emissions: request.degasification_emissions,
                };
                MethanePayload {
                    mining_type: mining.as_str().to_string(),
                    underground_coal_production: request.underground_coal_production,
                    underground_emission_factor: request.underground_emission_factor,
                    ventilation_emissions: request.ventilation_emissions,
                    degasification_emissions: request.degasification_emissions,
                    atmospheric_conditions: conditions,
                    total_methane: total_methane(mining, &inputs, &conditions)?,
                    ..Default::default()
                }
            }
        };

        let total = payload.total_methane;
        let record = EmissionRecord::new(EmissionPayload::Methane(payload));
        self.repo.insert(&record).await?;

        tracing::info!(
            record_id = %record.id,
            mining = mining.as_str(),
            total_methane_kg = total,
            "Methane emission recorded"
        );

        Ok(total)
    }
}
