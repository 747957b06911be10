//! Coal Burn Use Case

use std::sync::Arc;

use crate::domain::entities::{CoalBurnPayload, EmissionPayload, EmissionRecord};
use crate::domain::repository::EmissionRecordRepository;
use crate::domain::services::{CARBON_OXIDATION_FACTOR, coal_co2_emissions};
use crate::domain::value_objects::{CoalType, lenient_number};
use crate::error::{EmissionError, EmissionResult};

pub const MISSING_COAL_MESSAGE: &str = "Missing required parameters: coalType, coalConsumption";

#[derive(Debug, Clone, Default)]
pub struct CoalBurnRequest {
    pub coal_type: Option<String>,
    pub coal_consumption: Option<serde_json::Value>,
}

pub struct CalculateCoalBurnUseCase<R>
where
    R: EmissionRecordRepository,
{
    repo: Arc<R>,
}

impl<R> CalculateCoalBurnUseCase<R>
where
    R: EmissionRecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: CoalBurnRequest) -> EmissionResult<CoalBurnPayload> {
        let missing = || EmissionError::invalid_input(MISSING_COAL_MESSAGE);
        let coal_type = request
            .coal_type
            .filter(|t| !t.is_empty())
            .ok_or_else(missing)?;
        // Zero consumption is treated as missing.
        let consumption = request
            .coal_consumption
            .as_ref()
            .and_then(lenient_number)
            .filter(|c| *c != 0.0)
            .ok_or_else(missing)?;
        let coal: CoalType = coal_type.parse()?;

        let payload = CoalBurnPayload {
            coal_type: coal.as_str().to_string(),
            coal_consumption: consumption,
            emission_factor: coal.emission_factor(),
            carbon_oxidation_factor: Some(CARBON_OXIDATION_FACTOR),
            co2_emissions: coal_co2_emissions(coal, consumption),
        };

        let record = EmissionRecord::new(EmissionPayload::CoalBurn(payload.clone()));
        self.repo.insert(&record).await?;

        tracing::info!(
            record_id = %record.id,
            coal = coal.as_str(),
            co2_kg = payload.co2_emissions,
            "Coal burn emission recorded"
        );

        Ok(payload)
    }
}
