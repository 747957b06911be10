//! Fuel Combustion Use Case

use std::sync::Arc;

use crate::domain::entities::{
    EmissionPayload, EmissionRecord, FuelCombustionPayload, PollutantTable,
};
use crate::domain::estimator::{EmissionEstimator, FuelInput};
use crate::domain::repository::EmissionRecordRepository;
use crate::domain::value_objects::lenient_number;
use crate::error::{EmissionError, EmissionResult};

#[derive(Debug, Clone, Default)]
pub struct FuelCombustionRequest {
    pub fuel: Option<String>,
    pub volume: Option<serde_json::Value>,
}

pub struct CalculateFuelCombustionUseCase<R, E>
where
    R: EmissionRecordRepository,
    E: EmissionEstimator,
{
    repo: Arc<R>,
    estimator: Arc<E>,
}

impl<R, E> CalculateFuelCombustionUseCase<R, E>
where
    R: EmissionRecordRepository,
    E: EmissionEstimator,
{
    pub fn new(repo: Arc<R>, estimator: Arc<E>) -> Self {
        Self { repo, estimator }
    }

    pub async fn execute(&self, request: FuelCombustionRequest) -> EmissionResult<PollutantTable> {
        let invalid = || EmissionError::invalid_input("Invalid input: fuel and Volume are required.");
        let fuel = request
            .fuel
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(invalid)?;
        let volume = request
            .volume
            .as_ref()
            .and_then(lenient_number)
            .ok_or_else(invalid)?;

        let input = FuelInput { fuel, volume };
        let result = self.estimator.fuel_combustion(&input).await?;

        let record = EmissionRecord::new(EmissionPayload::FuelCombustion(FuelCombustionPayload {
            fuel: input.fuel,
            quantity_fuel_consumed: input.volume,
            result: result.clone(),
        }));
        self.repo.insert(&record).await?;

        tracing::info!(record_id = %record.id, "Fuel combustion emission recorded");

        Ok(result)
    }
}
