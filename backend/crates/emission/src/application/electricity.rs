//! Electricity Consumption Use Case

use std::sync::Arc;

use crate::domain::entities::{
    ElectricityPayload, EmissionPayload, EmissionRecord, PollutantTable,
};
use crate::domain::estimator::{ElectricityInput, EmissionEstimator};
use crate::domain::repository::EmissionRecordRepository;
use crate::domain::value_objects::lenient_number;
use crate::error::{EmissionError, EmissionResult};

/// Raw request values, as received
#[derive(Debug, Clone, Default)]
pub struct ElectricityRequest {
    pub state_name: Option<String>,
    pub energy_per_time: Option<serde_json::Value>,
    pub responsible_area: Option<serde_json::Value>,
    pub total_area: Option<serde_json::Value>,
}

impl ElectricityRequest {
    fn validate(self) -> EmissionResult<ElectricityInput> {
        let invalid = || {
            EmissionError::invalid_input(
                "Invalid input: stateName, EnergyperTime, Responsiblearea and Totalarea are required.",
            )
        };
        let number = |v: Option<serde_json::Value>| v.as_ref().and_then(lenient_number);

        let state_name = self
            .state_name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(invalid)?;
        Ok(ElectricityInput {
            state_name,
            energy_per_time: number(self.energy_per_time).ok_or_else(invalid)?,
            responsible_area: number(self.responsible_area).ok_or_else(invalid)?,
            total_area: number(self.total_area).ok_or_else(invalid)?,
        })
    }
}

pub struct CalculateElectricityUseCase<R, E>
where
    R: EmissionRecordRepository,
    E: EmissionEstimator,
{
    repo: Arc<R>,
    estimator: Arc<E>,
}

impl<R, E> CalculateElectricityUseCase<R, E>
where
    R: EmissionRecordRepository,
    E: EmissionEstimator,
{
    pub fn new(repo: Arc<R>, estimator: Arc<E>) -> Self {
        Self { repo, estimator }
    }

    pub async fn execute(&self, request: ElectricityRequest) -> EmissionResult<PollutantTable> {
        let input = request.validate()?;
        let result = self.estimator.electricity(&input).await?;

        let record = EmissionRecord::new(EmissionPayload::Electricity(ElectricityPayload {
            state_name: input.state_name,
            energy_per_time: input.energy_per_time,
            responsible_area: input.responsible_area,
            total_area: input.total_area,
            result: result.clone(),
        }));
        self.repo.insert(&record).await?;

        tracing::info!(record_id = %record.id, pollutants = result.len(), "Electricity emission recorded");

        Ok(result)
    }
}
