//! Explosion Emissions Use Case

use std::sync::Arc;

use crate::domain::entities::{EmissionPayload, EmissionRecord, ExplosionPayload};
use crate::domain::repository::EmissionRecordRepository;
use crate::domain::services::explosion_emissions;
use crate::domain::value_objects::{ExplosiveType, lenient_number};
use crate::error::{EmissionError, EmissionResult};

#[derive(Debug, Clone, Default)]
pub struct ExplosionRequest {
    pub explosive_type: Option<String>,
    pub amount: Option<serde_json::Value>,
}

pub struct CalculateExplosionUseCase<R>
where
    R: EmissionRecordRepository,
{
    repo: Arc<R>,
}

impl<R> CalculateExplosionUseCase<R>
where
    R: EmissionRecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: ExplosionRequest) -> EmissionResult<ExplosionPayload> {
        let explosive: ExplosiveType = request
            .explosive_type
            .as_deref()
            .ok_or(EmissionError::InvalidExplosiveType)?
            .parse()?;
        let amount = request
            .amount
            .as_ref()
            .and_then(lenient_number)
            .ok_or_else(|| EmissionError::invalid_input("Invalid input: amount must be a number."))?;

        let payload = ExplosionPayload {
            explosive_type: explosive.as_str().to_string(),
            amount,
            emissions: explosion_emissions(explosive, amount),
        };

        let record = EmissionRecord::new(EmissionPayload::Explosion(payload.clone()));
        self.repo.insert(&record).await?;

        tracing::info!(
            record_id = %record.id,
            explosive = explosive.as_str(),
            amount,
            "Explosion emission recorded"
        );

        Ok(payload)
    }
}
