//! Shipping Emissions Use Case

use std::sync::Arc;

use crate::domain::entities::{EmissionPayload, EmissionRecord, ShippingPayload, ShippingResult};
use crate::domain::estimator::{EmissionEstimator, ShippingInput};
use crate::domain::repository::EmissionRecordRepository;
use crate::domain::value_objects::lenient_number;
use crate::error::{EmissionError, EmissionResult};

pub const INVALID_SHIPPING_MESSAGE: &str =
    "Invalid input: Please ensure all fields are filled out correctly.";

/// Numeric fields may arrive as numbers or numeric strings
#[derive(Debug, Clone, Default)]
pub struct ShippingRequest {
    pub weight_unit: Option<String>,
    pub weight_value: Option<serde_json::Value>,
    pub distance_unit: Option<String>,
    pub distance_value: Option<serde_json::Value>,
    pub transport_method: Option<String>,
}

impl ShippingRequest {
    fn validate(self) -> EmissionResult<ShippingInput> {
        let invalid = || EmissionError::invalid_input(INVALID_SHIPPING_MESSAGE);
        let text = |v: Option<String>| v.filter(|s| !s.is_empty()).ok_or_else(invalid);
        let number = |v: Option<serde_json::Value>| {
            v.as_ref().and_then(lenient_number).ok_or_else(invalid)
        };

        Ok(ShippingInput {
            weight_unit: text(self.weight_unit)?,
            weight_value: number(self.weight_value)?,
            distance_unit: text(self.distance_unit)?,
            distance_value: number(self.distance_value)?,
            transport_method: text(self.transport_method)?,
        })
    }
}

pub struct CalculateShippingUseCase<R, E>
where
    R: EmissionRecordRepository,
    E: EmissionEstimator,
{
    repo: Arc<R>,
    estimator: Arc<E>,
}

impl<R, E> CalculateShippingUseCase<R, E>
where
    R: EmissionRecordRepository,
    E: EmissionEstimator,
{
    pub fn new(repo: Arc<R>, estimator: Arc<E>) -> Self {
        Self { repo, estimator }
    }

    pub async fn execute(&self, request: ShippingRequest) -> EmissionResult<ShippingResult> {
        let input = request.validate()?;
        let result = self.estimator.shipping(&input).await?;

        let record = EmissionRecord::new(EmissionPayload::Shipping(ShippingPayload {
            weight_unit: input.weight_unit,
            weight_value: input.weight_value,
            distance_unit: input.distance_unit,
            distance_value: input.distance_value,
            transport_method: input.transport_method,
            result: result.clone(),
        }));
        self.repo.insert(&record).await?;

        tracing::info!(
            record_id = %record.id,
            carbon = %result.carbon_emissions.kilograms,
            "Shipping emission recorded"
        );

        Ok(result)
    }
}
