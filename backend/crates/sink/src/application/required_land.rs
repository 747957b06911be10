//! Required Land Use Case
//!
//! Size a planned sink for a yearly CO2 target and keep the calculation.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::LandCalculationId;
use kernel::lenient::lenient_number;

use crate::domain::land::{
    DEFAULT_PROJECT_YEARS, LandCalculation, LandRequirement, LandType, SoilCondition,
};
use crate::domain::repository::SinkRepository;
use crate::error::{SinkError, SinkResult};

pub const INVALID_LAND_TYPE_MESSAGE: &str =
    "Invalid land type or forest type. Please check your inputs.";

#[derive(Debug, Clone, Default)]
pub struct RequiredLandRequest {
    /// Tons of CO2 per year
    pub target_carbon_sequestration: Option<serde_json::Value>,
    pub land_type: Option<String>,
    pub forest_type: Option<String>,
    /// Years; missing or zero means twenty
    pub project_duration: Option<serde_json::Value>,
    pub soil_condition: Option<String>,
}

pub struct RequiredLandUseCase<R>
where
    R: SinkRepository,
{
    repo: Arc<R>,
}

impl<R> RequiredLandUseCase<R>
where
    R: SinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: RequiredLandRequest) -> SinkResult<LandCalculation> {
        let target = request
            .target_carbon_sequestration
            .as_ref()
            .and_then(lenient_number)
            .filter(|t| *t > 0.0)
            .ok_or_else(|| {
                SinkError::invalid_input("targetCarbonSequestration must be a positive number")
            })?;
        let land_type = request
            .land_type
            .as_deref()
            .and_then(|land| LandType::parse(land, request.forest_type.as_deref()))
            .ok_or_else(|| SinkError::invalid_input(INVALID_LAND_TYPE_MESSAGE))?;
        let years = match request.project_duration.as_ref().and_then(lenient_number) {
            None => DEFAULT_PROJECT_YEARS,
            Some(y) if y == 0.0 => DEFAULT_PROJECT_YEARS,
            Some(y) if y > 0.0 => y,
            Some(_) => {
                return Err(SinkError::invalid_input(
                    "projectDuration must be a positive number",
                ));
            }
        };
        let soil = SoilCondition::from_tag(request.soil_condition.as_deref());

        let calculation = LandCalculation {
            id: LandCalculationId::new(),
            target_carbon_sequestration: target,
            land_type,
            soil_condition: soil,
            project_duration: years,
            result: LandRequirement::calculate(target, land_type, soil, years),
            created_at: Utc::now(),
        };
        self.repo.record_land_calculation(&calculation).await?;

        tracing::info!(
            calculation_id = %calculation.id,
            %land_type,
            target_t_per_year = target,
            required_ha = calculation.result.required_land,
            "Required land calculated"
        );

        Ok(calculation)
    }
}
