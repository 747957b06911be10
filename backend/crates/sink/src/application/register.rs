//! Register Sink Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::SinkId;
use kernel::lenient::lenient_number;

use crate::domain::entities::{CarbonSink, DAYS_PER_YEAR, SinkKind, SinkRegistration};
use crate::domain::repository::SinkRepository;
use crate::error::{SinkError, SinkResult};

#[derive(Debug, Clone, Default)]
pub struct RegisterSinkRequest {
    pub name: Option<String>,
    pub vegetation_type: Option<String>,
    pub area_covered: Option<serde_json::Value>,
    pub carbon_sequestration_rate: Option<serde_json::Value>,
    pub location: Option<String>,
    pub additional_details: Option<String>,
    /// Years; missing or zero means one
    pub timeframe: Option<serde_json::Value>,
}

pub struct RegisterSinkUseCase<R>
where
    R: SinkRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterSinkUseCase<R>
where
    R: SinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        kind: SinkKind,
        request: RegisterSinkRequest,
    ) -> SinkResult<SinkRegistration> {
        let name = request
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| SinkError::invalid_input("name is required"))?;
        let area = required_number(request.area_covered.as_ref(), "areaCovered")?;
        let rate = required_number(
            request.carbon_sequestration_rate.as_ref(),
            "carbonSequestrationRate",
        )?;
        let timeframe = request
            .timeframe
            .as_ref()
            .and_then(lenient_number)
            .filter(|t| *t != 0.0)
            .unwrap_or(1.0);

        let sink = CarbonSink {
            id: SinkId::new(),
            kind,
            name,
            vegetation_type: request.vegetation_type,
            area_covered: area,
            carbon_sequestration_rate: rate,
            daily_sequestration_rate: Some(rate / DAYS_PER_YEAR),
            location: request.location,
            additional_details: request.additional_details,
            created_at: Utc::now(),
        };
        self.repo.insert(&sink).await?;

        tracing::info!(
            sink_id = %sink.id,
            %kind,
            area_ha = area,
            rate_t_per_ha_year = rate,
            "Carbon sink registered"
        );

        Ok(SinkRegistration {
            daily_sequestration_rate: format!(
                "{:.2} tons of CO2 per day",
                sink.daily_absorption()
            ),
            total_sequestration: format!(
                "{:.2} tons of CO2 over {} year(s)",
                area * rate * timeframe,
                timeframe
            ),
            sink,
        })
    }
}

fn required_number(value: Option<&serde_json::Value>, field: &str) -> SinkResult<f64> {
    value
        .and_then(lenient_number)
        .ok_or_else(|| SinkError::invalid_input(format!("{field} must be a number")))
}
