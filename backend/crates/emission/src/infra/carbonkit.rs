//! CarbonKit category calculations (electricity, transport fuel)

use platform::http::{UpstreamError, send_json};
use serde::Deserialize;

use crate::domain::entities::{FUEL_POLLUTANTS, Measurement, PollutantTable};
use crate::domain::estimator::{ElectricityInput, FuelInput};

const SERVICE: &str = "CarbonKit";
const ELECTRICITY_CATEGORY: &str = "Electricity_India_By_State";
const FUEL_CATEGORY: &str = "DEFRA_transport_fuel_methodology";

#[derive(Clone)]
pub struct CarbonKitClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct CalculationResponse {
    output: CalculationOutput,
}

#[derive(Deserialize)]
struct CalculationOutput {
    #[serde(default)]
    amounts: Vec<Amount>,
}

#[derive(Deserialize)]
struct Amount {
    #[serde(rename = "type")]
    kind: String,
    value: serde_json::Value,
    #[serde(default)]
    unit: Option<String>,
}

impl CarbonKitClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Every amount the category reports, labelled `kg/day`
    pub async fn electricity(&self, input: &ElectricityInput) -> Result<PollutantTable, UpstreamError> {
        let query = [
            ("stateName", input.state_name.clone()),
            ("values.EnergyperTime", input.energy_per_time.to_string()),
            ("values.Responsiblearea", input.responsible_area.to_string()),
            ("values.Totalarea", input.total_area.to_string()),
        ];
        let response = self.calculate(ELECTRICITY_CATEGORY, &query).await?;

        Ok(response
            .output
            .amounts
            .into_iter()
            .map(|a| {
                (
                    a.kind,
                    Measurement {
                        value: a.value,
                        unit: Some("kg/day".to_string()),
                    },
                )
            })
            .collect())
    }

    /// Only the fuel pollutant keys, with the units CarbonKit reports
    pub async fn fuel_combustion(&self, input: &FuelInput) -> Result<PollutantTable, UpstreamError> {
        let query = [
            ("fuel", input.fuel.clone()),
            ("values.Volume", input.volume.to_string()),
        ];
        let response = self.calculate(FUEL_CATEGORY, &query).await?;

        Ok(response
            .output
            .amounts
            .into_iter()
            .filter(|a| FUEL_POLLUTANTS.contains(&a.kind.as_str()))
            .map(|a| {
                (
                    a.kind,
                    Measurement {
                        value: a.value,
                        unit: a.unit,
                    },
                )
            })
            .collect())
    }

    async fn calculate(
        &self,
        category: &str,
        query: &[(&str, String)],
    ) -> Result<CalculationResponse, UpstreamError> {
        let url = format!("{}/categories/{}/calculation", self.base_url, category);
        let request = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .basic_auth(&self.username, Some(&self.password));

        send_json(SERVICE, request).await
    }
}
