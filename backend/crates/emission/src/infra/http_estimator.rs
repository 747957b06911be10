//! Production estimator backed by CarbonKit and Carbon Interface

use platform::http::build_client;

use crate::application::config::EmissionConfig;
use crate::domain::entities::{PollutantTable, ShippingResult};
use crate::domain::estimator::{ElectricityInput, EmissionEstimator, FuelInput, ShippingInput};
use crate::error::EmissionResult;
use crate::infra::carbon_interface::CarbonInterfaceClient;
use crate::infra::carbonkit::CarbonKitClient;

#[derive(Clone)]
pub struct HttpEmissionEstimator {
    carbonkit: CarbonKitClient,
    carbon_interface: CarbonInterfaceClient,
}

impl HttpEmissionEstimator {
    pub fn new(carbonkit: CarbonKitClient, carbon_interface: CarbonInterfaceClient) -> Self {
        Self {
            carbonkit,
            carbon_interface,
        }
    }

    /// Both providers share one client and its request timeout
    pub fn from_config(config: &EmissionConfig) -> Self {
        let client = build_client(config.upstream_timeout);
        Self::new(
            CarbonKitClient::new(
                client.clone(),
                &config.carbonkit_base_url,
                &config.carbonkit_username,
                &config.carbonkit_password,
            ),
            CarbonInterfaceClient::new(
                client,
                &config.carbon_interface_base_url,
                &config.carbon_interface_api_key,
            ),
        )
    }
}

impl EmissionEstimator for HttpEmissionEstimator {
    async fn electricity(&self, input: &ElectricityInput) -> EmissionResult<PollutantTable> {
        Ok(self.carbonkit.electricity(input).await?)
    }

    async fn fuel_combustion(&self, input: &FuelInput) -> EmissionResult<PollutantTable> {
        Ok(self.carbonkit.fuel_combustion(input).await?)
    }

    async fn shipping(&self, input: &ShippingInput) -> EmissionResult<ShippingResult> {
        Ok(self.carbon_interface.shipping(input).await?)
    }
}
