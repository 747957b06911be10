//! Carbon Interface shipping estimates

use platform::http::{UpstreamError, send_json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CarbonEmissions, ShippingResult};
use crate::domain::estimator::ShippingInput;

const SERVICE: &str = "Carbon Interface";

#[derive(Clone)]
pub struct CarbonInterfaceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct EstimateRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    shipment: &'a ShippingInput,
}

#[derive(Deserialize)]
struct EstimateResponse {
    data: EstimateData,
}

#[derive(Deserialize)]
struct EstimateData {
    attributes: EstimateAttributes,
}

#[derive(Deserialize)]
struct EstimateAttributes {
    distance_value: serde_json::Value,
    distance_unit: serde_json::Value,
    weight_value: serde_json::Value,
    weight_unit: serde_json::Value,
    carbon_g: serde_json::Value,
    carbon_kg: serde_json::Value,
    carbon_mt: serde_json::Value,
}

impl CarbonInterfaceClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub async fn shipping(&self, input: &ShippingInput) -> Result<ShippingResult, UpstreamError> {
        let body = EstimateRequest {
            kind: "shipping",
            shipment: input,
        };
        let request = self
            .client
            .post(format!("{}/estimates", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: EstimateResponse = send_json(SERVICE, request).await?;
        Ok(to_shipping_result(&response.data.attributes))
    }
}

fn to_shipping_result(attrs: &EstimateAttributes) -> ShippingResult {
    ShippingResult {
        distance: format!("{} {}", plain(&attrs.distance_value), plain(&attrs.distance_unit)),
        weight: format!("{} {}", plain(&attrs.weight_value), plain(&attrs.weight_unit)),
        carbon_emissions: CarbonEmissions {
            grams: format!("{} g", plain(&attrs.carbon_g)),
            kilograms: format!("{} kg", plain(&attrs.carbon_kg)),
            metric_tonnes: format!("{} mt", plain(&attrs.carbon_mt)),
        },
    }
}

/// Render a JSON scalar without quotes (`100` not `100.0`, `km` not `"km"`)
fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_render_as_suffixed_strings() {
        let attrs: EstimateAttributes = serde_json::from_value(json!({
            "distance_value": 2000.0,
            "distance_unit": "km",
            "weight_value": 200,
            "weight_unit": "g",
            "carbon_g": 45600,
            "carbon_kg": 45.6,
            "carbon_mt": 0.05
        }))
        .unwrap();

        let result = to_shipping_result(&attrs);
        assert_eq!(result.distance, "2000 km");
        assert_eq!(result.weight, "200 g");
        assert_eq!(result.carbon_emissions.grams, "45600 g");
        assert_eq!(result.carbon_emissions.kilograms, "45.6 kg");
        assert_eq!(result.carbon_emissions.metric_tonnes, "0.05 mt");
    }

    #[test]
    fn test_request_body_is_flat() {
        let input = ShippingInput {
            weight_unit: "g".to_string(),
            weight_value: 200.0,
            distance_unit: "km".to_string(),
            distance_value: 2000.0,
            transport_method: "truck".to_string(),
        };
        let body = serde_json::to_value(EstimateRequest {
            kind: "shipping",
            shipment: &input,
        })
        .unwrap();
        assert_eq!(body["type"], "shipping");
        assert_eq!(body["transport_method"], "truck");
        assert_eq!(body["weight_value"], 200.0);
    }
}
