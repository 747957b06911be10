//! Cohere `generate` client

use platform::http::{UpstreamError, send_json};
use serde::{Deserialize, Serialize};

use crate::domain::provider::NO_RESPONSE;

const SERVICE: &str = "Cohere";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct CohereClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Deserialize)]
struct Generation {
    #[serde(default)]
    text: String,
}

impl CohereClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let request = self
            .client
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: GenerateResponse = send_json(SERVICE, request).await?;
        Ok(first_generation(response))
    }
}

fn first_generation(response: GenerateResponse) -> String {
    response
        .generations
        .into_iter()
        .next()
        .map(|g| g.text)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}
