//! Production narrative provider

use platform::http::build_client;

use crate::application::config::ReportConfig;
use crate::domain::provider::NarrativeProvider;
use crate::error::ReportResult;
use crate::infra::cohere::CohereClient;
use crate::infra::gemini::GeminiClient;

#[derive(Clone)]
pub enum HttpNarrativeProvider {
    Gemini(GeminiClient),
    Cohere(CohereClient),
}

impl HttpNarrativeProvider {
    /// Gemini writes the periodic reports, Cohere the forensic analyses.
    /// Both share one client and the narrative timeout.
    pub fn pair_from_config(config: &ReportConfig) -> (Self, Self) {
        let client = build_client(config.narrative_timeout);
        let reporter = Self::Gemini(GeminiClient::new(
            client.clone(),
            &config.gemini_base_url,
            &config.gemini_api_key,
            &config.gemini_model,
        ));
        let analyst = Self::Cohere(CohereClient::new(
            client,
            &config.cohere_base_url,
            &config.cohere_api_key,
            &config.cohere_model,
        ));
        (reporter, analyst)
    }
}

impl NarrativeProvider for HttpNarrativeProvider {
    async fn generate(&self, prompt: &str) -> ReportResult<String> {
        let text = match self {
            Self::Gemini(client) => client.generate(prompt).await?,
            Self::Cohere(client) => client.generate(prompt).await?,
        };
        Ok(text)
    }
}
