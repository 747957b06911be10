//! Narrative provider port

use crate::error::ReportResult;

/// Text returned when a provider answers without any generated text
pub const NO_RESPONSE: &str = "No response generated.";

/// Opaque text generation: a prompt in, free-form prose out
#[trait_variant::make(NarrativeProvider: Send)]
pub trait LocalNarrativeProvider {
    async fn generate(&self, prompt: &str) -> ReportResult<String>;
}
