//! Remote model integration.
//!
//! The pipeline only sees the `LlmProvider` trait; the concrete provider is
//! a thin reqwest client for the Gemini REST API.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiProvider;
pub use provider::LlmProvider;

use std::sync::Arc;

use secrecy::SecretString;

use crate::error::LlmError;

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub model: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider = GeminiProvider::new(config.api_key.clone(), config.model.clone())?;
    tracing::info!("Using Gemini (model: {})", config.model);
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_provider_reports_model_name() {
        // Key validity is only checked at request time.
        let config = LlmConfig {
            api_key: SecretString::from("test-key"),
            model: "gemini-2.0-flash-exp".to_string(),
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "gemini-2.0-flash-exp");
    }
}
