//! Provider abstraction over the remote language model.

use async_trait::async_trait;

use crate::error::LlmError;

/// A remote text-completion model.
///
/// Implementations must be safe to share across concurrent requests; the
/// trait takes `&self` and holds no per-call state.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Send a prompt and return the model's raw free-text output.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
