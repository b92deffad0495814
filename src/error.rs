//! Error types for the triage service.

use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration-related errors. These are fatal at startup; nothing in the
/// per-request path produces them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}. {hint}")]
    MissingEnvVar { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Remote model errors. The classification client recovers from all of these
/// into a fail-safe verdict; they never cross the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned status {status}: {body}")]
    BadStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Provider {provider} timed out after {timeout:?}")]
    Timeout {
        provider: String,
        timeout: Duration,
    },
}

/// Upload/extraction errors, surfaced to the web layer as 400s.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File extension not allowed: {0}")]
    ExtensionNotAllowed(String),

    #[error("Could not extract text from {filename}: {reason}")]
    ExtractionFailed { filename: String, reason: String },

    #[error("Upload read failed: {0}")]
    UploadRead(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
