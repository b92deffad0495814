use std::net::SocketAddr;
use std::sync::Arc;

use email_triage::config::AppConfig;
use email_triage::llm::{LlmConfig, create_provider};
use email_triage::nlp::NlpEngine;
use email_triage::pipeline::{ClassificationClient, Classifier, EmailPipeline};
use email_triage::routes::{AppState, app_routes};

/// Wire the NLP engine, provider and classifier into the pipeline.
///
/// Misconfiguration is fatal here; nothing after startup can fail the
/// process for configuration reasons.
fn build_pipeline(config: &AppConfig) -> email_triage::error::Result<Arc<EmailPipeline>> {
    let nlp = Arc::new(NlpEngine::new(&config.language)?);

    let llm = create_provider(&LlmConfig {
        api_key: config.api_key.clone(),
        model: config.model.clone(),
    })?;

    let classifier: Arc<dyn Classifier> = Arc::new(ClassificationClient::new(
        llm,
        config.prompt_template.clone(),
    ));

    Ok(Arc::new(EmailPipeline::new(
        nlp,
        classifier,
        config.email_separator.clone(),
        config.keyword_top_n,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    let pipeline = build_pipeline(&config)?;

    let app = app_routes(AppState { pipeline }, config.max_body_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Email triage API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
