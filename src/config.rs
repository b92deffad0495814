//! Configuration types.
//!
//! All configuration is resolved once at startup from the environment and
//! passed into the services by value. Nothing in the request path reads the
//! environment or mutates shared settings.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default instructional template sent to the remote model. The template is a
/// business policy, passed through verbatim; `{email_content}` is replaced
/// with the cleaned email text. Overridable via `CLASSIFICATION_PROMPT`.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Trabalho em uma empresa do ramo financeiro (tipo banco/fintech), recebo muitos emails diários e preciso classificar o que é importante e o que não é. Me ajude a analisar o teor da mensagem e classificar o email como Importante ou Despresível. Tome o tempo que for necessário para pesquisar sobre do que se trata as empresas do setor e com quais problemas elas geralmente lidam, para que você tenha mais embasamento na hora de fazer a classificação.

São importantes emails com o seguinte teor:
Solicitações de suporte técnico, atualização sobre casos em aberto, requisições importantes, dúvidas sobre o sistema e etc.

Email com o seguinte teor podem ser considerados despresíveis:
Mensagem de feliz natal, congratulações e agradecimentos, ou perguntas não relevantes dado o contexto de atuação da empresa. Esses não precisam de sugestão de resposta.

Segue a mensagem (entre $ $) a ser classificada como 'Importante' ou 'Despresível' (caso haja dúvida, favoreça a classificação como 'Importante').

IMPORTANTE: Retorne APENAS um JSON válido no seguinte formato, sem qualquer texto adicional antes ou depois:
{\"classificacao\": \"Importante\" ou \"Despresível\", \"resposta_sugerida\": \"texto da resposta ou null se despresível\"}

$
{email_content}
$
";

/// Delimiter token separating individual emails in a raw submission.
pub const DEFAULT_EMAIL_SEPARATOR: &str = "##### EMAIL #####";

/// Service configuration, built once by `main` and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key (required).
    pub api_key: SecretString,
    /// Gemini model identifier.
    pub model: String,
    /// Token separating individual emails in a raw submission.
    pub email_separator: String,
    /// Language for the stopword set and stemmer.
    pub language: String,
    /// How many keywords to extract per email.
    pub keyword_top_n: usize,
    /// Instructional template with the `{email_content}` placeholder.
    pub prompt_template: String,
    /// HTTP listen port.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Only `GEMINI_API_KEY` is required; everything else has a default
    /// matching the original deployment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingEnvVar {
            key: "GEMINI_API_KEY".into(),
            hint: "export GEMINI_API_KEY=<your key> before starting".into(),
        })?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".into(),
                message: format!("'{raw}' is not a valid port number"),
            })?,
            Err(_) => 5000,
        };

        let keyword_top_n = match std::env::var("KEYWORD_TOP_N") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "KEYWORD_TOP_N".into(),
                message: format!("'{raw}' is not a valid count"),
            })?,
            Err(_) => 5,
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-exp".to_string()),
            email_separator: std::env::var("EMAIL_SEPARATOR")
                .unwrap_or_else(|_| DEFAULT_EMAIL_SEPARATOR.to_string()),
            language: std::env::var("STOPWORDS_LANGUAGE")
                .unwrap_or_else(|_| "portuguese".to_string()),
            keyword_top_n,
            prompt_template: std::env::var("CLASSIFICATION_PROMPT")
                .unwrap_or_else(|_| DEFAULT_PROMPT_TEMPLATE.to_string()),
            port,
            max_body_bytes: 16 * 1024 * 1024,
        })
    }
}
