//! Remote classification with defensive response parsing.
//!
//! Model output is untrusted free text. Parsing runs in two tiers:
//! 1. **Structured** — strip code fences, parse as JSON with a
//!    `classificacao` field.
//! 2. **Heuristic** — scan for the dismissible token; otherwise flag
//!    important and try to salvage a reply after a "resposta:" marker.
//!
//! Neither tier can fail: every response resolves to a `Verdict`, and a
//! failed remote call resolves to the fail-safe verdict. Nothing classifier-
//! related ever propagates as an error.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::llm::LlmProvider;
use crate::pipeline::types::{Label, Verdict};

/// Placeholder in the prompt template that receives the cleaned email text.
const EMAIL_CONTENT_PLACEHOLDER: &str = "{email_content}";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*|\s*```").expect("valid fence pattern"));

// Narrow by intent: only a literal "resposta" marker counts as a salvageable
// reply. Matches the original service's behavior.
static REPLY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)resposta[:\s]+(.+)").expect("valid reply pattern"));

/// Classification capability, injectable so the orchestrator can be tested
/// without a remote model.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one email's cleaned text. Infallible: failures degrade into
    /// the verdict itself.
    async fn classify(&self, cleaned_text: &str) -> Verdict;
}

/// `Classifier` backed by a remote model and the two-tier parser.
pub struct ClassificationClient {
    llm: Arc<dyn LlmProvider>,
    prompt_template: String,
}

impl ClassificationClient {
    pub fn new(llm: Arc<dyn LlmProvider>, prompt_template: String) -> Self {
        Self {
            llm,
            prompt_template,
        }
    }

    fn build_prompt(&self, cleaned_text: &str) -> String {
        self.prompt_template
            .replace(EMAIL_CONTENT_PLACEHOLDER, cleaned_text)
    }
}

#[async_trait]
impl Classifier for ClassificationClient {
    async fn classify(&self, cleaned_text: &str) -> Verdict {
        let prompt = self.build_prompt(cleaned_text);

        let raw = match self.llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    model = self.llm.model_name(),
                    error = %e,
                    "Remote classification failed, applying fail-safe label"
                );
                return Verdict::fail_safe(e.to_string());
            }
        };

        let parsed = parse_response(&raw);
        debug!(
            tier = ?parsed.tier,
            label = parsed.label.as_str(),
            "Parsed classification response"
        );

        Verdict {
            label: parsed.label,
            suggested_reply: parsed.suggested_reply,
            error_note: None,
        }
    }
}

// ── Response parsing ────────────────────────────────────────────────

/// Which parse tier produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseTier {
    Structured,
    Heuristic,
}

#[derive(Debug)]
struct ParsedResponse {
    label: Label,
    suggested_reply: Option<String>,
    tier: ParseTier,
}

/// Expected shape of a well-behaved model response.
#[derive(Debug, Deserialize)]
struct ModelReply {
    classificacao: String,
    #[serde(default)]
    resposta_sugerida: Option<String>,
}

/// Parse a raw model response, structured tier first.
fn parse_response(raw: &str) -> ParsedResponse {
    match parse_structured(raw) {
        Some((label, suggested_reply)) => ParsedResponse {
            label,
            suggested_reply,
            tier: ParseTier::Structured,
        },
        None => {
            let (label, suggested_reply) = parse_heuristic(raw);
            ParsedResponse {
                label,
                suggested_reply,
                tier: ParseTier::Heuristic,
            }
        }
    }
}

/// Structured tier: strip markdown fences, parse JSON with a `classificacao`
/// field. An unrecognized label value still parses, but resolves to
/// `Important`.
fn parse_structured(raw: &str) -> Option<(Label, Option<String>)> {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    let reply: ModelReply = serde_json::from_str(unfenced.trim()).ok()?;

    let label = match reply.classificacao.trim() {
        "Importante" => Label::Important,
        "Despresível" => Label::Dismissible,
        _ => Label::Important,
    };

    Some((label, reply.resposta_sugerida))
}

/// Heuristic tier for free-text responses.
///
/// The dismissible token (accented or not, any case) wins outright. Failing
/// that, the email is important and a reply is salvaged from after a
/// "resposta:" marker if one exists, spanning lines.
fn parse_heuristic(raw: &str) -> (Label, Option<String>) {
    let lower = raw.to_lowercase();
    if lower.contains("despresível") || lower.contains("despresivel") {
        return (Label::Dismissible, None);
    }

    let reply = REPLY_MARKER
        .captures(raw)
        .map(|caps| caps[1].trim().to_string());

    (Label::Important, reply)
}
