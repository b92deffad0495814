//! Shared types for the classification pipeline.

use serde::{Deserialize, Serialize};

// ── Classification label ────────────────────────────────────────────

/// Classification label. Exactly two values exist; any model output that is
/// not recognized resolves to `Important` — uncertainty flags, never drops.
///
/// Wire names are the original service's Portuguese strings, including its
/// spelling of "Despresível".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Importante")]
    Important,
    #[serde(rename = "Despresível")]
    Dismissible,
}

impl Label {
    /// Wire/display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Important => "Importante",
            Label::Dismissible => "Despresível",
        }
    }
}

// ── Verdict ─────────────────────────────────────────────────────────

/// Outcome of classifying one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: Label,
    pub suggested_reply: Option<String>,
    /// Populated only when the remote call itself failed; parse trouble is
    /// recovered silently.
    pub error_note: Option<String>,
}

impl Verdict {
    /// Fail-safe verdict for a failed remote call: flagged important, no
    /// reply, failure description attached.
    pub fn fail_safe(note: impl Into<String>) -> Self {
        Self {
            label: Label::Important,
            suggested_reply: None,
            error_note: Some(note.into()),
        }
    }
}

// ── Per-email result ────────────────────────────────────────────────

/// Aggregate result for one email, in the original API's field names.
#[derive(Debug, Clone, Serialize)]
pub struct EmailResult {
    #[serde(rename = "email_original")]
    pub original: String,
    #[serde(rename = "email_limpo")]
    pub cleaned: String,
    #[serde(rename = "classificacao")]
    pub label: Label,
    #[serde(rename = "resposta_sugerida")]
    pub suggested_reply: Option<String>,
    #[serde(rename = "palavras_chave")]
    pub keywords: Vec<String>,
    #[serde(rename = "error")]
    pub error_note: Option<String>,
}
