//! Pipeline orchestrator.
//!
//! One submission flows through:
//! 1. `split_emails` — delimiter split into individual bodies
//! 2. `NlpEngine::normalize` — cleaned text for the classifier
//! 3. `Classifier::classify` — remote verdict, fail-safe on error
//! 4. `NlpEngine::extract_keywords` — ranked salient terms
//!
//! Results come back in input order. A failed classification is isolated to
//! its own result via the error note; `process` itself never fails.

use std::sync::Arc;

use tracing::{debug, info};

use crate::nlp::NlpEngine;
use crate::nlp::splitter::split_emails;
use crate::pipeline::classifier::Classifier;
use crate::pipeline::types::EmailResult;

/// Orchestrates the full per-submission classification pass.
pub struct EmailPipeline {
    nlp: Arc<NlpEngine>,
    classifier: Arc<dyn Classifier>,
    email_separator: String,
    keyword_top_n: usize,
}

impl EmailPipeline {
    pub fn new(
        nlp: Arc<NlpEngine>,
        classifier: Arc<dyn Classifier>,
        email_separator: String,
        keyword_top_n: usize,
    ) -> Self {
        Self {
            nlp,
            classifier,
            email_separator,
            keyword_top_n,
        }
    }

    /// Process a raw submission into one result per contained email.
    ///
    /// Blank input yields no results and makes no remote calls. Emails are
    /// classified sequentially, one remote call each.
    pub async fn process(&self, raw_input: &str) -> Vec<EmailResult> {
        let emails = split_emails(raw_input, &self.email_separator);
        if emails.is_empty() {
            debug!("Empty submission, nothing to classify");
            return Vec::new();
        }

        info!(count = emails.len(), "Processing email submission");

        let mut results = Vec::with_capacity(emails.len());
        for email in emails {
            let normalized = self.nlp.normalize(&email);
            let verdict = self.classifier.classify(&normalized.cleaned).await;
            let keywords = self
                .nlp
                .extract_keywords(&normalized.cleaned, self.keyword_top_n);

            debug!(
                label = verdict.label.as_str(),
                keywords = keywords.len(),
                "Email classified"
            );

            results.push(EmailResult {
                original: email,
                cleaned: normalized.cleaned,
                label: verdict.label,
                suggested_reply: verdict.suggested_reply,
                keywords,
                error_note: verdict.error_note,
            });
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::config::DEFAULT_EMAIL_SEPARATOR;
    use crate::pipeline::types::{Label, Verdict};

    /// Stub classifier: dismisses holiday greetings, flags everything else,
    /// simulates a transport failure when asked.
    struct StubClassifier {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    impl StubClassifier {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(marker: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: Some(marker),
            }
        }
    }

    #[async_trait]
    impl Classifier for StubClassifier {
        async fn classify(&self, cleaned_text: &str) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(marker) = self.fail_on
                && cleaned_text.contains(marker)
            {
                return Verdict::fail_safe("simulated transport failure");
            }

            if cleaned_text.to_lowercase().contains("feliz natal") {
                Verdict {
                    label: Label::Dismissible,
                    suggested_reply: None,
                    error_note: None,
                }
            } else {
                Verdict {
                    label: Label::Important,
                    suggested_reply: Some("Vamos analisar.".into()),
                    error_note: None,
                }
            }
        }
    }

    fn pipeline(classifier: Arc<StubClassifier>) -> EmailPipeline {
        EmailPipeline::new(
            Arc::new(NlpEngine::new("portuguese").unwrap()),
            classifier,
            DEFAULT_EMAIL_SEPARATOR.to_string(),
            5,
        )
    }

    #[tokio::test]
    async fn multi_email_submission_keeps_input_order() {
        let classifier = Arc::new(StubClassifier::new());
        let p = pipeline(Arc::clone(&classifier));

        let input = "##### EMAIL #####\nOlá, preciso de suporte urgente\n##### EMAIL #####\nFeliz natal a todos!";
        let results = p.process(input).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].original, "Olá, preciso de suporte urgente");
        assert_eq!(results[0].label, Label::Important);
        assert_eq!(results[1].original, "Feliz natal a todos!");
        assert_eq!(results[1].label, Label::Dismissible);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_submission_makes_no_remote_calls() {
        let classifier = Arc::new(StubClassifier::new());
        let p = pipeline(Arc::clone(&classifier));

        let results = p.process("   \n  ").await;

        assert!(results.is_empty());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn single_email_without_separator() {
        let classifier = Arc::new(StubClassifier::new());
        let p = pipeline(classifier);

        let results = p.process("Preciso de ajuda com o sistema").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cleaned, "Preciso de ajuda com o sistema");
        assert!(!results[0].keywords.is_empty());
    }

    #[tokio::test]
    async fn classified_text_is_cleaned_not_original() {
        let classifier = Arc::new(StubClassifier::new());
        let p = pipeline(classifier);

        let results = p.process("Suporte***   urgente @@@").await;

        assert_eq!(results[0].original, "Suporte***   urgente @@@");
        assert_eq!(results[0].cleaned, "Suporte urgente");
    }

    #[tokio::test]
    async fn one_failed_email_does_not_abort_the_rest() {
        let classifier = Arc::new(StubClassifier::failing_on("indisponível"));
        let p = pipeline(Arc::clone(&classifier));

        let input =
            "##### EMAIL #####\nServiço indisponível, preciso de ajuda\n##### EMAIL #####\nFeliz natal equipe";
        let results = p.process(input).await;

        assert_eq!(results.len(), 2);
        // First email hit the simulated failure: fail-safe label + note.
        assert_eq!(results[0].label, Label::Important);
        assert!(results[0].error_note.is_some());
        // Second email still classified normally.
        assert_eq!(results[1].label, Label::Dismissible);
        assert!(results[1].error_note.is_none());
    }

    #[tokio::test]
    async fn keywords_respect_top_n() {
        let classifier = Arc::new(StubClassifier::new());
        let p = EmailPipeline::new(
            Arc::new(NlpEngine::new("portuguese").unwrap()),
            classifier,
            DEFAULT_EMAIL_SEPARATOR.to_string(),
            2,
        );

        let results = p
            .process("pagamento fatura boleto cartão cobrança")
            .await;

        assert!(results[0].keywords.len() <= 2);
    }
}
