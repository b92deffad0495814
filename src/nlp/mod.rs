//! Text normalization for email bodies.
//!
//! The `NlpEngine` owns the language resources (stopword set, stemmer) and
//! exposes pure derivations over input text:
//! 1. `clean` — strip noise characters, collapse whitespace
//! 2. `remove_stopwords` — lowercase + drop stopword tokens
//! 3. `apply_stemming` — lowercase + morphological reduction
//!
//! `cleaned` is the canonical human-readable form fed to the remote
//! classifier; the other two are intermediate artifacts for keyword
//! extraction. All derivations are total: any input, including empty
//! strings, yields a value.

pub mod keywords;
pub mod splitter;

use std::collections::HashSet;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::error::ConfigError;

/// Derived variants of one email's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Noise stripped, whitespace collapsed. Stays human-readable.
    pub cleaned: String,
    /// Lowercased `cleaned` with stopword tokens removed.
    pub without_stopwords: String,
    /// Lowercased `cleaned` with each token stemmed.
    pub stemmed: String,
}

/// Language resources plus the compiled normalization patterns.
///
/// Built once at startup, read-only afterwards; safe to share across
/// concurrent requests.
pub struct NlpEngine {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
    noise: Regex,
    whitespace: Regex,
}

impl NlpEngine {
    /// Build an engine for the given language identifier (e.g. "portuguese").
    pub fn new(language: &str) -> Result<Self, ConfigError> {
        let (stopword_lang, algorithm) = resolve_language(language)?;
        let stopwords = stop_words::get(stopword_lang).into_iter().collect();

        Ok(Self {
            stopwords,
            stemmer: Stemmer::create(algorithm),
            // Everything outside alphanumerics, whitespace and a small
            // punctuation allow-list is noise.
            noise: Regex::new(r"[^\w\s.,!?\-:;()]").expect("valid noise pattern"),
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        })
    }

    /// Strip noise characters and collapse whitespace runs.
    ///
    /// Idempotent: cleaning already-clean text is a no-op.
    pub fn clean(&self, text: &str) -> String {
        let stripped = self.noise.replace_all(text, " ");
        let collapsed = self.whitespace.replace_all(&stripped, " ");
        collapsed.trim().to_string()
    }

    /// Lowercase and drop stopword tokens, rejoining with single spaces.
    pub fn remove_stopwords(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(*word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercase and stem every token, rejoining with single spaces.
    pub fn apply_stemming(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Derive all three text variants from one email body.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let cleaned = self.clean(text);
        let without_stopwords = self.remove_stopwords(&cleaned);
        let stemmed = self.apply_stemming(&cleaned);

        NormalizedText {
            cleaned,
            without_stopwords,
            stemmed,
        }
    }
}

/// Map a language identifier to its stopword list and stemming algorithm.
fn resolve_language(
    language: &str,
) -> Result<(stop_words::LANGUAGE, Algorithm), ConfigError> {
    match language.to_lowercase().as_str() {
        "portuguese" | "pt" => Ok((stop_words::LANGUAGE::Portuguese, Algorithm::Portuguese)),
        "english" | "en" => Ok((stop_words::LANGUAGE::English, Algorithm::English)),
        "spanish" | "es" => Ok((stop_words::LANGUAGE::Spanish, Algorithm::Spanish)),
        other => Err(ConfigError::UnsupportedLanguage(other.to_string())),
    }
}
