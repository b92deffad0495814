//! Email classification pipeline.
//!
//! One submission flows through:
//! 1. `nlp::splitter` — delimiter split into individual email bodies
//! 2. `nlp::NlpEngine` — normalization (cleaned text)
//! 3. `classifier::Classifier` — remote verdict with two-tier parsing
//! 4. `nlp` keyword extraction — ranked salient terms
//!
//! Per-email failures never escape: they land in that email's own result.

pub mod classifier;
pub mod processor;
pub mod types;

pub use classifier::{ClassificationClient, Classifier};
pub use processor::EmailPipeline;
pub use types::{EmailResult, Label, Verdict};
