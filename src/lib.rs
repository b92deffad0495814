//! Email triage — LLM-backed email classification service.

pub mod config;
pub mod error;
pub mod files;
pub mod llm;
pub mod nlp;
pub mod pipeline;
pub mod routes;
