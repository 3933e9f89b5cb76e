// Public fallible APIs in this crate share one concrete error contract (`TermsiftError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod attributes;
pub mod build;
pub mod client;
pub mod closure;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod generation;
pub mod grouping;
pub mod index;
pub mod models;
pub mod ontology;
pub mod query;
pub mod source;
pub mod store;
pub mod tokens;

pub use client::Termsift;
pub use error::{Result, TermsiftError};
pub use generation::GenerationHandle;
pub use index::IndexGeneration;
