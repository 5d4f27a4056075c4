//! degreecalc-core — Grade aggregation and degree classification.
//!
//! This crate turns a list of scored modules into per-level averages, a
//! scheme-weighted final mark and a degree class. The numeric pipeline is
//! pure and synchronous; only the document and report helpers touch files.

pub mod aggregate;
pub mod classify;
pub mod document;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod scheme;
pub mod selector;
pub mod validate;

pub use classify::Classification;
pub use document::Document;
pub use engine::evaluate;
pub use error::DocumentError;
pub use model::{Module, Scheme, Settings, UgPolicy};
pub use report::Evaluation;
