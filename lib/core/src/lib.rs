//! # cbrx Core
//!
//! Core contracts for the cbrx case-based reasoning engine.
//!
//! This crate provides the seams every other cbrx crate is built on:
//!
//! - [`Evaluator`] - a similarity function between a query value and a case value
//! - [`Record`] - named property access for queries and cases
//! - [`Error`] - configuration errors raised when evaluators or requests are built
//!
//! ## Example
//!
//! ```rust
//! use cbrx_core::{shared, Evaluator, Record, SharedEvaluator};
//! use serde_json::json;
//!
//! let same_color: SharedEvaluator<serde_json::Value> =
//!     shared(|q: &serde_json::Value, c: &serde_json::Value| if q == c { 1.0 } else { 0.0 });
//!
//! let query = json!({"color": "red"});
//! let case = json!({"color": "red", "shape": "circle"});
//!
//! let score = match (query.property("color"), case.property("color")) {
//!     (Some(q), Some(c)) => same_color.evaluate(q, c),
//!     _ => 0.0,
//! };
//! assert_eq!(score, 1.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod record;

pub use error::{ensure_positive, ensure_unit_interval, Error, Result};
pub use evaluator::{shared, Evaluator, SharedEvaluator};
pub use record::Record;
