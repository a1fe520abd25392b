//! # cbrx Schema
//!
//! Declarative similarity configuration for JSON case bases.
//!
//! ## Overview
//!
//! The evaluators in `cbrx-similarity` are assembled in code. The schema
//! describes the same assembly as data, so a case base can ship with its
//! similarity model in a JSON file:
//!
//! 1. Load a [`SimilaritySchema`] from JSON
//! 2. [`SimilaritySchema::build`] validates it and returns a case evaluator
//! 3. Pass the evaluator to `cbrx_casebase::infer`
//!
//! ## Schema Definition
//!
//! ```rust
//! use cbrx_schema::SimilaritySchema;
//! use serde_json::json;
//!
//! let schema = SimilaritySchema::from_json_str(r#"{
//!     "aggregation": "average",
//!     "properties": [
//!         {"name": "distillery"},
//!         {"name": "age", "evaluator": {"type": "numeric", "options": {"min": 0, "max": 100}}},
//!         {"name": "colour", "weight": 2, "evaluator": {
//!             "type": "ordered", "sequence": ["straw", "gold", "amber", "peat"]
//!         }}
//!     ]
//! }"#).unwrap();
//!
//! let evaluator = schema.build().unwrap();
//! let score = evaluator.score(&json!({"age": 12}), &json!({"age": 12, "colour": "gold"}));
//! assert_eq!(score, 1.0);
//! ```
//!
//! ## Evaluator types
//!
//! | `type`     | compares                                   |
//! |------------|--------------------------------------------|
//! | `equality` | any JSON values, exact match               |
//! | `table`    | strings through a lookup table             |
//! | `numeric`  | numbers in a bounded range                 |
//! | `ordered`  | categories by their position in a sequence |
//! | `set`      | arrays, element-wise with a nested evaluator |

pub mod schema;

// Re-export main types
pub use schema::{EvaluatorConfig, PropertyConfig, SchemaError, SimilaritySchema};
