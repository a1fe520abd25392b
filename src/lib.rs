//! # cbrx
//!
//! A case-based reasoning similarity engine.
//!
//! cbrx scores a collection of in-memory cases against a partially specified
//! query, ranks and paginates the hits, and summarizes them with facets.
//! Similarity models are composed from small evaluators: equality, lookup
//! tables, total orders, set inclusion and bounded numeric ranges with
//! tolerance curves, combined per record by weighted average, median, min,
//! max or Euclidean norm.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! cbrx --cases whiskeys.json --schema schema.json --request request.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use cbrx::prelude::*;
//! use serde_json::json;
//!
//! let size = Numeric::new(
//!     NumericEvaluationOptions::new(0.0, 100.0)
//!         .with_both(FunctionCalculationParameter::default().with_tolerance_zone(1.0)),
//! )
//! .unwrap();
//!
//! let evaluator = case_average(vec![
//!     PropertyMapping::weighted("color", Equality, 2.0).unwrap(),
//!     PropertyMapping::new("size", size),
//! ]);
//!
//! let cases = vec![
//!     json!({"color": "red", "size": 20}),
//!     json!({"color": "orange", "size": 70}),
//!     json!({"color": "green", "size": 50}),
//! ];
//!
//! let request = ReasoningRequest::new(json!({"size": 50})).with_facet(FacetConfig::new("color"));
//! let response = infer(&cases, &request, &evaluator).unwrap();
//! assert_eq!(response.hits[0].case["color"], "green");
//! ```
//!
//! ## Crate Structure
//!
//! cbrx is composed of several crates:
//!
//! - [`cbrx-core`](https://docs.rs/cbrx-core) - Evaluator and Record traits, errors
//! - [`cbrx-similarity`](https://docs.rs/cbrx-similarity) - Evaluators and case aggregators
//! - [`cbrx-casebase`](https://docs.rs/cbrx-casebase) - Ranked retrieval and facets
//! - [`cbrx-schema`](https://docs.rs/cbrx-schema) - JSON-configured similarity models

pub mod cli;

// Re-export core types
pub use cbrx_core::{shared, Error, Evaluator, Record, Result, SharedEvaluator};

// Re-export evaluators
pub use cbrx_similarity::{
    case_average, case_euclidean, case_max, case_median, case_min, coverage, equality,
    set_case_inclusion, set_intermediate, set_query_inclusion, total_order, Aggregation,
    CaseEvaluator, Equality, FunctionCalculationParameter, Interpolation, Numeric,
    NumericEvaluationOptions, PropertyMapping, SetMode, SetSimilarity, TableLookup, TotalOrder,
};

// Re-export retrieval
pub use cbrx_casebase::{
    infer, par_infer, FacetConfig, FacetCount, FacetOrder, FacetResult, FacetValue, Hit,
    ReasoningRequest, ReasoningResponse, ToFacetValue,
};

// Re-export schema
pub use cbrx_schema::{EvaluatorConfig, PropertyConfig, SchemaError, SimilaritySchema};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        case_average, case_euclidean, case_max, case_median, case_min, infer, par_infer,
        Aggregation, CaseEvaluator, Equality, Error, Evaluator, FacetConfig, FacetOrder,
        FunctionCalculationParameter, Interpolation, Numeric, NumericEvaluationOptions,
        PropertyMapping, ReasoningRequest, ReasoningResponse, Record, Result, SetMode,
        SetSimilarity, SimilaritySchema, TableLookup, TotalOrder,
    };
}
