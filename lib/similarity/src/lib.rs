//! # cbrx Similarity
//!
//! Composable similarity evaluators for case-based reasoning.
//!
//! Every evaluator implements [`cbrx_core::Evaluator`], so evaluators nest:
//! a numeric evaluator can sit inside a total order, which can sit inside a
//! set similarity, which can be mapped to a record property of a case
//! aggregator.
//!
//! ## Features
//!
//! - **Elementary**: equality, directional lookup tables, total orders
//! - **Sets**: coverage, query/case inclusion and their symmetric mean
//! - **Numeric**: bounded ranges with equal and tolerance zones, three
//!   interpolation curves, cyclic domains and origin-centred scaling
//! - **Aggregators**: weighted average, median, min, max, Euclidean norm
//!
//! ## Example
//!
//! ```rust
//! use cbrx_similarity::{
//!     case_average, Equality, FunctionCalculationParameter, Numeric,
//!     NumericEvaluationOptions, PropertyMapping, TableLookup,
//! };
//! use serde_json::json;
//!
//! let mut colors = TableLookup::new();
//! colors.insert_symmetric("red".to_string(), "orange".to_string(), 0.8).unwrap();
//!
//! let size = Numeric::new(
//!     NumericEvaluationOptions::new(0.0, 100.0)
//!         .with_both(FunctionCalculationParameter::default().with_tolerance_zone(1.0)),
//! )
//! .unwrap();
//!
//! let evaluator = case_average(vec![
//!     PropertyMapping::weighted("color", colors, 2.0).unwrap(),
//!     PropertyMapping::new("size", size),
//!     PropertyMapping::new("shape", Equality),
//! ]);
//!
//! let query = json!({"color": "red", "size": 50});
//! let case = json!({"color": "orange", "size": 70, "shape": "circle"});
//! let score = evaluator.score(&query, &case);
//! assert!((score - (2.0 * 0.8 + 0.8) / 3.0).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Numeric    │────>│ TotalOrder  │────>│    Set      │
//! │ (f64 range) │     │ (positions) │     │ (inclusion) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        └───────────────────┼───────────────────┘
//!                            v
//!                   ┌─────────────────┐
//!                   │  CaseEvaluator  │
//!                   │ (property map)  │
//!                   └─────────────────┘
//! ```

pub mod aggregate;
pub mod elementary;
pub mod numeric;
pub mod set;

// Re-export main types for convenience
pub use aggregate::{
    case_average, case_euclidean, case_max, case_median, case_min, Aggregation, CaseEvaluator,
    PropertyMapping,
};
pub use elementary::{equality, total_order, Equality, TableLookup, TotalOrder};
pub use numeric::{FunctionCalculationParameter, Interpolation, Numeric, NumericEvaluationOptions};
pub use set::{
    coverage, set_case_inclusion, set_intermediate, set_query_inclusion, SetMode, SetSimilarity,
};
