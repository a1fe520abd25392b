//! # cbrx Casebase
//!
//! Ranked retrieval over an in-memory collection of cases.
//!
//! Given a (possibly partial) query record and a record-level evaluator,
//! [`infer`] scores every case, ranks by similarity, keeps the cases above
//! the request threshold, computes facets over them and returns one page.
//!
//! ## Example
//!
//! ```rust
//! use cbrx_casebase::{infer, FacetConfig, ReasoningRequest};
//! use cbrx_similarity::{case_average, Equality, PropertyMapping};
//! use serde_json::json;
//!
//! let cases = vec![
//!     json!({"color": "red", "shape": "triangle"}),
//!     json!({"color": "blue", "shape": "circle"}),
//!     json!({"color": "red", "shape": "circle"}),
//! ];
//!
//! let evaluator = case_average(vec![
//!     PropertyMapping::new("color", Equality),
//!     PropertyMapping::new("shape", Equality),
//! ]);
//!
//! let request = ReasoningRequest::new(json!({"color": "red", "shape": "circle"}))
//!     .with_facet(FacetConfig::new("shape"));
//! let response = infer(&cases, &request, &evaluator).unwrap();
//!
//! assert_eq!(response.total_number_of_hits, 3);
//! assert_eq!(response.hits[0].case, &cases[2]);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Score     │────>│    Rank     │────>│   Filter    │
//! │ (evaluator) │     │  (stable)   │     │ (threshold) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Paginate   │<────│   Facets    │
//!                     │(offset/limit│     │ (histograms)│
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod facet;
pub mod infer;
pub mod request;

pub use cbrx_core::{Error, Result};
pub use facet::{
    compute_facets, facet, FacetConfig, FacetCount, FacetOrder, FacetResult, FacetValue,
    ToFacetValue,
};
pub use infer::{infer, par_infer};
pub use request::{Hit, ReasoningRequest, ReasoningResponse};
