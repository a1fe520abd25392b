//! Ranked retrieval over an in-memory case base
//!
//! Every case is scored against the query, ranked by similarity (stable, so
//! equal scores keep input order), filtered by the request threshold,
//! summarized into facets and finally cut down to the requested page.

use crate::facet::{compute_facets, ToFacetValue};
use crate::request::{Hit, ReasoningRequest, ReasoningResponse};
use cbrx_core::{Evaluator, Record, Result};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, trace};

/// Score, rank, filter, facet and paginate `cases` for `request`.
///
/// The request is validated before any case is scored.
pub fn infer<'a, C, E>(
    cases: &'a [C],
    request: &ReasoningRequest<C>,
    evaluator: &E,
) -> Result<ReasoningResponse<'a, C>>
where
    C: Record,
    C::Value: ToFacetValue,
    E: Evaluator<C> + ?Sized,
{
    request.validate()?;
    let started = Instant::now();

    let scored: Vec<Hit<'a, C>> = cases
        .iter()
        .map(|case| Hit {
            similarity: evaluator.evaluate(&request.query, case),
            case,
        })
        .collect();

    Ok(finish(scored, request, started))
}

/// [`infer`] with cases scored on the rayon thread pool.
///
/// Produces exactly the same response as [`infer`], including tie order.
pub fn par_infer<'a, C, E>(
    cases: &'a [C],
    request: &ReasoningRequest<C>,
    evaluator: &E,
) -> Result<ReasoningResponse<'a, C>>
where
    C: Record + Sync,
    C::Value: ToFacetValue,
    E: Evaluator<C> + ?Sized,
{
    request.validate()?;
    let started = Instant::now();

    let query = &request.query;
    let scored: Vec<Hit<'a, C>> = cases
        .par_iter()
        .map(|case| Hit {
            similarity: evaluator.evaluate(query, case),
            case,
        })
        .collect();

    Ok(finish(scored, request, started))
}

fn finish<'a, C>(
    mut scored: Vec<Hit<'a, C>>,
    request: &ReasoningRequest<C>,
    started: Instant,
) -> ReasoningResponse<'a, C>
where
    C: Record,
    C::Value: ToFacetValue,
{
    let scored_count = scored.len();

    // stable: equal similarities keep input order
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    scored.retain(|hit| hit.similarity >= request.threshold);
    let total_number_of_hits = scored.len();

    let matching: Vec<&C> = scored.iter().map(|hit| hit.case).collect();
    let facets = compute_facets(&request.facets, &matching);
    for facet in &facets {
        trace!(property = %facet.property, buckets = facet.values.len(), "facet computed");
    }

    let hits: Vec<Hit<'a, C>> = scored
        .into_iter()
        .skip(request.offset)
        .take(request.limit)
        .collect();

    debug!(
        cases = scored_count,
        hits = total_number_of_hits,
        page = hits.len(),
        facets = facets.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "inference finished"
    );

    ReasoningResponse {
        total_number_of_hits,
        hits,
        facets,
    }
}
