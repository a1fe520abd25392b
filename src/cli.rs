//! File loading and execution behind the `cbrx` binary

use anyhow::{bail, Context};
use cbrx_casebase::{infer, par_infer, ReasoningRequest};
use cbrx_schema::SimilaritySchema;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Input files and execution mode of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub cases: PathBuf,
    pub schema: PathBuf,
    pub request: PathBuf,
    pub parallel: bool,
}

/// Load a JSON array of case records
pub fn load_cases(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading cases from {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing cases in {}", path.display()))?;
    match value {
        Value::Array(cases) => Ok(cases),
        _ => bail!("{} must contain a JSON array of cases", path.display()),
    }
}

/// Load a reasoning request (`{query, offset, limit, threshold, facets}`)
pub fn load_request(path: &Path) -> anyhow::Result<ReasoningRequest<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading request from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing request in {}", path.display()))
}

/// Run one inference and render the response as pretty JSON
pub fn run(config: &RunConfig) -> anyhow::Result<String> {
    let schema = SimilaritySchema::from_path(&config.schema)
        .with_context(|| format!("loading schema from {}", config.schema.display()))?;
    let evaluator = schema.build()?;
    info!(
        properties = schema.properties.len(),
        aggregation = ?schema.aggregation,
        "Schema loaded"
    );

    let cases = load_cases(&config.cases)?;
    info!(cases = cases.len(), "Cases loaded");

    let request = load_request(&config.request)?;

    let response = if config.parallel {
        par_infer(&cases, &request, &evaluator)?
    } else {
        infer(&cases, &request, &evaluator)?
    };
    info!(
        hits = response.total_number_of_hits,
        page = response.hits.len(),
        "Reasoning finished"
    );

    Ok(serde_json::to_string_pretty(&response)?)
}
