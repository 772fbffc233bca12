//! CLI-facing glue: run the engine over the command-line inputs and render
//! the reports.

mod render;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::engine::DomainIntelligenceEngine;

pub use render::{render, render_failure_plain, render_json, render_plain};

/// Rendered output of one CLI run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output: String,
    /// Inputs rejected by normalization
    pub invalid_inputs: usize,
}

/// Analyzes `inputs` with an engine built from `config` and renders the
/// results in `config.output` format.
///
/// # Errors
///
/// Fails only if the engine cannot be initialized or JSON rendering fails;
/// malformed inputs are counted in `invalid_inputs`.
pub async fn run_analysis(config: &Config, inputs: &[String]) -> Result<RunOutcome> {
    let engine =
        DomainIntelligenceEngine::from_config(config).context("Failed to initialize engine")?;
    let results = engine.analyze_many(inputs).await;
    let invalid_inputs = results.iter().filter(|r| r.is_err()).count();
    let output = render(&config.output, inputs, &results).context("Failed to render results")?;
    Ok(RunOutcome {
        output,
        invalid_inputs,
    })
}
