//! Plain-text and JSON rendering of analysis results.

use std::fmt::Write;

use colored::*;
use serde_json::json;

use crate::config::OutputFormat;
use crate::dnsbl::{BlocklistResult, BlocklistStatus};
use crate::engine::DomainIntelligenceReport;
use crate::error_handling::LookupError;

/// Renders one result per input, in input order.
pub fn render<S: AsRef<str>>(
    format: &OutputFormat,
    inputs: &[S],
    results: &[Result<DomainIntelligenceReport, LookupError>],
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(inputs, results),
        OutputFormat::Plain => Ok(inputs
            .iter()
            .zip(results)
            .map(|(input, result)| match result {
                Ok(report) => render_plain(report),
                Err(e) => render_failure_plain(input.as_ref(), e),
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Labelled lines for one report.
pub fn render_plain(report: &DomainIntelligenceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {}", "Domain:", report.domain.as_str().bold());
    let _ = writeln!(out, "{:<12} {}", "Created:", report.creation_display());
    let _ = writeln!(out, "{:<12} {}", "Age:", report.age_display());
    if let Some(registration) = &report.registration {
        let _ = writeln!(out, "{:<12} {}", "Registry:", registration.registry);
    }

    match &report.reputation {
        Some(reputation) => {
            let _ = writeln!(out, "{:<12} {}", "IP address:", reputation.ip_address);
            let _ = writeln!(out, "{:<12} {}", "Reputation:", reputation.summary());
            let _ = writeln!(out, "{:<12} {}", "Spam score:", reputation.score_display());
            let _ = writeln!(out, "Blocklists:");
            for result in &reputation.results {
                let _ = writeln!(out, "  {}", blocklist_line(result));
            }
        }
        None => {
            let _ = writeln!(out, "{:<12} {}", "Reputation:", report.reputation_summary());
            let _ = writeln!(out, "{:<12} {}", "Spam score:", report.score_display());
        }
    }

    if !report.annotations.is_empty() {
        let _ = writeln!(out, "Errors:");
        for annotation in &report.annotations {
            let _ = writeln!(
                out,
                "  {} ({}): {}",
                annotation.kind.as_str().yellow(),
                annotation.origin,
                annotation.message
            );
        }
    }
    out
}

/// One line for an input that could not be analyzed.
pub fn render_failure_plain(input: &str, error: &LookupError) -> String {
    format!(
        "{:<12} {}\n{:<12} {} ({})\n",
        "Input:",
        input,
        "Error:",
        error.to_string().red(),
        error.kind()
    )
}

/// A JSON array with one entry per input: the report, or the input with
/// its error.
pub fn render_json<S: AsRef<str>>(
    inputs: &[S],
    results: &[Result<DomainIntelligenceReport, LookupError>],
) -> Result<String, serde_json::Error> {
    let entries = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| match result {
            Ok(report) => serde_json::to_value(report),
            Err(e) => Ok(json!({
                "input": input.as_ref(),
                "error": { "kind": e.kind(), "message": e.to_string() },
            })),
        })
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string_pretty(&entries)
}

fn blocklist_line(result: &BlocklistResult) -> String {
    let status = match result.status {
        BlocklistStatus::Listed => result.status.as_str().red(),
        BlocklistStatus::NotListed => result.status.as_str().green(),
        BlocklistStatus::Indeterminate => result.status.as_str().yellow(),
    };
    format!(
        "{:<28} {:<13} ({} ms)",
        result.provider,
        status,
        result.latency.as_millis()
    )
}
