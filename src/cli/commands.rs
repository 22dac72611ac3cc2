use serde_json::Value;
use tracing::{info, warn};

use crate::cli::config::{AppConfig, resolve_format, resolve_trace_file};
use crate::element::dom::{descriptors_from_snapshot, snapshot_from_value};
use crate::element::element_model::{DomElementDescriptor, VisualElementDescriptor};
use crate::element::visual::visual_descriptors_from_value;
use crate::error::GroundingError;
use crate::grounding::engine::{explain, ground, ground_parallel, ground_with_trace};
use crate::report::console::{format_candidate_table, format_console_report};
use crate::report::json::generate_json_report;
use crate::report::report_model::GroundingReport;
use crate::trace::logger::TraceLogger;

// ============================================================================
// ground subcommand
// ============================================================================

/// Run a grounding pass, render it, and hand back the report.
///
/// Unbound elements are a normal outcome and do not make this fail.
pub fn cmd_ground(
    visual_path: &str,
    dom_path: &str,
    format: Option<&str>,
    output: Option<&str>,
    trace: Option<&str>,
    parallel: bool,
    config: &AppConfig,
) -> Result<GroundingReport, Box<dyn std::error::Error>> {
    config.grounding.validate()?;

    let visuals = load_visuals(visual_path)?;
    let doms = load_doms(dom_path)?;

    let start = std::time::Instant::now();
    let results = match resolve_trace_file(trace, config) {
        Some(path) => {
            if parallel {
                warn!(trace = %path, "tracing runs sequentially, ignoring --parallel");
            }
            ground_with_trace(&visuals, &doms, &config.grounding, &TraceLogger::new(&path))
        }
        None if parallel => ground_parallel(&visuals, &doms, &config.grounding),
        None => ground(&visuals, &doms, &config.grounding),
    };
    let duration = start.elapsed().as_millis();

    let report = GroundingReport::from_results(results).with_duration(duration);
    info!(bound = report.bound, unbound = report.unbound, "grounding pass complete");

    let rendered = match resolve_format(format, config).as_str() {
        "json" => generate_json_report(&report)?,
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(report)
}

// ============================================================================
// explain subcommand
// ============================================================================

pub fn cmd_explain(
    visual_path: &str,
    dom_path: &str,
    index: usize,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    config.grounding.validate()?;

    let visuals = load_visuals(visual_path)?;
    let doms = load_doms(dom_path)?;

    let visual = visuals.get(index).ok_or(GroundingError::IndexOutOfRange {
        index,
        len: visuals.len(),
    })?;

    println!(
        "Visual element {} \"{}\" ({:?})",
        visual.id,
        visual.label_text.as_deref().unwrap_or("<no label>"),
        visual.matching_kind()
    );
    print!("{}", format_candidate_table(&explain(visual, &doms, &config.grounding)));

    Ok(())
}

// ============================================================================
// Input loading
// ============================================================================

fn read_json(path: &str) -> Result<Value, GroundingError> {
    let content = std::fs::read_to_string(path).map_err(|source| GroundingError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| GroundingError::JsonParse {
        context: path.to_string(),
        source,
    })
}

/// Load visual descriptors from either the perception answer or a plain array.
pub fn load_visuals(path: &str) -> Result<Vec<VisualElementDescriptor>, GroundingError> {
    let raw = read_json(path)?;
    visual_descriptors_from_value(&raw).map_err(|source| GroundingError::JsonParse {
        context: format!("visual descriptors in {}", path),
        source,
    })
}

/// Load a DOM snapshot array. A `{"dom": [...]}` wrapper is also accepted.
pub fn load_doms(path: &str) -> Result<Vec<DomElementDescriptor>, GroundingError> {
    let raw = read_json(path)?;
    let elements = snapshot_from_value(&raw).map_err(|source| GroundingError::JsonParse {
        context: format!("DOM snapshot in {}", path),
        source,
    })?;
    Ok(descriptors_from_snapshot(elements))
}
