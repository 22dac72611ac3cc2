use crate::error::GroundingError;
use crate::report::report_model::GroundingReport;

/// Pretty-printed JSON for downstream consumers.
pub fn generate_json_report(report: &GroundingReport) -> Result<String, GroundingError> {
    serde_json::to_string_pretty(report).map_err(|source| GroundingError::JsonSerialize {
        context: "grounding report".to_string(),
        source,
    })
}
