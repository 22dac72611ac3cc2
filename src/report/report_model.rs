use serde::{Deserialize, Serialize};

use crate::grounding::{
    audit::duplicate_bindings,
    grounding_model::{ConfidenceBand, DuplicateBinding, GroundedElement, MatchTier},
};

// ============================================================================
// Grounding report: aggregates one pass worth of GroundedElement values
// ============================================================================

/// Aggregated view of a grounding pass.
///
/// Built from the engine output via `from_results()`. Consumed by the console
/// and JSON renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingReport {
    /// Total number of visual elements
    pub total: usize,

    pub bound: usize,
    pub unbound: usize,

    /// Bound elements per scoring tier
    pub fused: usize,
    pub geometric_fallback: usize,

    /// Bound elements per confidence band
    pub high: usize,
    pub medium: usize,
    pub low: usize,

    /// Locators claimed by more than one visual element
    pub duplicates: Vec<DuplicateBinding>,

    /// Wall-clock duration of the pass in milliseconds (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub elements: Vec<GroundedElement>,
}

impl GroundingReport {
    pub fn from_results(results: Vec<GroundedElement>) -> Self {
        let count_tier = |t: MatchTier| results.iter().filter(|r| r.tier() == Some(t)).count();
        let count_band = |b: ConfidenceBand| results.iter().filter(|r| r.band() == b).count();

        let total = results.len();
        let bound = results.iter().filter(|r| r.is_bound()).count();

        Self {
            total,
            bound,
            unbound: total - bound,
            fused: count_tier(MatchTier::Fused),
            geometric_fallback: count_tier(MatchTier::GeometricFallback),
            high: count_band(ConfidenceBand::High),
            medium: count_band(ConfidenceBand::Medium),
            low: count_band(ConfidenceBand::Low),
            duplicates: duplicate_bindings(&results),
            duration_ms: None,
            elements: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Every visual element found a DOM element.
    pub fn fully_grounded(&self) -> bool {
        self.unbound == 0
    }
}
