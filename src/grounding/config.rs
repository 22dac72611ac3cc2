use serde::{Deserialize, Serialize};

use crate::error::GroundingError;

/// Weights and thresholds for the candidate scorer.
///
/// Geometry should outweigh text: labels are often missing or paraphrased,
/// boxes rarely lie about position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingConfig {
    #[serde(default = "default_geometry_weight")]
    pub geometry_weight: f64,

    #[serde(default = "default_text_weight")]
    pub text_weight: f64,

    /// IoU a candidate must strictly exceed to get a fused score.
    #[serde(default = "default_fused_admission_iou")]
    pub fused_admission_iou: f64,

    /// IoU a candidate must strictly exceed for a geometry-only score.
    #[serde(default = "default_fallback_admission_iou")]
    pub fallback_admission_iou: f64,

    /// The geometry-only tier is tried while the running best is below this.
    #[serde(default = "default_fallback_trigger_score")]
    pub fallback_trigger_score: f64,

    /// Multiplier applied to IoU in the geometry-only tier.
    #[serde(
        default = "default_fallback_confidence_ceiling",
        alias = "fallback_discount"
    )]
    pub fallback_confidence_ceiling: f64,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            geometry_weight: default_geometry_weight(),
            text_weight: default_text_weight(),
            fused_admission_iou: default_fused_admission_iou(),
            fallback_admission_iou: default_fallback_admission_iou(),
            fallback_trigger_score: default_fallback_trigger_score(),
            fallback_confidence_ceiling: default_fallback_confidence_ceiling(),
        }
    }
}

impl GroundingConfig {
    /// Reject weights and thresholds that would push scores outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), GroundingError> {
        let unit_fields = [
            ("geometry_weight", self.geometry_weight),
            ("text_weight", self.text_weight),
            ("fused_admission_iou", self.fused_admission_iou),
            ("fallback_admission_iou", self.fallback_admission_iou),
            ("fallback_trigger_score", self.fallback_trigger_score),
            ("fallback_confidence_ceiling", self.fallback_confidence_ceiling),
        ];

        for (name, value) in unit_fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GroundingError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let weight_sum = self.geometry_weight + self.text_weight;
        if weight_sum > 1.0 + 1e-9 {
            return Err(GroundingError::InvalidConfig(format!(
                "geometry_weight + text_weight must not exceed 1.0, got {}",
                weight_sum
            )));
        }

        Ok(())
    }
}

// Serde default helpers
fn default_geometry_weight() -> f64 { 0.6 }
fn default_text_weight() -> f64 { 0.4 }
fn default_fused_admission_iou() -> f64 { 0.1 }
fn default_fallback_admission_iou() -> f64 { 0.6 }
fn default_fallback_trigger_score() -> f64 { 0.5 }
fn default_fallback_confidence_ceiling() -> f64 { 0.7 }
