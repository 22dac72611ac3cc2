use serde::{Deserialize, Serialize};

use crate::element::element_model::VisualElementDescriptor;

// ============================================================================
// Per-element scoring record and final binding
// ============================================================================

/// Which scoring policy produced a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Weighted geometry + text.
    Fused,
    /// Discounted IoU, used when text gave no confident match.
    GeometricFallback,
}

/// Running best candidate for one visual element during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index into the DOM descriptor list handed to the engine.
    pub candidate_index: usize,
    pub score: f64,
    pub tier: MatchTier,
}

/// Outcome of grounding one visual element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Grounding {
    Bound {
        locator: String,
        /// Winning score rounded to 3 decimals.
        confidence: f64,
        tier: MatchTier,
    },
    Unbound,
}

/// Coarse strength of a grounding confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    None,
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn of(score: f64) -> ConfidenceBand {
        if score >= 0.75 {
            ConfidenceBand::High
        } else if score >= 0.5 {
            ConfidenceBand::Medium
        } else if score > 0.0 {
            ConfidenceBand::Low
        } else {
            ConfidenceBand::None
        }
    }
}

/// A visual descriptor together with its grounding outcome.
///
/// The descriptor is returned untouched; perception and grounding
/// confidences stay separate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundedElement {
    pub element: VisualElementDescriptor,
    pub grounding: Grounding,
}

impl GroundedElement {
    pub fn bound(element: VisualElementDescriptor, locator: &str, best: &MatchResult) -> Self {
        Self {
            element,
            grounding: Grounding::Bound {
                locator: locator.to_string(),
                confidence: round3(best.score),
                tier: best.tier,
            },
        }
    }

    pub fn unbound(element: VisualElementDescriptor) -> Self {
        Self {
            element,
            grounding: Grounding::Unbound,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.grounding, Grounding::Bound { .. })
    }

    pub fn locator(&self) -> Option<&str> {
        match &self.grounding {
            Grounding::Bound { locator, .. } => Some(locator),
            Grounding::Unbound => None,
        }
    }

    /// Grounding confidence; exactly 0.0 when unbound.
    pub fn confidence(&self) -> f64 {
        match &self.grounding {
            Grounding::Bound { confidence, .. } => *confidence,
            Grounding::Unbound => 0.0,
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match &self.grounding {
            Grounding::Bound { tier, .. } => Some(*tier),
            Grounding::Unbound => None,
        }
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence())
    }

    /// Perception confidence times grounding confidence.
    pub fn combined_confidence(&self) -> f64 {
        self.element.perception_confidence.clamp(0.0, 1.0) * self.confidence()
    }
}

/// Diagnostic breakdown of how one DOM candidate scored against a visual element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub index: usize,
    pub locator: String,
    pub visible: bool,
    pub compatible: bool,
    pub iou: f64,
    pub text_similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_distance: Option<f64>,
    /// Set when the candidate cleared the fused admission bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fused: Option<f64>,
    /// Set when the candidate cleared the fallback admission bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<f64>,
}

/// A DOM locator claimed by more than one visual element in the same pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateBinding {
    pub locator: String,
    pub element_ids: Vec<String>,
}

pub(crate) fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
