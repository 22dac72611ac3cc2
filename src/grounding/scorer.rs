use tracing::debug;

use crate::element::element_model::{DomElementDescriptor, VisualElementDescriptor};
use crate::geometry::bbox::{BoundingBox, intersection_over_union};
use crate::grounding::config::GroundingConfig;
use crate::grounding::grounding_model::{MatchResult, MatchTier};
use crate::text::similarity::max_similarity;

/// Weighted sum of geometric overlap and label similarity.
pub fn fused_score(iou: f64, text_similarity: f64, config: &GroundingConfig) -> f64 {
    config.geometry_weight * iou + config.text_weight * text_similarity
}

/// Discounted overlap used when no text-corroborated match is confident enough.
pub fn fallback_score(iou: f64, config: &GroundingConfig) -> f64 {
    iou * config.fallback_confidence_ceiling
}

/// IoU against a candidate; a candidate without a box overlaps nothing.
pub fn candidate_iou(visual_box: &BoundingBox, candidate: &DomElementDescriptor) -> f64 {
    candidate
        .bounding_box
        .as_ref()
        .map(|b| intersection_over_union(visual_box, b))
        .unwrap_or(0.0)
}

/// Pick the best candidate for one visual element.
///
/// `candidates` are `(index, descriptor)` pairs that already passed the
/// visibility and type filters, in DOM order. The running best is replaced
/// only by a strictly higher score, so the first of equal candidates wins.
pub fn best_candidate<'a, I>(
    visual: &VisualElementDescriptor,
    visual_box: &BoundingBox,
    candidates: I,
    config: &GroundingConfig,
) -> Option<MatchResult>
where
    I: IntoIterator<Item = (usize, &'a DomElementDescriptor)>,
{
    let label = visual.label_text.as_deref();
    let mut best: Option<MatchResult> = None;

    for (index, candidate) in candidates {
        let iou = candidate_iou(visual_box, candidate);

        if iou > config.fused_admission_iou {
            let text = max_similarity(label, &candidate.text_candidates);
            let score = fused_score(iou, text, config);
            debug!(
                element = %visual.id,
                locator = %candidate.locator,
                iou,
                text,
                score,
                "fused candidate"
            );
            offer(&mut best, index, score, MatchTier::Fused);
        }

        if best_score(&best) < config.fallback_trigger_score && iou > config.fallback_admission_iou {
            let score = fallback_score(iou, config);
            debug!(
                element = %visual.id,
                locator = %candidate.locator,
                iou,
                score,
                "geometric fallback candidate"
            );
            offer(&mut best, index, score, MatchTier::GeometricFallback);
        }
    }

    best
}

fn best_score(best: &Option<MatchResult>) -> f64 {
    best.map(|b| b.score).unwrap_or(0.0)
}

fn offer(best: &mut Option<MatchResult>, candidate_index: usize, score: f64, tier: MatchTier) {
    if score > best_score(best) {
        *best = Some(MatchResult {
            candidate_index,
            score,
            tier,
        });
    }
}
