use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    element::{
        compat::is_compatible,
        element_model::{DomElementDescriptor, VisualElementDescriptor},
    },
    geometry::bbox::center_distance,
    grounding::{
        config::GroundingConfig,
        grounding_model::{CandidateScore, GroundedElement, MatchResult},
        scorer::{best_candidate, candidate_iou, fallback_score, fused_score},
    },
    text::similarity::max_similarity,
    trace::{
        logger::TraceLogger,
        trace::{TraceEvent, pass_fingerprint},
    },
};

/// Result of grounding a single visual element, with the bookkeeping that
/// tracing and reporting need.
#[derive(Debug, Clone)]
pub struct GroundingOutcome {
    pub grounded: GroundedElement,
    pub best: Option<MatchResult>,
    pub candidates_considered: usize,
}

/// Whether a DOM candidate may be scored against this visual element at all.
pub fn is_candidate(visual: &VisualElementDescriptor, dom: &DomElementDescriptor) -> bool {
    dom.is_visible
        && is_compatible(
            visual.matching_kind(),
            &dom.tag_name,
            dom.type_attribute.as_deref(),
            dom.role.as_deref(),
        )
}

/// Ground one visual element against the snapshot.
///
/// Never fails: a missing visual box, an empty snapshot or a fully filtered
/// candidate set all resolve to `Unbound`.
pub fn ground_one(
    visual: &VisualElementDescriptor,
    doms: &[DomElementDescriptor],
    config: &GroundingConfig,
) -> GroundingOutcome {
    let Some(visual_box) = visual.bounding_box.filter(|b| b.is_valid()) else {
        warn!(element = %visual.id, "visual element has no usable bounding box");
        return GroundingOutcome {
            grounded: GroundedElement::unbound(visual.clone()),
            best: None,
            candidates_considered: 0,
        };
    };

    let candidates: Vec<(usize, &DomElementDescriptor)> = doms
        .iter()
        .enumerate()
        .filter(|(_, dom)| is_candidate(visual, dom))
        .collect();
    let considered = candidates.len();

    let best = best_candidate(visual, &visual_box, candidates, config);

    let grounded = match &best {
        Some(m) => {
            let locator = &doms[m.candidate_index].locator;
            info!(
                element = %visual.id,
                label = visual.label_text.as_deref().unwrap_or(""),
                locator = %locator,
                score = m.score,
                tier = ?m.tier,
                "grounded visual element"
            );
            GroundedElement::bound(visual.clone(), locator, m)
        }
        None => {
            warn!(
                element = %visual.id,
                label = visual.label_text.as_deref().unwrap_or(""),
                kind = ?visual.matching_kind(),
                considered,
                "could not ground visual element"
            );
            GroundedElement::unbound(visual.clone())
        }
    };

    GroundingOutcome {
        grounded,
        best,
        candidates_considered: considered,
    }
}

/// Ground every visual element independently, preserving input order.
pub fn ground(
    visuals: &[VisualElementDescriptor],
    doms: &[DomElementDescriptor],
    config: &GroundingConfig,
) -> Vec<GroundedElement> {
    info!(
        visual = visuals.len(),
        dom = doms.len(),
        "starting grounding pass"
    );

    visuals
        .iter()
        .map(|v| ground_one(v, doms, config).grounded)
        .collect()
}

/// Same result as `ground`, with visual elements spread across the rayon pool.
pub fn ground_parallel(
    visuals: &[VisualElementDescriptor],
    doms: &[DomElementDescriptor],
    config: &GroundingConfig,
) -> Vec<GroundedElement> {
    info!(
        visual = visuals.len(),
        dom = doms.len(),
        "starting parallel grounding pass"
    );

    visuals
        .par_iter()
        .map(|v| ground_one(v, doms, config).grounded)
        .collect()
}

/// Sequential grounding that also writes one trace event per element.
pub fn ground_with_trace(
    visuals: &[VisualElementDescriptor],
    doms: &[DomElementDescriptor],
    config: &GroundingConfig,
    tracer: &TraceLogger,
) -> Vec<GroundedElement> {
    let pass = pass_fingerprint(doms);
    info!(pass = %pass, visual = visuals.len(), dom = doms.len(), "starting traced grounding pass");

    let mut events = Vec::with_capacity(visuals.len());
    let results = visuals
        .iter()
        .map(|v| {
            let outcome = ground_one(v, doms, config);
            let mut event = TraceEvent::now(&pass, &outcome.grounded)
                .with_candidates(outcome.candidates_considered);
            if outcome.best.is_none() {
                event = event.with_reason(unbound_reason(v, outcome.candidates_considered));
            }
            events.push(event);
            outcome.grounded
        })
        .collect();

    tracer.log_pass(&events);
    results
}

fn unbound_reason(visual: &VisualElementDescriptor, considered: usize) -> &'static str {
    if visual.bounding_box.filter(|b| b.is_valid()).is_none() {
        "missing_bounding_box"
    } else if considered == 0 {
        "no_compatible_candidates"
    } else {
        "below_admission_thresholds"
    }
}

/// Score breakdown of every DOM candidate for one visual element, in DOM order.
///
/// Filtered-out candidates are listed with `compatible`/`visible` false and no
/// tier scores.
pub fn explain(
    visual: &VisualElementDescriptor,
    doms: &[DomElementDescriptor],
    config: &GroundingConfig,
) -> Vec<CandidateScore> {
    let visual_box = visual.bounding_box.filter(|b| b.is_valid());
    let label = visual.label_text.as_deref();

    doms.iter()
        .enumerate()
        .map(|(index, dom)| {
            let iou = visual_box
                .as_ref()
                .map(|vb| candidate_iou(vb, dom))
                .unwrap_or(0.0);
            let text_similarity = max_similarity(label, &dom.text_candidates);
            let distance = match (visual_box.as_ref(), dom.bounding_box.as_ref()) {
                (Some(a), Some(b)) => center_distance(a, b),
                _ => None,
            };
            let eligible = is_candidate(visual, dom) && visual_box.is_some();

            CandidateScore {
                index,
                locator: dom.locator.clone(),
                visible: dom.is_visible,
                compatible: is_compatible(
                    visual.matching_kind(),
                    &dom.tag_name,
                    dom.type_attribute.as_deref(),
                    dom.role.as_deref(),
                ),
                iou,
                text_similarity,
                center_distance: distance,
                fused: (eligible && iou > config.fused_admission_iou)
                    .then(|| fused_score(iou, text_similarity, config)),
                fallback: (eligible && iou > config.fallback_admission_iou)
                    .then(|| fallback_score(iou, config)),
            }
        })
        .collect()
}
