use serde::Serialize;
use sha1::{Digest, Sha1};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    element::element_model::DomElementDescriptor,
    grounding::grounding_model::{GroundedElement, Grounding, MatchTier},
};

/// One JSONL line per grounded visual element.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    /// Fingerprint of the DOM snapshot the pass ran against.
    pub pass: String,

    pub element_id: String,
    pub label: Option<String>,
    pub kind: String,

    pub outcome: String,
    pub locator: Option<String>,
    pub tier: Option<MatchTier>,
    pub confidence: f64,

    /// Visible, type-compatible candidates that were scored.
    pub candidates_considered: usize,

    pub reason: Option<String>,
}

impl TraceEvent {
    pub fn now(pass: &str, grounded: &GroundedElement) -> Self {
        let element = &grounded.element;
        let (outcome, locator, tier) = match &grounded.grounding {
            Grounding::Bound { locator, tier, .. } => ("bound", Some(locator.clone()), Some(*tier)),
            Grounding::Unbound => ("unbound", None, None),
        };

        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            pass: pass.to_string(),
            element_id: element.id.clone(),
            label: element.label_text.clone(),
            kind: format!("{:?}", element.matching_kind()),
            outcome: outcome.to_string(),
            locator,
            tier,
            confidence: grounded.confidence(),
            candidates_considered: 0,
            reason: None,
        }
    }

    pub fn with_candidates(mut self, considered: usize) -> Self {
        self.candidates_considered = considered;
        self
    }

    pub fn with_reason(mut self, reason: impl ToString) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}

/// SHA-1 over the snapshot's locators, so trace lines from one pass group together.
pub fn pass_fingerprint(doms: &[DomElementDescriptor]) -> String {
    let mut hasher = Sha1::new();
    for dom in doms {
        hasher.update(dom.locator.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
