use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::element::element_model::{
    NavigationAction, PredictedKind, VisualElementDescriptor, default_perception_confidence,
};
use crate::geometry::bbox::BoundingBox;

// ============================================================================
// Perception output -> visual descriptors
// ============================================================================

/// Parse the vision model's JSON answer into visual descriptors.
///
/// Expected shape:
/// ```json
/// {"identified_elements": [
///   {"element_type": "text_input", "visual_label": "Email",
///    "element_bbox": [x_min, y_min, x_max, y_max], "label_bbox": [...]}
/// ]}
/// ```
/// Items without a usable `element_bbox` are dropped; everything else is
/// best-effort with defaults.
pub fn parse_perception_output(raw: &Value) -> Vec<VisualElementDescriptor> {
    let Some(items) = raw["identified_elements"].as_array() else {
        warn!("perception output has no 'identified_elements' array");
        return vec![];
    };

    info!(count = items.len(), "parsing perception elements");

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| parse_item(i, item))
        .collect()
}

fn parse_item(index: usize, item: &Value) -> Option<VisualElementDescriptor> {
    if !item.is_object() {
        warn!(index, "perception element is not an object");
        return None;
    }

    let label = item["visual_label"]
        .as_str()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Element_{}", index + 1));

    let Some(bounding_box) = parse_corners(&item["element_bbox"]) else {
        warn!(label = %label, "skipping element with missing or invalid element_bbox");
        return None;
    };

    let kind_raw = item["element_type"].as_str().unwrap_or("unknown");
    let predicted_kind = PredictedKind::parse(kind_raw).unwrap_or_else(|| {
        warn!(kind = kind_raw, label = %label, "unknown element type, using Unknown");
        PredictedKind::Unknown
    });

    let navigation = match predicted_kind {
        PredictedKind::Button => NavigationAction::from_label(&label),
        _ => None,
    };

    Some(VisualElementDescriptor {
        id: format!("vis_{}", index + 1),
        bounding_box: Some(bounding_box),
        label_text: Some(label),
        predicted_kind,
        perception_confidence: default_perception_confidence(),
        label_box: parse_corners(&item["label_bbox"]),
        navigation,
    })
}

/// `[x_min, y_min, x_max, y_max]` -> box. Anything else is `None`.
pub fn parse_corners(value: &Value) -> Option<BoundingBox> {
    let coords = value.as_array()?;
    if coords.len() != 4 {
        return None;
    }

    let nums: Vec<f64> = coords.iter().map(|c| c.as_f64()).collect::<Option<_>>()?;
    if nums.iter().any(|n| !n.is_finite()) {
        return None;
    }
    if nums[2] < nums[0] || nums[3] < nums[1] {
        warn!(?nums, "inverted bounding box corners, clamping extent to zero");
    }

    Some(BoundingBox::from_corners(nums[0], nums[1], nums[2], nums[3]))
}

/// Accept either the perception answer shape or a plain descriptor array.
///
/// Array items that do not read as a descriptor are skipped; the rest of the
/// array is still grounded.
pub fn visual_descriptors_from_value(raw: &Value) -> Result<Vec<VisualElementDescriptor>, serde_json::Error> {
    if raw.get("identified_elements").is_some() {
        return Ok(parse_perception_output(raw));
    }

    let Some(items) = raw.as_array() else {
        return Vec::<VisualElementDescriptor>::deserialize(raw);
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match VisualElementDescriptor::deserialize(item) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable visual descriptor");
                None
            }
        })
        .collect())
}
