use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::element::element_model::DomElementDescriptor;
use crate::geometry::bbox::BoundingBox;

/// One element as reported by the browser collaborator's DOM snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct DomSnapshotElement {
    pub xpath: String,
    pub tag_name: String,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub location_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub location_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default)]
    pub is_visible: bool,
    /// Attribute values; non-string values are ignored when read.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

/// Non-numeric coordinates become `None` instead of failing the whole snapshot.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|n| n.is_finite()))
}

impl DomSnapshotElement {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(
            self.location_x?,
            self.location_y?,
            self.width?,
            self.height?,
        ))
    }

    /// Text sources in preference order, trimmed, lowercased, empties dropped.
    ///
    /// Button-like inputs put their `value` first since it is the visible caption.
    pub fn text_candidates(&self) -> Vec<String> {
        let mut raw: Vec<&str> = Vec::new();
        raw.extend(self.text_content.as_deref());
        for key in ["aria-label", "value", "placeholder", "id", "name"] {
            raw.extend(self.attr(key));
        }

        let tag = self.tag_name.to_lowercase();
        let input_type = self.attr("type").unwrap_or("").to_lowercase();
        if tag == "input" && matches!(input_type.as_str(), "button" | "submit" | "reset") {
            if let Some(value) = self.attr("value") {
                raw.insert(0, value);
            }
        }

        raw.into_iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }

    pub fn into_descriptor(self) -> DomElementDescriptor {
        let text_candidates = self.text_candidates();
        let bounding_box = self.bounding_box();
        DomElementDescriptor {
            locator: self.xpath.clone(),
            tag_name: self.tag_name.to_lowercase(),
            type_attribute: self.attr("type").map(|s| s.to_string()),
            role: self.attr("role").map(|s| s.to_string()),
            text_candidates,
            bounding_box,
            is_visible: self.is_visible,
        }
    }
}

/// Convert a whole snapshot, preserving order.
pub fn descriptors_from_snapshot(elements: Vec<DomSnapshotElement>) -> Vec<DomElementDescriptor> {
    elements
        .into_iter()
        .map(DomSnapshotElement::into_descriptor)
        .collect()
}

/// Read a snapshot array, or a `{"dom": [...]}` wrapper around one.
///
/// Items missing `xpath` or `tag_name`, or otherwise unreadable, are skipped
/// with a warning. Anything that is not an array is an error.
pub fn snapshot_from_value(raw: &Value) -> Result<Vec<DomSnapshotElement>, serde_json::Error> {
    let list = raw.get("dom").unwrap_or(raw);
    let Some(items) = list.as_array() else {
        return Vec::<DomSnapshotElement>::deserialize(list);
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match DomSnapshotElement::deserialize(item) {
            Ok(element) => Some(element),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable DOM snapshot element");
                None
            }
        })
        .collect())
}
