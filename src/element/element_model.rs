use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::geometry::bbox::BoundingBox;

// ============================================================================
// Element kinds predicted by the perception step
// ============================================================================

/// Semantic element kind inferred from the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictedKind {
    #[serde(alias = "text_input", alias = "text-field")]
    TextField,
    #[serde(alias = "email_input")]
    EmailInput,
    #[serde(alias = "phone_input")]
    PhoneInput,
    Textarea,
    #[serde(alias = "select")]
    Dropdown,
    Checkbox,
    #[serde(alias = "radio_button")]
    Radio,
    Button,
    #[serde(alias = "other_input")]
    Other,
    Unknown,
}

impl PredictedKind {
    /// Map a free-form kind string from the perception output.
    ///
    /// Returns `None` for strings that do not name a known kind; callers decide
    /// whether that means `Unknown`.
    pub fn parse(raw: &str) -> Option<PredictedKind> {
        let normalized = raw.trim().to_lowercase().replace('-', "_");
        let kind = match normalized.as_str() {
            "text_input" | "text_field" | "text" => PredictedKind::TextField,
            "email_input" => PredictedKind::EmailInput,
            "phone_input" => PredictedKind::PhoneInput,
            "textarea" => PredictedKind::Textarea,
            "dropdown" | "select" => PredictedKind::Dropdown,
            "checkbox" => PredictedKind::Checkbox,
            "radio" | "radio_button" => PredictedKind::Radio,
            "button" => PredictedKind::Button,
            "other" | "other_input" => PredictedKind::Other,
            "unknown" => PredictedKind::Unknown,
            _ => return None,
        };
        Some(kind)
    }
}

/// What a navigation-style button is expected to do when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    SubmitForm,
    NextPage,
    PreviousPage,
    Cancel,
    Login,
}

impl NavigationAction {
    /// Keyword classification of a button label. `None` for plain buttons.
    pub fn from_label(label: &str) -> Option<NavigationAction> {
        let lower = label.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if has(&["submit", "apply", "send", "complete"]) {
            Some(NavigationAction::SubmitForm)
        } else if has(&["next", "continue", "proceed"]) {
            Some(NavigationAction::NextPage)
        } else if has(&["back", "previous"]) {
            Some(NavigationAction::PreviousPage)
        } else if has(&["cancel"]) {
            Some(NavigationAction::Cancel)
        } else if has(&["login", "log in", "sign in"]) {
            Some(NavigationAction::Login)
        } else {
            None
        }
    }
}

// ============================================================================
// Descriptors consumed by the grounding engine
// ============================================================================

/// One UI element as perceived visually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElementDescriptor {
    pub id: String,

    /// `None` when perception produced no usable box; such elements never bind.
    #[serde(default, deserialize_with = "lenient_box")]
    pub bounding_box: Option<BoundingBox>,

    #[serde(default)]
    pub label_text: Option<String>,

    #[serde(default = "default_kind", deserialize_with = "lenient_kind")]
    pub predicted_kind: PredictedKind,

    /// Confidence from the perception step. Grounding never overwrites it.
    #[serde(default = "default_perception_confidence")]
    pub perception_confidence: f64,

    #[serde(default, deserialize_with = "lenient_box", skip_serializing_if = "Option::is_none")]
    pub label_box: Option<BoundingBox>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationAction>,
}

impl VisualElementDescriptor {
    pub fn new(id: &str, bounding_box: BoundingBox, predicted_kind: PredictedKind) -> Self {
        Self {
            id: id.to_string(),
            bounding_box: Some(bounding_box),
            label_text: None,
            predicted_kind,
            perception_confidence: default_perception_confidence(),
            label_box: None,
            navigation: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label_text = Some(label.to_string());
        self
    }

    pub fn with_navigation(mut self, action: NavigationAction) -> Self {
        self.navigation = Some(action);
        self
    }

    /// Kind used for structural compatibility. Navigation elements are buttons.
    pub fn matching_kind(&self) -> PredictedKind {
        if self.navigation.is_some() {
            PredictedKind::Button
        } else {
            self.predicted_kind
        }
    }
}

/// One real, currently rendered page element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomElementDescriptor {
    /// Stable reference (an XPath) the action executor resolves later.
    pub locator: String,
    pub tag_name: String,

    #[serde(default)]
    pub type_attribute: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    /// Preference-ordered, trimmed and lowercased text sources.
    #[serde(default)]
    pub text_candidates: Vec<String>,

    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,

    #[serde(default)]
    pub is_visible: bool,
}

impl DomElementDescriptor {
    pub fn new(locator: &str, tag_name: &str, bounding_box: BoundingBox) -> Self {
        Self {
            locator: locator.to_string(),
            tag_name: tag_name.to_string(),
            type_attribute: None,
            role: None,
            text_candidates: vec![],
            bounding_box: Some(bounding_box),
            is_visible: true,
        }
    }

    pub fn with_type(mut self, type_attribute: &str) -> Self {
        self.type_attribute = Some(type_attribute.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text_candidates.push(text.trim().to_lowercase());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

// Serde default helpers
fn default_kind() -> PredictedKind { PredictedKind::Unknown }
pub(crate) fn default_perception_confidence() -> f64 { 0.7 }

/// A box that is not `{x, y, width, height}` numbers reads as `None`, which
/// leaves that one element unbound instead of failing the whole input.
fn lenient_box<'de, D>(deserializer: D) -> Result<Option<BoundingBox>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(BoundingBox::deserialize(&value).ok())
}

/// Unrecognized kind strings read as `Unknown`, as in perception parsing.
fn lenient_kind<'de, D>(deserializer: D) -> Result<PredictedKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(PredictedKind::parse)
        .unwrap_or(PredictedKind::Unknown))
}
