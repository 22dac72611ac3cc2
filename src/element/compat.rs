use crate::element::element_model::PredictedKind;

// ============================================================================
// Structural compatibility table: predicted kind -> acceptable DOM shapes
// ============================================================================

const TEXT_INPUT_TYPES: &[&str] = &[
    "text",
    "email",
    "password",
    "search",
    "tel",
    "url",
    "number",
    "date",
    "datetime-local",
    "month",
    "week",
    "time",
    "",
];

const BUTTON_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "image"];

/// One acceptable DOM shape for a predicted kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `<input>` whose type attribute (missing = "") is in the list.
    Input(&'static [&'static str]),
    /// `<input>` of any type.
    AnyInput,
    /// Element with this tag name.
    Tag(&'static str),
    /// Element carrying this accessibility role.
    Role(&'static str),
    /// Anything at all.
    Any,
}

/// The shapes each kind accepts. A kind with no shapes matches nothing.
pub fn shapes_for(kind: PredictedKind) -> &'static [Shape] {
    match kind {
        PredictedKind::TextField => &[Shape::Input(TEXT_INPUT_TYPES), Shape::Tag("textarea")],
        PredictedKind::EmailInput => &[Shape::Input(&["email"])],
        PredictedKind::PhoneInput => &[Shape::Input(&["tel"])],
        PredictedKind::Textarea => &[Shape::Tag("textarea")],
        PredictedKind::Checkbox => &[Shape::Input(&["checkbox"])],
        PredictedKind::Radio => &[Shape::Input(&["radio"])],
        PredictedKind::Dropdown => &[Shape::Tag("select")],
        PredictedKind::Button => &[
            Shape::Tag("button"),
            Shape::Input(BUTTON_INPUT_TYPES),
            Shape::Role("button"),
        ],
        PredictedKind::Other => &[Shape::AnyInput],
        PredictedKind::Unknown => &[Shape::Any],
    }
}

/// Whether a DOM element with this tag, type attribute and role can be the
/// element perceived as `kind`. Comparisons ignore case.
pub fn is_compatible(
    kind: PredictedKind,
    tag_name: &str,
    type_attribute: Option<&str>,
    role: Option<&str>,
) -> bool {
    let tag = tag_name.trim().to_lowercase();
    let input_type = type_attribute.unwrap_or("").trim().to_lowercase();
    let role = role.map(|r| r.trim().to_lowercase());

    shapes_for(kind).iter().any(|shape| match shape {
        Shape::Input(types) => tag == "input" && types.contains(&input_type.as_str()),
        Shape::AnyInput => tag == "input",
        Shape::Tag(t) => tag == *t,
        Shape::Role(r) => role.as_deref() == Some(*r),
        Shape::Any => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_but_unknown_rejects_a_div() {
        let kinds = [
            PredictedKind::TextField,
            PredictedKind::EmailInput,
            PredictedKind::PhoneInput,
            PredictedKind::Textarea,
            PredictedKind::Dropdown,
            PredictedKind::Checkbox,
            PredictedKind::Radio,
            PredictedKind::Button,
            PredictedKind::Other,
        ];
        for kind in kinds {
            assert!(!is_compatible(kind, "div", None, None), "{:?} accepted a div", kind);
        }
        assert!(is_compatible(PredictedKind::Unknown, "div", None, None));
    }
}
