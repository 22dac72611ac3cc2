use form_grounding::element::compat::is_compatible;
use form_grounding::element::element_model::PredictedKind;

fn compat(kind: PredictedKind, tag: &str, ty: Option<&str>) -> bool {
    is_compatible(kind, tag, ty, None)
}

#[test]
fn text_field_accepts_textual_inputs_and_textarea() {
    for ty in [
        "text", "email", "password", "search", "tel", "url", "number", "date",
        "datetime-local", "month", "week", "time", "",
    ] {
        assert!(compat(PredictedKind::TextField, "input", Some(ty)), "type '{}'", ty);
    }
    assert!(compat(PredictedKind::TextField, "input", None), "missing type attribute");
    assert!(compat(PredictedKind::TextField, "textarea", None));
}

#[test]
fn text_field_rejects_non_textual_inputs() {
    for ty in ["checkbox", "radio", "submit", "file", "hidden", "range"] {
        assert!(!compat(PredictedKind::TextField, "input", Some(ty)), "type '{}'", ty);
    }
    assert!(!compat(PredictedKind::TextField, "select", None));
}

#[test]
fn textarea_only_accepts_textarea() {
    assert!(compat(PredictedKind::Textarea, "textarea", None));
    assert!(!compat(PredictedKind::Textarea, "input", Some("text")));
}

#[test]
fn choice_kinds_need_matching_input_type() {
    assert!(compat(PredictedKind::Checkbox, "input", Some("checkbox")));
    assert!(!compat(PredictedKind::Checkbox, "input", Some("radio")));
    assert!(!compat(PredictedKind::Checkbox, "select", Some("")));
    assert!(compat(PredictedKind::Radio, "input", Some("radio")));
    assert!(!compat(PredictedKind::Radio, "input", Some("checkbox")));
}

#[test]
fn dropdown_needs_select() {
    assert!(compat(PredictedKind::Dropdown, "select", None));
    assert!(!compat(PredictedKind::Dropdown, "input", Some("text")));
}

#[test]
fn button_accepts_buttons_button_inputs_and_role() {
    assert!(compat(PredictedKind::Button, "button", None));
    for ty in ["button", "submit", "reset", "image"] {
        assert!(compat(PredictedKind::Button, "input", Some(ty)), "type '{}'", ty);
    }
    assert!(is_compatible(PredictedKind::Button, "div", None, Some("button")));
    assert!(is_compatible(PredictedKind::Button, "a", None, Some("BUTTON")));
    assert!(!compat(PredictedKind::Button, "input", Some("text")));
    assert!(!compat(PredictedKind::Button, "a", None));
}

#[test]
fn specialised_inputs_match_their_type_only() {
    assert!(compat(PredictedKind::EmailInput, "input", Some("email")));
    assert!(!compat(PredictedKind::EmailInput, "input", Some("text")));
    assert!(compat(PredictedKind::PhoneInput, "input", Some("tel")));
    assert!(!compat(PredictedKind::PhoneInput, "textarea", None));
}

#[test]
fn other_accepts_any_input() {
    assert!(compat(PredictedKind::Other, "input", Some("file")));
    assert!(compat(PredictedKind::Other, "input", Some("range")));
    assert!(!compat(PredictedKind::Other, "select", None));
}

#[test]
fn unknown_is_lenient() {
    assert!(compat(PredictedKind::Unknown, "select", None));
    assert!(compat(PredictedKind::Unknown, "span", None));
}

#[test]
fn tag_and_type_ignore_case() {
    assert!(compat(PredictedKind::TextField, "INPUT", Some("EMAIL")));
    assert!(compat(PredictedKind::Dropdown, "SELECT", None));
    assert!(compat(PredictedKind::Checkbox, "Input", Some("CheckBox")));
}
