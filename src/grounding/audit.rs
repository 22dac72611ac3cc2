use std::collections::HashMap;

use tracing::warn;

use crate::grounding::grounding_model::{DuplicateBinding, GroundedElement};

/// DOM locators bound by two or more visual elements, in first-bound order.
///
/// Each visual element is matched independently, so duplicates are legal
/// output; this only surfaces them for callers that need exclusivity.
pub fn duplicate_bindings(results: &[GroundedElement]) -> Vec<DuplicateBinding> {
    let mut order: Vec<&str> = Vec::new();
    let mut claims: HashMap<&str, Vec<String>> = HashMap::new();

    for result in results {
        if let Some(locator) = result.locator() {
            let ids = claims.entry(locator).or_insert_with(|| {
                order.push(locator);
                Vec::new()
            });
            ids.push(result.element.id.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|locator| {
            let ids = claims.remove(locator)?;
            if ids.len() < 2 {
                return None;
            }
            warn!(locator, elements = ?ids, "DOM element bound by multiple visual elements");
            Some(DuplicateBinding {
                locator: locator.to_string(),
                element_ids: ids,
            })
        })
        .collect()
}
