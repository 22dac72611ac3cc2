use crate::{
    element::{
        dom::{DomSnapshotElement, descriptors_from_snapshot},
        visual::parse_perception_output,
    },
    grounding::{config::GroundingConfig, engine::ground, grounding_model::GroundedElement},
};

pub mod cli;
pub mod element;
pub mod error;
pub mod geometry;
pub mod grounding;
pub mod report;
pub mod text;
pub mod trace;

/// Ground a raw perception answer against a raw DOM snapshot in one call.
///
/// `perception` is the vision model's `{"identified_elements": [...]}` answer,
/// `dom` the browser collaborator's element array.
pub fn ground_page(
    perception: &serde_json::Value,
    dom: Vec<DomSnapshotElement>,
    config: &GroundingConfig,
) -> Vec<GroundedElement> {
    let visuals = parse_perception_output(perception);
    let doms = descriptors_from_snapshot(dom);
    ground(&visuals, &doms, config)
}
