pub mod audit;
pub mod config;
pub mod engine;
pub mod grounding_model;
pub mod scorer;
