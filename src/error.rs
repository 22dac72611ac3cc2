use thiserror::Error;

/// Failures at the edges of the grounding pipeline: reading inputs, parsing
/// them and validating configuration. The engine itself never fails.
#[derive(Debug, Error)]
pub enum GroundingError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("YAML parse error ({context}): {source}")]
    YamlParse {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid grounding config: {0}")]
    InvalidConfig(String),

    #[error("visual element index {index} out of range ({len} elements)")]
    IndexOutOfRange { index: usize, len: usize },
}
