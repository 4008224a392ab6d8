//! Knowledge-base loading errors.

use thiserror::Error;

/// Why a rule, or a whole knowledge base, could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuleLoadError {
    /// The document is not JSON, or its top level is not an array of rules.
    #[error("invalid rule document: {0}")]
    Json(#[from] serde_json::Error),
    /// The top level parsed but is not an array.
    #[error("rule document must be a JSON array, found {0}")]
    NotAnArray(&'static str),
    /// One rule record does not have the expected shape.
    #[error("rule #{index} is malformed: {message}")]
    Malformed { index: usize, message: String },
    /// A rule has an empty `id`.
    #[error("rule #{index} has an empty id")]
    EmptyId { index: usize },
    /// A second rule reuses an id.
    #[error("duplicate rule id: {0}")]
    DuplicateId(String),
    #[error("rule {rule}: unknown star {name:?}")]
    UnknownStar { rule: String, name: String },
    #[error("rule {rule}: unknown palace {name:?}")]
    UnknownPalace { rule: String, name: String },
    #[error("rule {rule}: unknown branch {name:?}")]
    UnknownBranch { rule: String, name: String },
    #[error("rule {rule}: unknown transformation {name:?}")]
    UnknownTransformation { rule: String, name: String },
    #[error("rule {rule}: unknown star relation {name:?}")]
    UnknownRelation { rule: String, name: String },
    #[error("rule {rule}: unknown consensus label {name:?}")]
    UnknownConsensusLabel { rule: String, name: String },
}

impl RuleLoadError {
    /// Whether the error rejects the whole document rather than one rule.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Json(_) | Self::NotAnArray(_))
    }
}
