//! Error types for chart calculation.

use thiserror::Error;

/// Coarse classification of a [`ZiweiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Out-of-range birth data. User-correctable, surfaced verbatim.
    InvalidInput,
    /// An internal lookup table failed to produce a mapping.
    Configuration,
    /// Caller-supplied stem/branch disagrees with the recomputed value.
    Mismatch,
}

/// Errors from sexagenary resolution, palace derivation and star placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ZiweiError {
    /// Clock hour outside 0..=23.
    #[error("invalid hour {0}: expected 0..=23")]
    InvalidHour(u8),
    /// Lunar month outside 1..=12.
    #[error("invalid lunar month {0}: expected 1..=12")]
    InvalidMonth(u8),
    /// Lunar day outside 1..=30.
    #[error("invalid lunar day {0}: expected 1..=30")]
    InvalidDay(u8),
    /// Year outside the supported range.
    #[error("invalid year {0}: expected {min}..={max}", min = crate::birth::MIN_YEAR, max = crate::birth::MAX_YEAR)]
    InvalidYear(i32),
    /// Unrecognized heavenly stem name.
    #[error("unknown heavenly stem: {0}")]
    InvalidStem(String),
    /// Unrecognized earthly branch name.
    #[error("unknown earthly branch: {0}")]
    InvalidBranch(String),
    /// Unrecognized gender label.
    #[error("unknown gender: {0}")]
    InvalidGender(String),
    /// Free-text field longer than allowed.
    #[error("{field} is too long: at most {max} characters")]
    TextTooLong { field: &'static str, max: usize },
    /// A sexagenary or table index is malformed.
    #[error("index out of range: {0}")]
    OutOfRange(&'static str),
    /// A placement table is missing a required mapping.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Caller-supplied value disagrees with the engine's recomputation.
    #[error("{field} mismatch: supplied {supplied}, computed {computed}")]
    Mismatch {
        field: &'static str,
        supplied: String,
        computed: String,
    },
}

impl ZiweiError {
    /// Classify this error according to who can fix it.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidHour(_)
            | Self::InvalidMonth(_)
            | Self::InvalidDay(_)
            | Self::InvalidYear(_)
            | Self::InvalidStem(_)
            | Self::InvalidBranch(_)
            | Self::InvalidGender(_)
            | Self::TextTooLong { .. } => ErrorKind::InvalidInput,
            Self::OutOfRange(_) | Self::Configuration(_) => ErrorKind::Configuration,
            Self::Mismatch { .. } => ErrorKind::Mismatch,
        }
    }

    /// Whether the caller can correct the input and retry.
    pub const fn is_user_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput)
    }

    /// Build a [`ZiweiError::Configuration`] and report it.
    pub fn configuration(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!(%msg, "placement table defect");
        Self::Configuration(msg)
    }
}
