//! Error types for the motion core

use crate::core::timeline::StepId;

/// Problems detected while building a sequence.
///
/// These are programming mistakes in the hero script or timeline wiring,
/// reported once when the sequence is assembled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("step {0} is referenced before it was added")]
    UnknownStep(StepId),

    #[error("unknown ease name: {0}")]
    UnknownEase(String),

    #[error("typewriter sentence is empty")]
    EmptySentence,

    #[error("typewriter sentence ends with whitespace")]
    TrailingWhitespace,

    #[error("word cycle needs at least one word")]
    EmptyWordList,

    #[error("typing rate must be greater than zero")]
    ZeroTypingRate,
}

/// Failure of a single step's visual effect.
///
/// Never fatal: the timeline skips the step's visuals and keeps going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error("target not found: {0}")]
    MissingTarget(String),

    #[error("layout not settled for: {0}")]
    LayoutUnsettled(String),
}
