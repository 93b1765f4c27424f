use crate::answer::AnswerShape;
use thiserror::Error;

/// Errors raised while planning, generating, or scoring a quiz.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("No problem types selected for a batch of {requested} problems")]
    NoVariantsSelected { requested: usize },

    #[error("Expected a {expected} answer, got a {found} answer")]
    ShapeMismatch {
        expected: AnswerShape,
        found: AnswerShape,
    },

    #[error("Quadratic leading coefficient must be nonzero")]
    DegenerateQuadratic,

    #[error("Quadratic roots must be distinct, got {0} twice")]
    RepeatedRoot(i32),

    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("Choice pool of {available} values cannot supply {needed} distinct distractors")]
    ChoicePoolTooSmall { available: usize, needed: usize },

    #[error("Expected {expected} responses, got {found}")]
    ResponseCountMismatch { expected: usize, found: usize },

    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        phase: &'static str,
        action: &'static str,
    },

    #[error("Unknown problem type '{0}'")]
    UnknownVariant(String),
}

/// Errors raised while reading or writing the stats file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Stats file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stats file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stats file claims {correct} correct out of {total} problems")]
    Inconsistent { correct: u32, total: u32 },
}

pub type Result<T, E = QuizError> = std::result::Result<T, E>;
