pub mod draft;
pub mod question;

use thiserror::Error;

pub use draft::QuizDraft;
pub use question::{QuestionId, QuestionKind, QuestionPatch, QuestionRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("question #{0} not found")]
    NotFound(QuestionId),
    #[error("index {index} is out of range (expected less than {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("points must be positive")]
    InvalidPoints,
}
