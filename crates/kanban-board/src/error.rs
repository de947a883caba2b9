//! Board construction errors (identity parsing, vocabulary validation).
//!
//! Drop decisions never surface these: the decision procedure resolves every
//! failure into a structured [`DropOutcome`](crate::reorder::DropOutcome).

use thiserror::Error;

use kanban_rank::RankError;

/// Invalid identifier.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("card id `{raw}` is invalid: {reason}")]
    Card { raw: String, reason: String },
    #[error("status value `{raw}` is invalid: {reason}")]
    Status { raw: String, reason: String },
}

/// Invalid status vocabulary configuration.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum VocabularyError {
    #[error("duplicate status value `{value}`")]
    DuplicateStatus { value: String },
    #[error("default status `{value}` is not in the vocabulary")]
    UnknownDefault { value: String },
}

/// Canonical error enum for the board crate.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum BoardError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
    #[error(transparent)]
    Rank(#[from] RankError),
}
