//! Rank algebra errors.
//!
//! Bounded and stable: these represent refused inputs, not implementation
//! details. All keys normally originate from this crate, so `MalformedKey`
//! only shows up where legacy or hand-edited data leaks in.

use thiserror::Error;

/// A persisted key that does not match the canonical grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("order key `{raw}` is invalid: {reason}")]
pub struct MalformedKey {
    pub raw: String,
    pub reason: String,
}

/// Canonical error enum for the rank algebra.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankError {
    #[error(transparent)]
    Malformed(#[from] MalformedKey),
    #[error("no key exists between `{a}` and `{b}`: {reason}")]
    NoKeyBetween { a: String, b: String, reason: String },
}
