//! Error kinds shared by every effect and primitive in the crate.
//!
//! Errors are returned synchronously from the failing call. Nothing is retried
//! internally and a rejected call leaves the previous configuration intact.

use thiserror::Error;

/// Failure of an effect or primitive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EffectError {
    /// The operation needs a prior successful `init`.
    #[error("instance is not initialized")]
    NotInitialized,

    /// A value is outside the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArguments(&'static str),

    /// The call is structurally not allowed in the current state.
    #[error("illegal call: {0}")]
    IllegalCall(&'static str),
}

pub type Result<T> = std::result::Result<T, EffectError>;
