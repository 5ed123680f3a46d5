//! Errors raised inside a tick.
//!
//! None of these reach the caller of [`Env::step`](throne_core::Env::step):
//! perception errors degrade to a blank frame and everything else is turned
//! into the fail-safe step by the environment.
use thiserror::Error;

/// Errors in the environment.
#[derive(Error, Debug)]
pub enum EnvError {
    /// The capture backend returned a frame without pixels.
    #[error("Captured frame is empty ({0}x{1})")]
    EmptyFrame(u32, u32),

    /// The input backend failed to deliver an action.
    #[error("Failed to perform action `{action}`: {reason}")]
    Input {
        /// Name of the action.
        action: String,
        /// Message of the backend.
        reason: String,
    },
}
