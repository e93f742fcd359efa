//! Error types for the scripting boundary.

use flow_canvas2d::Canvas2dError;
use thiserror::Error;

/// Result type alias using ScriptError.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors raised while dispatching a scripted call.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// No handler is registered under this name.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The call used an argument count no overload accepts.
    #[error("{op}: got {got} arguments, expected {expected}")]
    Arity {
        op: String,
        got: usize,
        expected: String,
    },

    /// An argument had the wrong kind.
    #[error("{op}: argument {index} must be {expected}, got {got}")]
    Type {
        op: String,
        index: usize,
        expected: &'static str,
        got: &'static str,
    },

    /// The drawing context rejected the call.
    #[error(transparent)]
    Canvas(#[from] Canvas2dError),

    /// The image collaborator failed to produce an image.
    #[error("Failed to load image '{url}': {reason}")]
    ImageLoad { url: String, reason: String },
}
