//! Error types for the landmark bridge
//!
//! Every variant collapses to `false`/NULL at the C boundary; the detail is
//! only visible to Rust callers and in logs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while creating a detector or processing a frame
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Caller-supplied argument is unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Model path does not name a regular file
    #[error("model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Engine could not load or initialize the model
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Requested detector policy is not supported
    #[error("unsupported detector option: {0}")]
    Unsupported(String),

    /// Frame length does not match the declared dimensions
    #[error("frame is {actual} bytes, expected {expected} for {width}x{height} RGB")]
    FrameSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    /// Output buffer cannot hold a full landmark set
    #[error("output buffer holds {capacity} floats, need {required}")]
    OutputTooSmall { capacity: usize, required: usize },

    /// Engine reported an operational failure
    #[error("inference failed: {0}")]
    Inference(String),

    /// Engine ran but found no face
    #[error("no face detected")]
    NoFace,

    /// Detected face carries fewer landmarks than the mesh requires
    #[error("face has {found} landmarks, expected {expected}")]
    InsufficientLandmarks { found: usize, expected: usize },

    /// Bridge was built without a landmark engine
    #[error("landmark engine not compiled in (build with --features onnx)")]
    EngineUnavailable,
}

impl BridgeError {
    /// True for failures caused by the arguments rather than the engine.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidInput(_)
                | BridgeError::FrameSizeMismatch { .. }
                | BridgeError::OutputTooSmall { .. }
        )
    }
}
