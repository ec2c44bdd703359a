//! Landmark engine abstraction
//!
//! A [`LandmarkBackend`] knows how to load a model into a running
//! [`LandmarkEngine`]. Exactly one backend is active per build, chosen by
//! the `onnx` cargo feature:
//!
//! - `onnx` enabled: [`OnnxBackend`](onnx::OnnxBackend) runs a face mesh model
//!   through ONNX Runtime
//! - `onnx` disabled: [`StubBackend`] refuses every load, so no handle can be
//!   created and every entry point fails
//!
//! Host code is written once against the C ABI and never branches on which
//! backend was compiled in.

use std::path::Path;

use image::RgbImage;

use crate::error::Result;
use crate::types::{DetectionResult, DetectorOptions};

pub mod mesh;
pub mod stub;

#[cfg(feature = "onnx")]
pub mod onnx;

pub use stub::StubBackend;

#[cfg(feature = "onnx")]
pub use onnx::OnnxBackend;

/// Backend compiled into this build.
#[cfg(feature = "onnx")]
pub type ActiveBackend = onnx::OnnxBackend;

/// Backend compiled into this build.
#[cfg(not(feature = "onnx"))]
pub type ActiveBackend = stub::StubBackend;

/// A loaded, ready-to-run landmark detector.
///
/// Detection takes `&mut self`: engines own scratch state and are not
/// expected to tolerate concurrent calls.
pub trait LandmarkEngine: Send {
    /// Run synchronous single-image detection.
    ///
    /// Returns every face the engine found, each with its landmarks in
    /// engine order. An empty `faces` list means no face was found.
    fn detect(&mut self, image: &RgbImage) -> Result<DetectionResult>;
}

/// Build-time selectable source of [`LandmarkEngine`]s.
pub trait LandmarkBackend {
    /// Whether this backend can ever produce an engine.
    const AVAILABLE: bool;

    /// Short name for logs.
    const NAME: &'static str;

    /// Load the model at `model_path` under the given policy.
    fn load(model_path: &Path, options: &DetectorOptions) -> Result<Box<dyn LandmarkEngine>>;
}
