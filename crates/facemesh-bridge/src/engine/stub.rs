//! Fallback backend used when no landmark engine is compiled in.

use std::path::Path;

use crate::engine::{LandmarkBackend, LandmarkEngine};
use crate::error::{BridgeError, Result};
use crate::types::DetectorOptions;

/// Backend that never loads anything.
///
/// Touches neither the filesystem nor the model path.
pub struct StubBackend;

impl LandmarkBackend for StubBackend {
    const AVAILABLE: bool = false;
    const NAME: &'static str = "stub";

    fn load(_model_path: &Path, _options: &DetectorOptions) -> Result<Box<dyn LandmarkEngine>> {
        Err(BridgeError::EngineUnavailable)
    }
}
