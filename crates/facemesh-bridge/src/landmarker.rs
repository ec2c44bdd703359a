//! Face landmarker handle
//!
//! A [`FaceLandmarker`] owns one loaded engine bound to one model for its
//! whole lifetime. Creation either yields a ready detector or an error; there
//! is no half-built state.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::engine::{ActiveBackend, LandmarkBackend, LandmarkEngine};
use crate::error::{BridgeError, Result};
use crate::frame;
use crate::types::{DetectorOptions, FaceLandmarks, LANDMARK_OUTPUT_LEN};

/// Ready-to-run landmark detector.
///
/// Detection calls on one handle are serialized by an internal lock, so the
/// handle may be shared across threads; calls on different handles never
/// contend.
pub struct FaceLandmarker {
    engine: Mutex<Box<dyn LandmarkEngine>>,
    model_path: Option<PathBuf>,
}

impl FaceLandmarker {
    /// Create a detector for the model at `model_path` using the backend
    /// compiled into this build.
    pub fn open(model_path: &str) -> Result<Self> {
        Self::open_with::<ActiveBackend>(model_path)
    }

    /// Create a detector with an explicit backend.
    ///
    /// The fixed policy (one face, image mode, no blendshapes, no matrices)
    /// is always applied.
    pub fn open_with<B: LandmarkBackend>(model_path: &str) -> Result<Self> {
        if model_path.trim().is_empty() {
            return Err(BridgeError::InvalidInput("empty model path".to_string()));
        }
        if !B::AVAILABLE {
            return Err(BridgeError::EngineUnavailable);
        }

        let path = Path::new(model_path);
        if !path.is_file() {
            return Err(BridgeError::ModelNotFound(path.to_path_buf()));
        }

        let engine = B::load(path, &DetectorOptions::default())?;

        info!(model = %path.display(), backend = B::NAME, "face landmarker created");

        Ok(Self {
            engine: Mutex::new(engine),
            model_path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already-loaded engine.
    pub fn with_engine(engine: Box<dyn LandmarkEngine>) -> Self {
        Self {
            engine: Mutex::new(engine),
            model_path: None,
        }
    }

    /// Model this detector was created from, if it was loaded from disk.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    /// Detect the landmarks of the first face in an RGB8 frame.
    ///
    /// The frame is copied into an owned image before the engine sees it.
    pub fn detect(&self, pixels: &[u8], width: u32, height: u32) -> Result<FaceLandmarks> {
        let image = frame::marshal_rgb(pixels, width, height)?;

        let result = self.engine.lock().detect(&image)?;

        let face = result.faces.first().ok_or(BridgeError::NoFace)?;
        FaceLandmarks::from_engine(face)
    }

    /// Detect and write the flat landmark layout into `out`.
    ///
    /// `out` is checked before any engine work and is written only when a
    /// full mesh was produced. Slots past [`LANDMARK_OUTPUT_LEN`] are never
    /// touched.
    pub fn process_into(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        out: &mut [f32],
    ) -> Result<()> {
        if out.len() < LANDMARK_OUTPUT_LEN {
            return Err(BridgeError::OutputTooSmall {
                capacity: out.len(),
                required: LANDMARK_OUTPUT_LEN,
            });
        }

        let landmarks = self.detect(pixels, width, height)?;
        landmarks.write_flat(&mut out[..LANDMARK_OUTPUT_LEN])
    }
}

impl Drop for FaceLandmarker {
    fn drop(&mut self) {
        debug!(model = ?self.model_path, "face landmarker released");
    }
}
