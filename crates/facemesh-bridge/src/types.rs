//! Core types for landmark detection
//!
//! These types are used internally and flattened into the caller's
//! `f32` buffer in the FFI layer.

use crate::error::{BridgeError, Result};

/// Number of landmarks in one face mesh. Fixed by the model.
pub const LANDMARK_COUNT: usize = 468;

/// Floats per landmark (x, y, z).
pub const LANDMARK_DIMS: usize = 3;

/// Minimum output buffer length, in floats.
pub const LANDMARK_OUTPUT_LEN: usize = LANDMARK_COUNT * LANDMARK_DIMS;

/// Bytes per pixel of an interleaved RGB8 frame.
pub const RGB_CHANNELS: usize = 3;

/// A single facial landmark.
///
/// `x` and `y` are normalized to the image (0.0-1.0 inside the frame), `z` is
/// depth relative to the face, on roughly the same scale as `x`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Raw engine output for one image.
///
/// Each entry of `faces` is one detected face's landmarks in engine order.
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    pub faces: Vec<Vec<Landmark>>,
}

impl DetectionResult {
    pub fn no_faces() -> Self {
        Self::default()
    }

    pub fn single(landmarks: Vec<Landmark>) -> Self {
        Self {
            faces: vec![landmarks],
        }
    }
}

/// Exactly [`LANDMARK_COUNT`] landmarks of one face.
///
/// Index `i` always refers to the same anatomical point.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<Landmark>,
}

impl FaceLandmarks {
    /// Take the first [`LANDMARK_COUNT`] landmarks of an engine face.
    ///
    /// Fails if the engine produced fewer; a partial mesh is never accepted.
    pub fn from_engine(raw: &[Landmark]) -> Result<Self> {
        if raw.len() < LANDMARK_COUNT {
            return Err(BridgeError::InsufficientLandmarks {
                found: raw.len(),
                expected: LANDMARK_COUNT,
            });
        }
        Ok(Self {
            points: raw[..LANDMARK_COUNT].to_vec(),
        })
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    /// Write the mesh into `out` as `x0, y0, z0, x1, y1, z1, ...`.
    ///
    /// Only the first [`LANDMARK_OUTPUT_LEN`] slots are touched. Nothing is
    /// written when `out` is too short.
    pub fn write_flat(&self, out: &mut [f32]) -> Result<()> {
        if out.len() < LANDMARK_OUTPUT_LEN {
            return Err(BridgeError::OutputTooSmall {
                capacity: out.len(),
                required: LANDMARK_OUTPUT_LEN,
            });
        }

        for (slot, point) in out[..LANDMARK_OUTPUT_LEN]
            .chunks_exact_mut(LANDMARK_DIMS)
            .zip(&self.points)
        {
            slot[0] = point.x;
            slot[1] = point.y;
            slot[2] = point.z;
        }

        Ok(())
    }
}

/// Engine running modes.
///
/// Only `Image` (one independent synchronous call per frame) is supported by
/// this bridge.
/// The other variants mirror the engine's options surface and are rejected by
/// [`DetectorOptions::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunningMode {
    #[default]
    Image,
    Video,
    LiveStream,
}

/// Detector policy applied when a handle is created.
///
/// The C ABI always uses [`DetectorOptions::default`]; the fields exist so
/// backends can check they are being asked for what they support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Maximum number of faces to detect
    pub num_faces: usize,
    /// Engine running mode
    pub running_mode: RunningMode,
    /// Emit blendshape coefficients
    pub output_face_blendshapes: bool,
    /// Emit facial transformation matrices
    pub output_facial_transformation_matrixes: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            num_faces: 1,
            running_mode: RunningMode::Image,
            output_face_blendshapes: false,
            output_facial_transformation_matrixes: false,
        }
    }
}

impl DetectorOptions {
    /// Reject anything other than the single-face static-image policy.
    pub fn validate(&self) -> Result<()> {
        if self.num_faces != 1 {
            return Err(BridgeError::Unsupported(format!(
                "num_faces must be 1, got {}",
                self.num_faces
            )));
        }
        if self.running_mode != RunningMode::Image {
            return Err(BridgeError::Unsupported(format!(
                "running mode {:?} (only Image)",
                self.running_mode
            )));
        }
        if self.output_face_blendshapes {
            return Err(BridgeError::Unsupported("face blendshapes".to_string()));
        }
        if self.output_facial_transformation_matrixes {
            return Err(BridgeError::Unsupported(
                "facial transformation matrixes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the face mesh model.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Square model input size in pixels
    pub input_size: u32,
    /// Minimum face presence probability (0.0-1.0)
    pub presence_threshold: f32,
    /// Number of inference threads (0 for auto)
    pub num_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_size: 192,
            presence_threshold: 0.5,
            num_threads: 0, // auto
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(BridgeError::InvalidInput(
                "input_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.presence_threshold) {
            return Err(BridgeError::InvalidInput(
                "presence_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}
