//! Facemesh Landmark Bridge
//!
//! Per-frame 468-point facial landmark detection behind a small, stable C
//! ABI. Hosts hand over an RGB8 frame and get back a flat `f32` buffer of
//! `x, y, z` triples without linking against the inference runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────────┐     ┌──────────────────┐
//! │ RGB8 frame  │────▶│ FaceLandmarker │────▶│ 468 × (x, y, z)  │
//! │ (raw bytes) │     │ (engine/stub)  │     │ (caller's f32[]) │
//! └─────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! ## Usage from C
//!
//! ```c
//! FaceLandmarker* landmarker = facemesh_landmarker_create("face_mesh.onnx");
//! if (!landmarker) {
//!     // model missing/unloadable, or no engine compiled in
//! }
//!
//! float landmarks[1404];
//! while (capturing) {
//!     if (facemesh_landmarker_process(landmarker, rgb, width * height * 3,
//!                                     width, height, landmarks, 1404)) {
//!         // landmarks[3*i], landmarks[3*i+1], landmarks[3*i+2]
//!     }
//! }
//!
//! facemesh_landmarker_destroy(landmarker);
//! ```
//!
//! ## Build Modes
//!
//! - `--features onnx`: real engine via ONNX Runtime
//! - default: stub mode; same symbols, create always returns NULL and
//!   process always returns false
//!
//! ## Memory Ownership
//!
//! - `facemesh_landmarker_create()` allocates on Rust heap, caller owns pointer
//! - `facemesh_landmarker_destroy()` must be called to deallocate
//! - Frame and output buffers are borrowed per call, never retained

pub mod engine;
pub mod error;
pub mod ffi;
pub mod frame;
pub mod landmarker;
pub mod logging;
pub mod types;

// Re-export main types
pub use engine::{ActiveBackend, LandmarkBackend, LandmarkEngine};
pub use error::{BridgeError, Result};
pub use landmarker::FaceLandmarker;
pub use types::{
    DetectionResult, DetectorOptions, EngineConfig, FaceLandmarks, Landmark, RunningMode,
    LANDMARK_COUNT, LANDMARK_DIMS, LANDMARK_OUTPUT_LEN,
};
