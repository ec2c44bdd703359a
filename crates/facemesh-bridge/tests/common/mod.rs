//! Scripted landmark engine for driving the bridge without a model.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use facemesh_bridge::{
    BridgeError, DetectionResult, FaceLandmarker, Landmark, LandmarkEngine, Result,
    LANDMARK_COUNT,
};
use image::RgbImage;
use parking_lot::Mutex;

/// What the scripted engine answers with.
#[derive(Clone)]
pub enum Script {
    /// Synthesize a mesh from the pixels; all-black frames have no face
    FromPixels,
    /// Always return these faces
    Faces(Vec<Vec<Landmark>>),
    /// Report an engine failure
    Fail,
    /// Panic inside detection
    Panic,
}

/// Counters shared between a test and the engine it handed to the bridge.
#[derive(Clone, Default)]
pub struct Tally {
    pub calls: Arc<AtomicUsize>,
    pub drops: Arc<AtomicUsize>,
    pub last_dimensions: Arc<Mutex<Option<(u32, u32)>>>,
}

impl Tally {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    pub fn last_dimensions(&self) -> Option<(u32, u32)> {
        *self.last_dimensions.lock()
    }
}

pub struct ScriptedEngine {
    script: Script,
    tally: Tally,
}

impl ScriptedEngine {
    pub fn new(script: Script) -> (Self, Tally) {
        let tally = Tally::default();
        (
            Self {
                script,
                tally: tally.clone(),
            },
            tally,
        )
    }
}

impl LandmarkEngine for ScriptedEngine {
    fn detect(&mut self, image: &RgbImage) -> Result<DetectionResult> {
        self.tally.calls.fetch_add(1, Ordering::SeqCst);
        *self.tally.last_dimensions.lock() = Some(image.dimensions());

        match &self.script {
            Script::FromPixels => Ok(mesh_from_pixels(image)),
            Script::Faces(faces) => Ok(DetectionResult {
                faces: faces.clone(),
            }),
            Script::Fail => Err(BridgeError::Inference("scripted failure".to_string())),
            Script::Panic => panic!("scripted panic"),
        }
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        self.tally.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Deterministic mesh derived from mean brightness. Black frames yield none.
fn mesh_from_pixels(image: &RgbImage) -> DetectionResult {
    let raw = image.as_raw();
    let total: u64 = raw.iter().map(|&b| b as u64).sum();
    if total == 0 {
        return DetectionResult::no_faces();
    }

    let mean = total as f32 / raw.len() as f32 / 255.0;
    let landmarks = (0..LANDMARK_COUNT)
        .map(|i| {
            let t = i as f32 / LANDMARK_COUNT as f32;
            Landmark::new(t, mean, t * mean - 0.5)
        })
        .collect();
    DetectionResult::single(landmarks)
}

/// A full mesh with distinct per-index values.
pub fn indexed_mesh(count: usize) -> Vec<Landmark> {
    (0..count)
        .map(|i| Landmark::new(i as f32, i as f32 + 0.5, -(i as f32)))
        .collect()
}

/// Landmarker wrapping a scripted engine, plus its tally.
pub fn scripted_landmarker(script: Script) -> (FaceLandmarker, Tally) {
    let (engine, tally) = ScriptedEngine::new(script);
    (FaceLandmarker::with_engine(Box::new(engine)), tally)
}

/// Heap handle as `facemesh_landmarker_create` would return it.
pub fn scripted_handle(script: Script) -> (*mut FaceLandmarker, Tally) {
    let (landmarker, tally) = scripted_landmarker(script);
    (Box::into_raw(Box::new(landmarker)), tally)
}

/// Mid-gray frame of the given size.
pub fn gray_frame(width: usize, height: usize) -> Vec<u8> {
    vec![128u8; width * height * 3]
}
