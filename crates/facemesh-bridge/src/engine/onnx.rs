//! ONNX Runtime face mesh backend
//!
//! Runs a single-input face mesh model over the whole frame. The first model
//! output is the landmark tensor (`[1, N, 3]` or flat `[1, N*3]`); a second
//! output, when present, is the face-presence logit.

use std::path::Path;

use image::RgbImage;
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{DynValue, Tensor};
use tracing::{debug, info};

use crate::engine::mesh;
use crate::engine::{LandmarkBackend, LandmarkEngine};
use crate::error::{BridgeError, Result};
use crate::types::{DetectionResult, DetectorOptions, EngineConfig};

/// Backend that loads face mesh models through ONNX Runtime.
pub struct OnnxBackend;

impl LandmarkBackend for OnnxBackend {
    const AVAILABLE: bool = true;
    const NAME: &'static str = "onnx";

    fn load(model_path: &Path, options: &DetectorOptions) -> Result<Box<dyn LandmarkEngine>> {
        let engine = OnnxFaceMesh::load(model_path, options, EngineConfig::default())?;
        Ok(Box::new(engine))
    }
}

/// A loaded face mesh session.
pub struct OnnxFaceMesh {
    session: Session,
    config: EngineConfig,
}

impl OnnxFaceMesh {
    /// Load the model and check it has the outputs the decoder needs.
    pub fn load(
        model_path: &Path,
        options: &DetectorOptions,
        config: EngineConfig,
    ) -> Result<Self> {
        options.validate()?;
        config.validate()?;

        info!(
            model = %model_path.display(),
            input_size = config.input_size,
            "loading face mesh model"
        );

        let mut builder = Session::builder()
            .map_err(|e| BridgeError::ModelLoad(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| BridgeError::ModelLoad(e.to_string()))?;

        if config.num_threads > 0 {
            builder = builder
                .with_intra_threads(config.num_threads)
                .map_err(|e| BridgeError::ModelLoad(e.to_string()))?;
        }

        let session = builder
            .commit_from_file(model_path)
            .map_err(|e| BridgeError::ModelLoad(e.to_string()))?;

        if session.inputs().is_empty() {
            return Err(BridgeError::ModelLoad("model has no inputs".to_string()));
        }
        if session.outputs().is_empty() {
            return Err(BridgeError::ModelLoad("model has no outputs".to_string()));
        }

        info!("face mesh model loaded");

        Ok(Self { session, config })
    }
}

impl LandmarkEngine for OnnxFaceMesh {
    fn detect(&mut self, image: &RgbImage) -> Result<DetectionResult> {
        let size = self.config.input_size as usize;
        let pixels = mesh::to_nchw(image, self.config.input_size);
        let input = Array4::from_shape_vec((1, 3, size, size), pixels)
            .map_err(|e| BridgeError::Inference(e.to_string()))?;
        let tensor =
            Tensor::from_array(input).map_err(|e| BridgeError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .map_err(|e| BridgeError::Inference(e.to_string()))?;

        let names: Vec<String> = outputs.keys().map(|k| k.to_string()).collect();
        let landmarks_name = names
            .first()
            .ok_or_else(|| BridgeError::Inference("model produced no outputs".to_string()))?;

        let coords = extract_floats(&outputs[landmarks_name.as_str()])?;
        let presence = match names.get(1) {
            Some(name) => extract_floats(&outputs[name.as_str()])?.first().copied(),
            None => None,
        };

        debug!(
            values = coords.len(),
            presence = ?presence,
            "face mesh inference complete"
        );

        Ok(mesh::decode(&coords, presence, &self.config))
    }
}

/// Read a tensor as `f32`, accepting the `i32` landmark output some exported
/// face mesh graphs produce.
fn extract_floats(value: &DynValue) -> Result<Vec<f32>> {
    if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
        return Ok(data.to_vec());
    }

    let (_, data) = value
        .try_extract_tensor::<i32>()
        .map_err(|e| BridgeError::Inference(e.to_string()))?;
    Ok(data.iter().map(|&v| v as f32).collect())
}
