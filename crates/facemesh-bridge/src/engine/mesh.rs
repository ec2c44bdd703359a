//! Face mesh model pre- and post-processing
//!
//! Model-runtime independent so it builds and is tested in every
//! configuration. The face mesh model takes a square RGB crop normalized to
//! [0, 1] in NCHW layout and emits landmark coordinates in input pixels, plus
//! an optional face-presence logit.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::types::{DetectionResult, EngineConfig, Landmark, LANDMARK_DIMS, RGB_CHANNELS};

/// Resize `image` to `size`x`size` and lay it out as `[1, 3, size, size]`.
pub fn to_nchw(image: &RgbImage, size: u32) -> Vec<f32> {
    let resized = if image.dimensions() == (size, size) {
        image.clone()
    } else {
        imageops::resize(image, size, size, FilterType::Triangle)
    };

    let plane = (size as usize) * (size as usize);
    let mut input = vec![0.0f32; RGB_CHANNELS * plane];

    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = (y as usize) * (size as usize) + x as usize;
        for channel in 0..RGB_CHANNELS {
            input[channel * plane + offset] = pixel.0[channel] as f32 / 255.0;
        }
    }

    input
}

/// Logistic function for the presence logit.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Turn raw model outputs into a detection result.
///
/// `coords` is the flat landmark tensor in model input pixels. Coordinates
/// are divided by the input size so x/y are relative to the whole frame. A
/// presence probability below the configured threshold means no face.
pub fn decode(
    coords: &[f32],
    presence_logit: Option<f32>,
    config: &EngineConfig,
) -> DetectionResult {
    if let Some(logit) = presence_logit {
        if sigmoid(logit) < config.presence_threshold {
            return DetectionResult::no_faces();
        }
    }

    let scale = config.input_size as f32;
    let landmarks = coords
        .chunks_exact(LANDMARK_DIMS)
        .map(|c| Landmark::new(c[0] / scale, c[1] / scale, c[2] / scale))
        .collect();

    DetectionResult::single(landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LANDMARK_COUNT;
    use image::Rgb;

    #[test]
    fn test_to_nchw_planar_layout() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(1, 0, Rgb([255, 0, 51]));

        let input = to_nchw(&image, 2);
        assert_eq!(input.len(), 12);
        // R plane, G plane, B plane; pixel (1, 0) is offset 1 in each
        assert_eq!(input[1], 1.0);
        assert_eq!(input[4 + 1], 0.0);
        assert!((input[8 + 1] - 0.2).abs() < 1e-6);
        assert_eq!(input[0], 0.0);
    }

    #[test]
    fn test_to_nchw_resizes() {
        let image = RgbImage::from_pixel(4, 3, Rgb([255, 255, 255]));
        let input = to_nchw(&image, 192);
        assert_eq!(input.len(), 3 * 192 * 192);
        assert!(input.iter().all(|&v| (v - 1.0).abs() < 0.01));
    }

    #[test]
    fn test_decode_normalizes_coordinates() {
        let config = EngineConfig::default();
        let coords: Vec<f32> = (0..LANDMARK_COUNT)
            .flat_map(|_| [96.0, 48.0, -19.2])
            .collect();

        let result = decode(&coords, None, &config);
        assert_eq!(result.faces.len(), 1);
        assert_eq!(result.faces[0].len(), LANDMARK_COUNT);

        let first = result.faces[0][0];
        assert!((first.x - 0.5).abs() < 1e-6);
        assert!((first.y - 0.25).abs() < 1e-6);
        assert!((first.z + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_decode_low_presence_is_no_face() {
        let config = EngineConfig::default();
        let coords = vec![0.0f32; LANDMARK_COUNT * 3];

        let result = decode(&coords, Some(-4.0), &config);
        assert!(result.faces.is_empty());

        let result = decode(&coords, Some(4.0), &config);
        assert_eq!(result.faces.len(), 1);
    }

    #[test]
    fn test_decode_drops_trailing_partial_point() {
        let config = EngineConfig::default();
        let result = decode(&[1.0, 2.0, 3.0, 4.0], None, &config);
        assert_eq!(result.faces[0].len(), 1);
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }
}
