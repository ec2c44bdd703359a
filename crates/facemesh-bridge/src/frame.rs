//! Frame marshaling
//!
//! Turns a borrowed RGB8 byte buffer into an owned [`RgbImage`] the engine
//! can hold onto. The caller's buffer is copied, never retained.

use image::RgbImage;

use crate::error::{BridgeError, Result};
use crate::types::RGB_CHANNELS;

/// Byte length of a tightly packed RGB8 frame, or `None` on overflow.
pub fn expected_frame_size(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(RGB_CHANNELS)
}

/// Copy `pixels` into an owned RGB image of the given dimensions.
///
/// `pixels` must be exactly `width * height * 3` bytes, row-major, no row
/// padding. There is no upper bound beyond `usize` overflow: any buffer whose
/// length matches the dimensions is accepted. No channel reordering is done:
/// BGR input is indistinguishable from RGB and is passed through as-is.
pub fn marshal_rgb(pixels: &[u8], width: u32, height: u32) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        return Err(BridgeError::InvalidInput(format!(
            "invalid frame dimensions {}x{}",
            width, height
        )));
    }

    let expected = expected_frame_size(width, height).ok_or_else(|| {
        BridgeError::InvalidInput(format!("frame {}x{} size overflows", width, height))
    })?;

    if pixels.len() != expected {
        return Err(BridgeError::FrameSizeMismatch {
            actual: pixels.len(),
            expected,
            width,
            height,
        });
    }

    RgbImage::from_raw(width, height, pixels.to_vec()).ok_or_else(|| {
        BridgeError::InvalidInput(format!("cannot build {}x{} RGB image", width, height))
    })
}
