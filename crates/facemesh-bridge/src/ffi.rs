//! C-compatible FFI interface for FaceLandmarker
//!
//! This module exposes landmark detection through a C ABI so hosts written
//! in any language with C FFI can use it without linking against the
//! inference runtime.
//!
//! # Memory Ownership Rules
//!
//! - `facemesh_landmarker_create()` allocates on Rust heap, caller owns pointer
//! - `facemesh_landmarker_destroy()` must be called exactly once to deallocate
//! - Pixel and output buffers stay owned by the caller; they are borrowed for
//!   the duration of a call and never retained
//!
//! # Thread Safety
//!
//! Calls on one handle are serialized internally. Different handles are
//! fully independent.
//!
//! # Safety
//!
//! All public FFI functions handle null pointer checks internally and never
//! unwind into the caller. Using a handle after `facemesh_landmarker_destroy`,
//! or destroying it twice, cannot be detected and is undefined behavior.

use std::os::raw::{c_char, c_int};
use std::ptr;

use facemesh_ffi_common::{cstr_to_str, guard, slice_from_raw, slice_from_raw_mut};
use tracing::{debug, warn};

use crate::engine::{ActiveBackend, LandmarkBackend};
use crate::frame;
use crate::landmarker::FaceLandmarker;
use crate::types::LANDMARK_OUTPUT_LEN;

// Safety limits
const MAX_MODEL_PATH_LEN: usize = 4096;

// ============================================================================
// Landmarker Lifecycle
// ============================================================================

/// Create a face landmarker from a model file path.
///
/// # Arguments
/// - `model_path`: Null-terminated UTF-8 path to the model asset
///
/// # Returns
/// Pointer to FaceLandmarker, or NULL if the path is null/empty/missing, the
/// model cannot be loaded, or no engine is compiled in.
/// Caller owns the pointer and must call `facemesh_landmarker_destroy`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn facemesh_landmarker_create(model_path: *const c_char) -> *mut FaceLandmarker {
    guard(ptr::null_mut(), || {
        let path = match unsafe { cstr_to_str(model_path) } {
            Ok(s) if s.len() <= MAX_MODEL_PATH_LEN => s,
            Ok(_) => {
                warn!("model path exceeds {} bytes", MAX_MODEL_PATH_LEN);
                return ptr::null_mut();
            }
            Err(e) => {
                warn!("invalid model path: {}", e);
                return ptr::null_mut();
            }
        };

        match FaceLandmarker::open(path) {
            Ok(landmarker) => Box::into_raw(Box::new(landmarker)),
            Err(e) => {
                warn!(model = path, error = %e, "failed to create face landmarker");
                ptr::null_mut()
            }
        }
    })
}

facemesh_ffi_common::define_handle_free!(facemesh_landmarker_destroy, FaceLandmarker);

// ============================================================================
// Frame Processing
// ============================================================================

/// Detect the 468 landmarks of the first face in an RGB8 frame.
///
/// # Arguments
/// - `landmarker`: Valid FaceLandmarker pointer
/// - `rgb_data`: Pointer to tightly packed RGB8 pixels, row-major
/// - `rgb_len`: Length of `rgb_data` in bytes; must equal `width * height * 3`
/// - `width`: Frame width in pixels
/// - `height`: Frame height in pixels
/// - `out_landmarks`: Buffer receiving `x, y, z` per landmark
/// - `out_len`: Capacity of `out_landmarks` in floats; at least 1404
///
/// # Returns
/// True if a full landmark set was written to the first 1404 slots of
/// `out_landmarks`. On false the buffer is untouched. A build without an
/// engine returns false without reading any argument.
///
/// # Safety
/// - `landmarker` must be null or a live pointer from `facemesh_landmarker_create`
/// - `rgb_data` must point to at least `rgb_len` readable bytes
/// - `out_landmarks` must point to at least `out_len` writable floats
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn facemesh_landmarker_process(
    landmarker: *mut FaceLandmarker,
    rgb_data: *const u8,
    rgb_len: usize,
    width: c_int,
    height: c_int,
    out_landmarks: *mut f32,
    out_len: c_int,
) -> bool {
    guard(false, || {
        // Without an engine no handle can be valid, so none is dereferenced
        if !ActiveBackend::AVAILABLE {
            return false;
        }
        if landmarker.is_null() || rgb_data.is_null() || out_landmarks.is_null() {
            return false;
        }
        if out_len < LANDMARK_OUTPUT_LEN as c_int {
            return false;
        }
        if width <= 0 || height <= 0 {
            return false;
        }

        let landmarker = unsafe { &*landmarker };

        let Some(pixels) = (unsafe { slice_from_raw(rgb_data, rgb_len) }) else {
            return false;
        };
        // Only the declared-valid prefix is ever borrowed for writing
        let Some(out) = (unsafe { slice_from_raw_mut(out_landmarks, LANDMARK_OUTPUT_LEN) }) else {
            return false;
        };

        match landmarker.process_into(pixels, width as u32, height as u32, out) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "landmark detection failed");
                false
            }
        }
    })
}

// ============================================================================
// Utilities
// ============================================================================

/// Report whether a landmark engine was compiled into this library.
///
/// Informational only: without an engine every create returns NULL and every
/// process returns false, so callers need not branch on this.
#[no_mangle]
pub extern "C" fn facemesh_engine_available() -> bool {
    ActiveBackend::AVAILABLE
}

/// Minimum `out_len` accepted by `facemesh_landmarker_process` (468 * 3).
#[no_mangle]
pub extern "C" fn facemesh_landmark_output_len() -> c_int {
    LANDMARK_OUTPUT_LEN as c_int
}

/// Expected byte length of an RGB8 frame, or 0 for invalid dimensions.
#[no_mangle]
pub extern "C" fn facemesh_expected_frame_size(width: c_int, height: c_int) -> usize {
    if width <= 0 || height <= 0 {
        return 0;
    }
    frame::expected_frame_size(width as u32, height as u32).unwrap_or(0)
}

/// Install a stderr tracing subscriber filtered by `RUST_LOG` (default
/// `info`). Safe to call more than once.
#[no_mangle]
pub extern "C" fn facemesh_init_logging() {
    guard((), crate::logging::init);
}

facemesh_ffi_common::define_version_fn!(facemesh_bridge_version);
