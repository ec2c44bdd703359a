//! Behavior of a build without a landmark engine
//!
//! Every entry point must exist, fail deterministically, and never crash.

#![cfg(not(feature = "onnx"))]

mod common;

use std::ffi::CString;
use std::io::Write;
use std::os::raw::c_int;
use std::ptr;

use facemesh_bridge::ffi::{
    facemesh_engine_available, facemesh_landmarker_create, facemesh_landmarker_destroy,
    facemesh_landmarker_process,
};
use common::{indexed_mesh, scripted_handle, Script};
use facemesh_bridge::{BridgeError, FaceLandmarker, LANDMARK_COUNT, LANDMARK_OUTPUT_LEN};

#[test]
fn test_engine_reported_unavailable() {
    assert!(!facemesh_engine_available());
}

#[test]
fn test_create_always_returns_null() {
    let mut model = tempfile::NamedTempFile::new().unwrap();
    model.write_all(b"model bytes").unwrap();
    let existing = model.path().to_str().unwrap().to_string();

    for path in ["anything.task", "", "/nonexistent/face.task", existing.as_str()] {
        let c_path = CString::new(path).unwrap();
        let handle = facemesh_landmarker_create(c_path.as_ptr());
        assert!(handle.is_null(), "create({:?}) returned a handle", path);
    }
    assert!(facemesh_landmarker_create(ptr::null()).is_null());
}

#[test]
fn test_open_reports_unavailable() {
    let model = tempfile::NamedTempFile::new().unwrap();
    let err = FaceLandmarker::open(model.path().to_str().unwrap())
        .err()
        .unwrap();
    assert!(matches!(err, BridgeError::EngineUnavailable));
}

#[test]
fn test_process_always_false() {
    let frame = vec![0u8; 12];
    let mut out = vec![1.5f32; LANDMARK_OUTPUT_LEN];
    let out_ptr = out.as_mut_ptr();

    let cases: [(*const u8, usize, c_int, c_int, *mut f32, c_int); 6] = [
        (frame.as_ptr(), 12, 2, 2, out_ptr, LANDMARK_OUTPUT_LEN as c_int),
        (ptr::null(), 12, 2, 2, out_ptr, LANDMARK_OUTPUT_LEN as c_int),
        (frame.as_ptr(), 12, 2, 2, ptr::null_mut(), LANDMARK_OUTPUT_LEN as c_int),
        (frame.as_ptr(), 12, 0, 0, out_ptr, 0),
        (frame.as_ptr(), 0, -5, 7, out_ptr, -1),
        (ptr::null(), 0, 0, 0, ptr::null_mut(), 0),
    ];

    // A working handle and an address that was never a handle
    let (live, tally) = scripted_handle(Script::Faces(vec![indexed_mesh(LANDMARK_COUNT)]));
    let bogus = 0x10 as *mut FaceLandmarker;

    for handle in [ptr::null_mut(), live, bogus] {
        for (rgb, len, width, height, out_landmarks, out_len) in cases {
            let ok = facemesh_landmarker_process(
                handle,
                rgb,
                len,
                width,
                height,
                out_landmarks,
                out_len,
            );
            assert!(!ok);
        }
    }

    assert!(out.iter().all(|&v| v == 1.5));
    assert_eq!(tally.calls(), 0);
    facemesh_landmarker_destroy(live);
    assert_eq!(tally.drops(), 1);
}

#[test]
fn test_destroy_null_is_noop() {
    facemesh_landmarker_destroy(ptr::null_mut());
    facemesh_landmarker_destroy(ptr::null_mut());
}
