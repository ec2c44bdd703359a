use std::ffi::CString;
use std::os::raw::c_int;
use std::time::Instant;

use facemesh_bridge::ffi::{
    facemesh_engine_available, facemesh_init_logging, facemesh_landmarker_create,
    facemesh_landmarker_destroy, facemesh_landmarker_process,
};
use facemesh_bridge::LANDMARK_OUTPUT_LEN;

// Nose tip, forehead, outer eye corners, chin
const SAMPLE_INDICES: [usize; 5] = [1, 10, 33, 263, 152];

fn main() {
    facemesh_init_logging();

    let mut args = std::env::args().skip(1);
    let (model_path, image_path) = match (args.next(), args.next()) {
        (Some(model), Some(image)) => (model, image),
        _ => {
            eprintln!("usage: detect_image <model.onnx> <image>");
            std::process::exit(2);
        }
    };

    println!("Engine available: {}", facemesh_engine_available());

    let rgb = match image::open(&image_path) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            eprintln!("Failed to read {}: {}", image_path, e);
            std::process::exit(1);
        }
    };
    let (width, height) = rgb.dimensions();
    println!("Image: {}x{}", width, height);

    let c_path = CString::new(model_path.clone()).expect("model path contains a NUL byte");
    let landmarker = facemesh_landmarker_create(c_path.as_ptr());
    if landmarker.is_null() {
        eprintln!("Failed to create landmarker from {}", model_path);
        std::process::exit(1);
    }

    let pixels = rgb.as_raw();
    let mut landmarks = vec![0f32; LANDMARK_OUTPUT_LEN];

    let start = Instant::now();
    let ok = facemesh_landmarker_process(
        landmarker,
        pixels.as_ptr(),
        pixels.len(),
        width as c_int,
        height as c_int,
        landmarks.as_mut_ptr(),
        landmarks.len() as c_int,
    );
    let elapsed = start.elapsed();

    if ok {
        println!("Detected face in {:.2} ms", elapsed.as_secs_f64() * 1000.0);
        for index in SAMPLE_INDICES {
            let base = index * 3;
            println!(
                "  landmark {:3}: x={:.4} y={:.4} z={:.4}",
                index,
                landmarks[base],
                landmarks[base + 1],
                landmarks[base + 2]
            );
        }
    } else {
        println!("No face found ({:.2} ms)", elapsed.as_secs_f64() * 1000.0);
    }

    facemesh_landmarker_destroy(landmarker);
}
