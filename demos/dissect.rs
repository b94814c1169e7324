//! Prints the frame sequence that dissects a handful of sample polygons into
//! a square, one line of triangle counts and cumulative area per frame.

use nalgebra_glm as glm;
use squaring::{build_frames, DVec2};

fn v(x: f64, y: f64) -> DVec2 {
    glm::DVec2::new(x, y)
}

fn run(name: &str, polygon: Vec<DVec2>) {
    println!("== {name} ==");
    let mut seq = build_frames(polygon);
    let mut i = 0;
    loop {
        match seq.get(i) {
            Ok(frame) => {
                println!("  frame {i}: {} triangles, area {:.3}", frame.triangles.len(), frame.area());
                i += 1;
            }
            Err(e) => {
                println!("  done after {i} frames ({e})");
                break;
            }
        }
    }
}

fn main() {
    pretty_env_logger::init();

    run(
        "right isoceles triangle",
        vec![v(0.0, 0.0), v(100.0, 0.0), v(0.0, 100.0)],
    );
    run(
        "thin rectangle",
        vec![v(0.0, 0.0), v(400.0, 0.0), v(400.0, 50.0), v(0.0, 50.0)],
    );
    run(
        "convex pentagon",
        vec![
            v(0.0, 0.0),
            v(100.0, 0.0),
            v(130.0, 70.0),
            v(50.0, 120.0),
            v(-20.0, 70.0),
        ],
    );
}
