use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra_glm as glm;
use squaring::build_frames;

fn convex_pentagon() -> Vec<glm::DVec2> {
    vec![
        glm::DVec2::new(0.0, 0.0),
        glm::DVec2::new(100.0, 0.0),
        glm::DVec2::new(130.0, 70.0),
        glm::DVec2::new(50.0, 120.0),
        glm::DVec2::new(-20.0, 70.0),
    ]
}

fn basic_benchmark(c: &mut Criterion) {
    c.bench_function("build_frames over a convex pentagon", |b| {
        b.iter(|| {
            let mut seq = build_frames(black_box(convex_pentagon()));
            let mut i = 0;
            while let Ok(frame) = seq.get(i) {
                black_box(&frame);
                i += 1;
            }
        })
    });
}

criterion_group!(benches, basic_benchmark);
criterion_main!(benches);
