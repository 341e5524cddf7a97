#[macro_use]
extern crate criterion;
extern crate julibrot;

use criterion::Criterion;
use julibrot::engine::{compute_field, FractalKind};
use julibrot::Viewport;

fn engine_benchmark(c: &mut Criterion) {
    c.bench_function("mandelbrot 128x128 at 100 iterations", |b| {
        let view = Viewport::new(128, 128, -0.5, 0.0, 1.0).unwrap();
        b.iter(|| compute_field(FractalKind::Mandelbrot, &view, 100).unwrap())
    });
    c.bench_function("julia 128x128 at 100 iterations", |b| {
        let view = Viewport::new(128, 128, 0.0, 0.0, 1.0).unwrap();
        b.iter(|| compute_field(FractalKind::julia(None), &view, 100).unwrap())
    });
}

criterion_group!(benches, engine_benchmark);
criterion_main!(benches);
