//! Per-frame CPU cost: strip simulation and frame staging.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Mat4;
use glyphfall::{
    options::RainOptions,
    rain::{clock::FixedClock, params::RainParams, RainField},
    renderer::frame::FrameData,
};
use rand::{rngs::StdRng, SeedableRng};

fn field(strips: u32, rng: &mut StdRng, clock: &FixedClock) -> RainField {
    let opts = RainOptions {
        strips,
        ..RainOptions::default()
    };
    let Ok(params) = RainParams::new(&opts) else {
        unreachable!("default rain options are valid");
    };
    RainField::new(params, rng, clock)
}

fn tick_benchmark(c: &mut Criterion) {
    let clock = FixedClock("Fri Oct 16 2026 12:00:00 GMT+0000".to_owned());
    let mut group = c.benchmark_group("rain_tick");

    for strips in [44, 200, 1000] {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = field(strips, &mut rng, &clock);
        group.bench_function(format!("{strips}_strips"), |b| {
            b.iter(|| black_box(field.tick(&mut rng, &clock)));
        });
    }
    group.finish();
}

fn frame_update_benchmark(c: &mut Criterion) {
    let clock = FixedClock(String::new());
    let mut group = c.benchmark_group("frame_update");

    for strips in [44, 200, 1000] {
        let mut rng = StdRng::seed_from_u64(2);
        let field = field(strips, &mut rng, &clock);
        let mut frame = FrameData::new(&field);
        group.bench_function(format!("{strips}_strips"), |b| {
            b.iter(|| {
                frame.update(black_box(&field), Mat4::IDENTITY);
                black_box(frame.instance_count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, tick_benchmark, frame_update_benchmark);
criterion_main!(benches);
