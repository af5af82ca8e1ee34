use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use labyrinth_core::*;

fn gen_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for (label, shape) in [
            ("square", Shape::Square),
            ("circle", Shape::Circle),
            ("star", Shape::Star),
        ] {
            for kind in [MazeKind::Perfect, MazeKind::Imperfect] {
                let Ok(config) = MazeConfig::new(difficulty.size(), shape.clone(), kind) else {
                    continue;
                };
                let id = BenchmarkId::new(format!("{difficulty:?}/{kind:?}"), label);
                group.bench_with_input(id, &config, |b, config| {
                    let mut seed = 0;
                    b.iter(|| {
                        seed += 1;
                        black_box(RandomMazeGenerator::new(seed).generate(config))
                    });
                });
            }
        }
    }
    group.finish();
}

criterion_group!(benches, gen_tiers);
criterion_main!(benches);
