use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use labyrinth_core::*;

fn solver_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for kind in [MazeKind::Perfect, MazeKind::Imperfect] {
            let Ok(config) = MazeConfig::new(difficulty.size(), Shape::Square, kind) else {
                continue;
            };
            let Ok(maze) = Maze::generate(&config, 7) else {
                continue;
            };
            let (width, height) = config.size;
            let ends = ((0, 0), (width - 1, height - 1));

            let id = BenchmarkId::new(format!("{kind:?}"), format!("{difficulty:?}"));
            group.bench_with_input(id, &ends, |b, &(start, end)| {
                b.iter_batched_ref(
                    || maze.clone(),
                    |maze| black_box(maze.solve(start, end)),
                    criterion::BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, solver_tiers);
criterion_main!(benches);
