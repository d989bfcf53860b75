use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use screensweeper::{CellState, DeductionEngine, GridPos, GridStateStore};

/// 16x16 board with a band of numbered cells next to flags and unknowns, so
/// both rules fire a realistic number of times in one pass.
fn seeded_store() -> GridStateStore {
    let mut store = GridStateStore::new(16, 16);
    for y in 0..16 {
        for x in 0..16 {
            let pos = GridPos::new(x, y);
            let state = match (x + y) % 5 {
                0 => CellState::Empty,
                1 => CellState::Number(1),
                2 => CellState::Flag,
                3 => CellState::Number(2),
                _ => CellState::Unknown,
            };
            store.set(pos, state);
        }
    }
    store
}

fn deduction_pass_benchmark(c: &mut Criterion) {
    c.bench_function("deduction pass 16x16", |b| {
        b.iter_batched(
            || (DeductionEngine::new(), seeded_store()),
            |(mut engine, mut store)| engine.run_pass(&mut store),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, deduction_pass_benchmark);
criterion_main!(benches);
