use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flatlife::{Board, Topology};

fn step_benchmark(c: &mut Criterion) {
  c.bench_function("256x256 toroidal, 64 generations", |b| {
    b.iter(|| {
      let mut rng = StdRng::seed_from_u64(1);
      let mut board = Board::random(256, 256, Topology::Toroidal, &mut rng).unwrap();
      for _ in 0..black_box(64) {
        board.step();
      }
    })
  });

  c.bench_function("256x256 bounded, 64 generations", |b| {
    b.iter(|| {
      let mut rng = StdRng::seed_from_u64(1);
      let mut board = Board::random(256, 256, Topology::Bounded, &mut rng).unwrap();
      for _ in 0..black_box(64) {
        board.step();
      }
    })
  });
}

criterion_group!(benches, step_benchmark);
criterion_main!(benches);
