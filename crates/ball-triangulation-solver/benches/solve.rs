use std::hint::black_box;

use ball_triangulation_core::{BallRecord, FrameContext};
use ball_triangulation_solver::{BallOrdering, SolverParams, TriangulationSolver};
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point2;

fn balls() -> Vec<BallRecord> {
    [(1500.0, 280.0, "Green"), (1640.0, 310.0, "Red"), (1790.0, 295.0, "Blue")]
        .into_iter()
        .map(|(x, y, label)| {
            BallRecord::new(Point2::new(x, y), Point2::new(x, y), 40.0, label, None)
                .expect("valid ball")
        })
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let balls = balls();
    let ctx = FrameContext::new(0.0, 0.825, 0.0189634, 1640.0).expect("valid calibration");

    let mut group = c.benchmark_group("solve");
    for ordering in [BallOrdering::InputOrder, BallOrdering::SortedByX] {
        let solver = TriangulationSolver::new(SolverParams::default().with_ordering(ordering));
        group.bench_function(format!("{ordering:?}"), |b| {
            b.iter(|| solver.solve_detailed(black_box(&balls), black_box(&ctx)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
