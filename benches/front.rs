use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mosqp::prelude::*;

/// Three objectives spanning the coordinates, no constraints.
struct Tri;

impl MultiObjectiveProblem for Tri {
    fn num_variables(&self) -> usize {
        3
    }

    fn num_objectives(&self) -> usize {
        3
    }

    fn x_lower(&self) -> &[f64] {
        &[-10.0, -10.0, -10.0]
    }

    fn x_upper(&self) -> &[f64] {
        &[10.0, 10.0, 10.0]
    }

    fn objective(&self, x: &[f64], objective: usize) -> f64 {
        x[objective]
    }

    fn objective_gradient(&self, _x: &[f64], objective: usize, df: &mut [f64]) {
        df.fill(0.0);
        df[objective] = 1.0;
    }
}

fn random_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count).map(|_| Point::random(&mut rng, &Tri)).collect()
}

fn bench_add_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_add_points");

    for count in [100, 500, 2000] {
        let points = random_points(count, 11);
        group.bench_with_input(BenchmarkId::new("count", count), &points, |b, points| {
            b.iter(|| {
                let mut front = ParetoFront::new(usize::MAX, 3, Tolerances::default(), Vec::new());
                front.add_points(points.clone())
            });
        });
    }
    group.finish();
}

fn bench_cleanup(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_cleanup");

    for count in [200, 1000] {
        let points = random_points(count, 13);
        group.bench_with_input(BenchmarkId::new("count", count), &points, |b, points| {
            b.iter(|| {
                // Soft capacity of half the batch forces a long eviction run
                // during the construction cleanup pass.
                let front =
                    ParetoFront::new(points.len() / 2, 3, Tolerances::default(), points.clone());
                front.len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add_points, bench_cleanup);
criterion_main!(benches);
