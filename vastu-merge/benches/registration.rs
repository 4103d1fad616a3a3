//! Benchmark point-set registration performance.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use vastu_merge::core::{Point2D, RigidTransform};
use vastu_merge::matching::{
    MultiStartIcp, RegistrationConfig, find_correspondences, solve_rigid_motion,
};

/// Outline of a rectangular room with an interior wall, one point per cell.
fn room_outline(width: usize, height: usize) -> Vec<Point2D> {
    let mut points = Vec::new();
    for x in 0..width {
        points.push(Point2D::new(x as f64, 0.0));
        points.push(Point2D::new(x as f64, (height - 1) as f64));
    }
    for y in 1..height - 1 {
        points.push(Point2D::new(0.0, y as f64));
        points.push(Point2D::new((width - 1) as f64, y as f64));
    }
    for x in width / 4..width / 2 {
        points.push(Point2D::new(x as f64, (height / 2) as f64));
    }
    points
}

fn bench_correspondences(c: &mut Criterion) {
    let fixed = room_outline(40, 30);
    let moving = RigidTransform::new(0.1, Point2D::new(0.3, -0.2)).apply_all(&fixed);

    c.bench_function("correspondences_brute_force", |b| {
        b.iter(|| black_box(find_correspondences(black_box(&fixed), black_box(&moving))))
    });

    let pairs = find_correspondences(&fixed, &moving);
    c.bench_function("solve_rigid_motion", |b| {
        b.iter(|| black_box(solve_rigid_motion(black_box(&pairs))))
    });
}

fn bench_registration(c: &mut Criterion) {
    let moving = room_outline(40, 30);
    let fixed = RigidTransform::new(std::f64::consts::FRAC_PI_2, Point2D::new(12.0, -3.0))
        .apply_all(&moving);

    let engine = MultiStartIcp::new(RegistrationConfig::exhaustive(8));
    c.bench_function("register_exhaustive_8_starts", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(0);
            black_box(engine.register(black_box(&fixed), black_box(&moving), &mut rng))
        })
    });
}

fn bench_registration_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_room_size");
    group.sample_size(10);

    for size in [20usize, 40, 80].iter() {
        let moving = room_outline(*size, *size * 3 / 4);
        let fixed = RigidTransform::new(std::f64::consts::PI, Point2D::new(5.0, 5.0))
            .apply_all(&moving);
        let engine = MultiStartIcp::new(RegistrationConfig::default());

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(1);
                black_box(engine.register(black_box(&fixed), black_box(&moving), &mut rng))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_correspondences,
    bench_registration,
    bench_registration_sizes
);
criterion_main!(benches);
