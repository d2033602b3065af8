use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gravitree::physics::bound::Bound;
use gravitree::physics::execution::ExecutionStrategy;
use gravitree::physics::math::{Scalar, random_point_in_ball};
use gravitree::physics::octree::{ForceParameters, Octree, OctreeBody};
use gravitree::simulation::SimulationParameters;
use gravitree::test_utils::seeded_simulation;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const DOMAIN_HALF_WIDTH: Scalar = 10.0;

/// Bodies spread uniformly through a ball that fits inside the domain.
fn generate_test_bodies(count: usize, seed: u64) -> Vec<OctreeBody> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count as u32)
        .map(|id| OctreeBody {
            id,
            position: random_point_in_ball(&mut rng, 0.9 * DOMAIN_HALF_WIDTH),
            mass: rng.random_range(1.0..100.0),
        })
        .collect()
}

fn build_octree(bodies: &[OctreeBody], leaf_capacity: usize) -> Octree {
    let mut octree = Octree::new(Bound::centered(DOMAIN_HALF_WIDTH))
        .with_leaf_capacity(leaf_capacity)
        .with_body_capacity(bodies.len());
    octree.build(bodies.iter().copied());
    octree
}

fn default_force_parameters() -> ForceParameters {
    SimulationParameters::default().force_parameters()
}

// =============================================================================
// Construction
// =============================================================================

fn bench_construction_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction_scaling");

    for &count in &[10, 100, 1_000, 10_000, 100_000] {
        let bodies = generate_test_bodies(count, 42);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| black_box(build_octree(black_box(&bodies), 1)));
        });
    }

    group.finish();
}

fn bench_construction_leaf_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction_leaf_capacity");

    let body_count = 10_000;
    let bodies = generate_test_bodies(body_count, 42);

    for &capacity in &[1, 4, 16, 64] {
        group.throughput(Throughput::Elements(body_count as u64));
        group.bench_with_input(
            BenchmarkId::new("leaf_capacity", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| black_box(build_octree(black_box(&bodies), capacity)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Force queries
// =============================================================================

fn bench_force_query_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_query_scaling");
    let parameters = default_force_parameters();

    for &count in &[10, 100, 1_000, 10_000] {
        let bodies = generate_test_bodies(count, 42);
        let octree = build_octree(&bodies, 1);
        let target = bodies[count / 2];

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| black_box(octree.calculate_force(black_box(&target), &parameters)));
        });
    }

    group.finish();
}

fn bench_theta_tradeoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("theta_tradeoff");

    let body_count = 5_000;
    let bodies = generate_test_bodies(body_count, 42);
    let octree = build_octree(&bodies, 1);

    for &theta in &[0.1, 0.3, 0.5, 1.0, 2.0] {
        let parameters = ForceParameters::new(theta, 1.0, 0.1);

        group.throughput(Throughput::Elements(body_count as u64));
        group.bench_with_input(
            BenchmarkId::new("theta", (theta * 100.0) as u32),
            &theta,
            |b, _| {
                b.iter(|| {
                    let total = bodies
                        .iter()
                        .map(|body| octree.calculate_force(black_box(body), &parameters))
                        .sum::<gravitree::physics::math::Vector>();
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Full steps
// =============================================================================

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for &count in &[1_000, 10_000] {
        for execution in [ExecutionStrategy::Sequential, ExecutionStrategy::Parallel] {
            let mut simulation = seeded_simulation(count, 42).with_execution_strategy(execution);

            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{execution:?}"), count),
                &count,
                |b, _| {
                    b.iter(|| black_box(simulation.step(black_box(1.0 / 60.0))));
                },
            );
        }
    }

    group.finish();
}

fn bench_stats_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_overhead");

    for &count in &[100, 1_000, 10_000] {
        let octree = build_octree(&generate_test_bodies(count, 42), 1);

        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| black_box(octree.stats()));
        });
    }

    group.finish();
}

criterion_group!(
    construction,
    bench_construction_scaling,
    bench_construction_leaf_capacity
);

criterion_group!(queries, bench_force_query_scaling, bench_theta_tradeoff);

criterion_group!(steps, bench_simulation_step, bench_stats_overhead);

criterion_main!(construction, queries, steps);
