//! Performance benchmarks for AVIARY

use aviary::controller::{Controller, GapSeeker};
use aviary::mask::{Silhouettes, SpriteMask};
use aviary::{Config, Simulation};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn gap_seekers(n: usize) -> Vec<Box<dyn Controller>> {
    (0..n).map(|_| Box::new(GapSeeker) as Box<dyn Controller>).collect()
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for population in [50, 200, 500].iter() {
        let mut sim =
            Simulation::new_with_seed(Config::default(), gap_seekers(*population), 42)
                .expect("default config");

        // Warm up
        sim.run(10);

        group.bench_with_input(
            BenchmarkId::new("population", population),
            population,
            |b, _| {
                b.iter(|| {
                    if sim.tick().is_err() {
                        sim = Simulation::new_with_seed(
                            Config::default(),
                            gap_seekers(*population),
                            42,
                        )
                        .expect("default config");
                    }
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mask_overlap(c: &mut Criterion) {
    let config = Config::default();
    let silhouettes = Silhouettes::from_config(&config).expect("default config");

    c.bench_function("mask_overlap_miss", |b| {
        b.iter(|| {
            silhouettes
                .bird
                .overlaps(black_box(&silhouettes.pipe_bottom), black_box((300, 300)))
        });
    });

    c.bench_function("mask_overlap_hit", |b| {
        b.iter(|| {
            silhouettes
                .bird
                .overlaps(black_box(&silhouettes.pipe_bottom), black_box((0, -100)))
        });
    });
}

fn benchmark_bird_physics(c: &mut Criterion) {
    use aviary::bird::Bird;

    let config = Config::default();
    let mut bird = Bird::new(&config.bird);

    c.bench_function("bird_advance", |b| {
        b.iter(|| {
            bird.advance(black_box(&config.bird));
            if bird.y > 10_000.0 {
                bird.flap(&config.bird);
                bird.y = config.bird.spawn_y;
            }
        });
    });
}

fn benchmark_ellipse_mask_build(c: &mut Criterion) {
    c.bench_function("mask_ellipse_68x48", |b| {
        b.iter(|| SpriteMask::ellipse(black_box(68), black_box(48)).expect("non-zero"));
    });
}

criterion_group!(
    benches,
    benchmark_tick,
    benchmark_mask_overlap,
    benchmark_bird_physics,
    benchmark_ellipse_mask_build,
);

criterion_main!(benches);
