//! # AdaptiveDrive Performance Benchmarks
//!
//! Evaluation has to stay far below the 400 ms settling window, even for
//! large catalogs.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench classification
//! cargo bench generation
//! ```

use adaptive_drive::algorithm::WeatherPolicy;
use adaptive_drive::catalog::{Music, TrackType};
use adaptive_drive::context::{DriveContext, Weather};
use adaptive_drive::mode;
use adaptive_drive::playlist::PlaylistGenerator;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Helper function to create a catalog cycling through every track type
fn create_test_catalog(count: usize) -> Vec<Music> {
    (0..count)
        .map(|i| {
            let track_type = TrackType::ALL[i % TrackType::ALL.len()];
            #[allow(clippy::cast_possible_truncation)]
            let bpm = 60 + (i as u32 * 13) % 120;
            Music::new(&format!("{i}"), &format!("Track {i:05}"), &format!("Artist {}", i % 50), track_type)
                .with_bpm(bpm)
                .with_duration(180 + (i as u32 % 120))
        })
        .collect()
}

fn create_contexts(count: usize) -> Vec<DriveContext> {
    (0..count)
        .map(|i| {
            let weather = Weather::ALL[i % Weather::ALL.len()];
            #[allow(clippy::cast_precision_loss)]
            let (speed, hour) = ((i % 150) as f64, (i % 24) as f64 + 0.5);
            DriveContext::new(speed, hour, weather)
        })
        .collect()
}

/// Benchmark mode classification
fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    let context = DriveContext::new(95.0, 23.0, Weather::Storm);

    group.bench_function("classify_single", |b| {
        b.iter(|| mode::classify(black_box(&context)))
    });

    let contexts = create_contexts(1000);
    group.bench_function("classify_1000", |b| {
        b.iter(|| {
            black_box(&contexts)
                .iter()
                .map(mode::classify)
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

/// Benchmark playlist generation across catalog sizes
fn benchmark_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let stormy_night = DriveContext::new(60.0, 22.0, Weather::Storm);

    for size in [10, 100, 1000, 10_000] {
        let catalog = create_test_catalog(size);

        group.bench_with_input(BenchmarkId::new("weather_policy", size), &catalog, |b, catalog| {
            let generator = PlaylistGenerator::new(catalog);
            b.iter(|| generator.generate(black_box(&stormy_night)))
        });

        group.bench_with_input(BenchmarkId::new("neutral_policy", size), &catalog, |b, catalog| {
            let generator = PlaylistGenerator::new(catalog).with_policy(WeatherPolicy::neutral());
            b.iter(|| generator.generate(black_box(&stormy_night)))
        });
    }

    group.finish();
}

/// Benchmark parallel evaluation of many contexts
fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let catalog = create_test_catalog(1000);
    let generator = PlaylistGenerator::new(&catalog);

    for count in [10, 100, 1000] {
        let contexts = create_contexts(count);
        group.bench_with_input(BenchmarkId::new("generate_batch", count), &contexts, |b, contexts| {
            b.iter(|| generator.generate_batch(black_box(contexts)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_classification, benchmark_generation, benchmark_batch);
criterion_main!(benches);
