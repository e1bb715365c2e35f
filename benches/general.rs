//! Benchmarks the individual pipeline stages. Useful to run this on a host
//! platform to see the rough costs of each stage.
//!
//! To run these, run `$ cargo bench "stage"`

use criterion::{criterion_group, criterion_main, Criterion};
use heartbeat_detector::analysis::confidence;
use heartbeat_detector::analysis::interval_estimator::estimate_bpm;
use heartbeat_detector::analysis::peak_detector::find_peaks;
use heartbeat_detector::preprocessing::{detrend, smooth};
use heartbeat_detector::stats::WindowStats;
use heartbeat_detector::{ConfidenceStyle, ThresholdStat};
use itertools::Itertools;
use std::hint::black_box;
use std::time::Duration;

fn criterion_benchmark(c: &mut Criterion) {
    // 10 s of camera input at 30 fps
    let sample_count = 300;
    let mut noise = vec![0.0; sample_count];
    noise.fill_with(rand::random::<f64>);
    let values = noise
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let t = i as f64 / 30.0;
            128.0 + 15.0 * (2.0 * std::f64::consts::PI * 1.25 * t).sin() + n
        })
        .collect::<Vec<_>>();
    let timestamps = (0..sample_count)
        .map(|i| Duration::from_secs_f64(i as f64 / 30.0))
        .collect::<Vec<_>>();

    c.bench_function(&format!("stage: detrend {sample_count} samples"), |b| {
        b.iter(|| black_box(detrend(black_box(&values))))
    });

    let detrended = detrend(&values);
    for window in [5, 7, 31] {
        c.bench_function(
            &format!("stage: smooth {sample_count} samples (window {window})"),
            |b| b.iter(|| black_box(smooth(black_box(&detrended), window))),
        );
    }

    let signal = smooth(&detrended, 5);
    for stat in [ThresholdStat::Variance, ThresholdStat::MeanAbs] {
        c.bench_function(
            &format!("stage: find peaks in {sample_count} samples ({stat:?})"),
            |b| b.iter(|| black_box(find_peaks(black_box(&signal), stat, 0.3, false))),
        );
    }

    let peaks = find_peaks(&signal, ThresholdStat::MeanAbs, 0.3, false);
    assert!(
        peaks.iter().tuple_windows().all(|(a, b)| a < b),
        "peaks must be ascending"
    );
    c.bench_function(
        &format!("stage: estimate bpm from {} peaks", peaks.len()),
        |b| b.iter(|| black_box(estimate_bpm(black_box(&peaks), &timestamps, Some(0.5)))),
    );

    let stats = WindowStats::from(&values[..]);
    c.bench_function(
        &format!("stage: composite confidence of {sample_count} samples"),
        |b| {
            b.iter(|| {
                black_box(confidence::score(
                    ConfidenceStyle::Composite,
                    black_box(&values),
                    &stats,
                    75.0,
                ))
            })
        },
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
