/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Simulates a camera with a finger on the lens and estimates the heart rate
//! live, like an app would do it. Runs until Ctrl+C is pressed.
//!
//! Usage: `cargo run --example live-simulation -- [basic|smoothed|robust] [bpm]`

use heartbeat_detector::{Estimator, PresetKind};
use log::LevelFilter;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const FRAMES_PER_SECOND: u32 = 30;
const ESTIMATION_INTERVAL: Duration = Duration::from_secs(1);

fn main() {
    init_logger();

    let mut args = std::env::args().skip(1);
    let kind = args
        .next()
        .map(|name| name.parse::<PresetKind>().expect("should be a valid preset name"))
        .unwrap_or_default();
    let simulated_bpm = args
        .next()
        .map(|bpm| bpm.parse::<f64>().expect("should be a number"))
        .unwrap_or(72.0);

    let running = Arc::new(AtomicBool::new(true));
    let running_cpy = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("Stopping simulation");
        running_cpy.store(false, Ordering::SeqCst);
    })
    .unwrap();

    let mut estimator = Estimator::new(kind.preset()).unwrap();
    log::info!(
        "Simulating a pulse of {simulated_bpm} BPM at {FRAMES_PER_SECOND} fps with the {kind} preset"
    );

    let frame_time = Duration::from_secs(1) / FRAMES_PER_SECOND;
    let mut rng = rand::rng();
    let begin = Instant::now();
    let mut last_estimation = Instant::now();

    while running.load(Ordering::SeqCst) {
        let t = begin.elapsed().as_secs_f64();
        // Average intensity of the red channel of a frame: large DC offset,
        // small pulse wave, some sensor noise, and slow drift from the
        // flashlight heating up.
        let intensity = 128.0
            + 2.0 * t.min(10.0)
            + 15.0 * (2.0 * std::f64::consts::PI * simulated_bpm / 60.0 * t).sin()
            + rng.random_range(-1.0..1.0);
        estimator.process_sample(intensity);

        if last_estimation.elapsed() >= ESTIMATION_INTERVAL {
            last_estimation = Instant::now();
            match estimator.try_estimate() {
                Some(result) => println!(
                    "{:>3} BPM (confidence: {:.2})",
                    result.bpm, result.confidence
                ),
                None => println!(
                    "--- BPM ({}, {} samples)",
                    estimator.state(),
                    estimator.len()
                ),
            }
        }

        std::thread::sleep(frame_time);
    }
}

fn init_logger() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .with_colors(true)
        .with_utc_timestamps()
        .init()
        .unwrap();
}
