// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

// Cases run in micro- to low-millisecond time; the slowest is a 10k-record scan.
const DEFAULT_SAMPLE_SIZE: usize = 100;
const DEFAULT_WARMUP_MS: u64 = 500;
const DEFAULT_MEASUREMENT_MS: u64 = 2_000;
const DEFAULT_NOISE_THRESHOLD: f64 = 0.03;

/// Reads `ROSTER_BENCH_<suffix>`; missing or unparsable values fall back to `default`.
fn bench_env<T: std::str::FromStr>(suffix: &str, default: T) -> T {
    std::env::var(format!("ROSTER_BENCH_{suffix}"))
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion tuned for the lookup and debounce benches.
///
/// `ROSTER_BENCH_PROFILE_HZ=0` turns the pprof flamegraph profiler off.
pub fn criterion() -> Criterion {
    let sample_size = bench_env("SAMPLE_SIZE", DEFAULT_SAMPLE_SIZE).clamp(10, 500);
    let warmup_ms = bench_env("WARMUP_MS", DEFAULT_WARMUP_MS).clamp(100, 10_000);
    let measurement_ms = bench_env("MEASUREMENT_MS", DEFAULT_MEASUREMENT_MS).clamp(200, 60_000);
    let profile_hz = bench_env("PROFILE_HZ", 1_000_i32).clamp(0, 10_000);

    let criterion = Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_millis(warmup_ms))
        .measurement_time(Duration::from_millis(measurement_ms))
        .noise_threshold(DEFAULT_NOISE_THRESHOLD);

    if profile_hz == 0 {
        criterion
    } else {
        criterion.with_profiler(PProfProfiler::new(profile_hz, Output::Flamegraph(None)))
    }
}
