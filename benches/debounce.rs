// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use smol_str::SmolStr;
use tokio::time::Instant;

use roster::search::{Debouncer, DEFAULT_QUIET_PERIOD};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `search.debounce`
// - Case IDs: `burst_<len>` (typing burst followed by one settle) and `poll_idle`.
fn benches_debounce(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.debounce");

    for text in ["Us", "User 4", "User 1234 with a long tail"] {
        let keystrokes: Vec<SmolStr> =
            fixtures::keystrokes(text).into_iter().map(SmolStr::from).collect();
        group.throughput(Throughput::Elements(keystrokes.len() as u64));
        group.bench_function(format!("burst_{}", keystrokes.len()), |b| {
            b.iter_batched(
                || Debouncer::new(DEFAULT_QUIET_PERIOD),
                |mut debouncer| {
                    let start = Instant::now();
                    let step = Duration::from_millis(40);
                    let mut now = start;
                    for keystroke in &keystrokes {
                        debouncer.push(keystroke.clone(), now);
                        black_box(debouncer.poll(now));
                        now += step;
                    }
                    black_box(debouncer.poll(now + DEFAULT_QUIET_PERIOD))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.throughput(Throughput::Elements(1));
    group.bench_function("poll_idle", |b| {
        let mut debouncer = Debouncer::<SmolStr>::new(DEFAULT_QUIET_PERIOD);
        let now = Instant::now();
        b.iter(|| black_box(debouncer.poll(black_box(now))))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_debounce
}
criterion_main!(benches);
