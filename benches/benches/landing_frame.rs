// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for a full landing-page frame: scroll dispatch to every pinned
//! section and reveal, then one scrub step.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use scrollstory_landing::{LandingConfig, build_stage};

fn bench_frame(c: &mut Criterion) {
    let config = LandingConfig::default();
    let mut stage = build_stage(&config).unwrap();
    stage.mount(0.0);
    let max_scroll = stage.host().max_scroll();

    let mut now = 0.0;
    let mut y = 0.0;
    c.bench_function("landing_scroll_frame", |b| {
        b.iter(|| {
            now += 1.0 / 60.0;
            y = (y + 37.0) % max_scroll;
            stage.scroll(black_box(y));
            black_box(stage.frame(now))
        });
    });
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
