// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `scrollstory_timeline` sampling, the per-frame hot path of
//! every pinned section.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;

use scrollstory_landing::page;
use scrollstory_timeline::{Easing, Property, Timeline, Track, Value};

const VIEWPORT: Size = Size::new(1440.0, 900.0);

/// `n` staggered cards entering and exiting.
fn grid(n: u32) -> Timeline<u32> {
    let cards = 0..n;
    Timeline::builder()
        .entrance(
            Track::new(cards.clone())
                .tween(Property::Y, Value::Vh(60.0), 0.0)
                .tween(Property::Opacity, 0.0, 1.0)
                .tween(Property::Scale, 0.98, 1.0)
                .duration(0.5)
                .stagger(0.5 / f64::from(n.max(1))),
        )
        .exit(
            Track::new(cards)
                .tween(Property::Y, 0.0, Value::Vh(-18.0))
                .tween(Property::Opacity, 1.0, 0.0)
                .easing(Easing::PowerIn(2)),
        )
        .build()
        .unwrap()
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_sample");
    for n in [4_u32, 16, 64] {
        let timeline = grid(n);
        group.bench_with_input(BenchmarkId::new("grid", n), &timeline, |b, timeline| {
            let mut p = 0.0;
            b.iter(|| {
                p = (p + 0.013) % 1.0;
                let mut sum = 0.0;
                timeline.sample(black_box(p), VIEWPORT, |_, v| sum += v.opacity);
                black_box(sum)
            });
        });
    }
    let how = page::how_it_works().unwrap();
    group.bench_function("how_it_works", |b| {
        let mut p = 0.0;
        b.iter(|| {
            p = (p + 0.013) % 1.0;
            let mut sum = 0.0;
            how.sample(black_box(p), VIEWPORT, |_, v| sum += v.offset.x);
            black_box(sum)
        });
    });
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("timeline_build_landing", |b| {
        b.iter(|| {
            black_box(page::hero().unwrap());
            black_box(page::hero_intro().unwrap());
            black_box(page::how_it_works().unwrap());
            black_box(page::instruments().unwrap());
            black_box(page::for_teachers().unwrap());
            black_box(page::testimonials().unwrap());
        });
    });
}

criterion_group!(benches, bench_sample, bench_build);
criterion_main!(benches);
