// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `scrollstory_snap`: the snap-target function and policy
//! rebuilds from the registry.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use scrollstory_pin::{PinRegistry, PinnedRegion};
use scrollstory_progress::ScrollSpan;
use scrollstory_snap::{NormalizedRange, SnapConfig, SnapPolicy};

fn evenly_spaced(n: u32) -> Vec<NormalizedRange> {
    let slot = 1.0 / f64::from(n);
    (0..n)
        .map(|i| {
            let start = f64::from(i) * slot + slot * 0.25;
            NormalizedRange::from_fractions(start, start + slot * 0.5).unwrap()
        })
        .collect()
}

fn bench_snap_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_to");
    for n in [1_u32, 5, 32] {
        let policy = SnapPolicy::build(evenly_spaced(n), &SnapConfig::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &policy, |b, policy| {
            let mut v = 0.0;
            b.iter(|| {
                v = (v + 0.0071) % 1.0;
                black_box(policy.snap_to(black_box(v)))
            });
        });
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut registry = PinRegistry::new();
    for i in 0..5 {
        let id = registry.reserve();
        let start = f64::from(i) * 2000.0;
        registry.set(
            id,
            PinnedRegion::new(ScrollSpan::new(start, start + 1170.0).unwrap()),
        );
    }
    let config = SnapConfig::default();
    c.bench_function("snap_policy_from_registry", |b| {
        b.iter(|| black_box(SnapPolicy::from_registry(&registry, black_box(13450.0), &config)));
    });
}

criterion_group!(benches, bench_snap_to, bench_rebuild);
criterion_main!(benches);
