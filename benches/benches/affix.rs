// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Size};
use understory_affix::{
    Affix, AffixNodes, AffixProps, ContainerRect, HeadlessViewport, Measurements, OffsetMode,
    evaluate,
};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("affix/evaluate");

    let base = Measurements {
        scroll_top: 0.0,
        element_offset: Point::new(0.0, 1_000.0),
        element_height: 48.0,
        wrapper_size: Size::new(320.0, 48.0),
        container_height: 768.0,
        container_rect: ContainerRect::default(),
        viewport_height: 768.0,
        container_is_window: true,
    };

    for (name, mode) in [
        ("top", OffsetMode::resolve(Some(16.0), None, None)),
        ("bottom", OffsetMode::resolve(None, Some(16.0), None)),
        ("both", OffsetMode::resolve(Some(16.0), Some(16.0), None)),
    ] {
        let steps = 4_096u32;
        group.throughput(Throughput::Elements(u64::from(steps)));
        group.bench_function(BenchmarkId::new("sweep", name), |b| {
            b.iter(|| {
                let mut m = base;
                for step in 0..steps {
                    m.scroll_top = f64::from(step) * 0.5;
                    black_box(evaluate(mode, black_box(&m)));
                }
            });
        });
    }

    group.finish();
}

/// One window-level host with `count` affixes stacked down a long page.
fn page_with_affixes(count: u32) -> (HeadlessViewport, Vec<Affix<HeadlessViewport>>) {
    let mut host = HeadlessViewport::new(1280.0, 800.0);
    let mut affixes = Vec::new();
    for i in 0..count {
        let top = 200.0 + f64::from(i) * 120.0;
        let wrapper = host.add_node(None, Rect::new(0.0, top, 320.0, top + 40.0));
        let fixed = host.add_node(None, Rect::new(0.0, top, 320.0, top + 40.0));
        let mut affix = Affix::new(AffixProps::new().offset_top(8.0));
        affix
            .mount(&mut host, AffixNodes { wrapper, fixed })
            .expect("window target always resolves");
        affixes.push(affix);
    }
    (host, affixes)
}

fn bench_update_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("affix/update_position");

    for count in [1u32, 16, 256] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("scroll_tick", count), &count, |b, &count| {
            b.iter_batched(
                || page_with_affixes(count),
                |(mut host, mut affixes)| {
                    for y in [0.0, 150.0, 600.0, 2_000.0, 300.0] {
                        host.scroll_window_to(y);
                        for affix in &mut affixes {
                            black_box(affix.update_position(&host));
                        }
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_update_position);
criterion_main!(benches);
