//! Negotiation and docking throughput over a deep split tree.

use std::hint::black_box;

use casement_layout::{
    resolve_drop, DragPayload, LayoutConfig, LayoutPart, PartId, PartKind, Point, Rect,
    Relationship, SashContainer, SizeFlags,
};
use criterion::{criterion_group, criterion_main, Criterion};

#[derive(Debug)]
struct BenchPane {
    key: String,
    visible: bool,
    bounds: Rect,
    min: i32,
}

impl LayoutPart for BenchPane {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> PartKind {
        PartKind::Pane
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn size_flags(&self, _horizontal: bool) -> SizeFlags {
        SizeFlags::HAS_MIN
    }

    fn compute_preferred_size(
        &self,
        _horizontal: bool,
        available_parallel: i32,
        _available_perpendicular: i32,
        preferred_parallel: i32,
    ) -> i32 {
        if preferred_parallel == 0 {
            return available_parallel.min(self.min);
        }
        preferred_parallel.max(self.min).min(available_parallel)
    }
}

fn pane(index: u32) -> Box<BenchPane> {
    Box::new(BenchPane {
        key: format!("pane-{index}"),
        visible: true,
        bounds: Rect::default(),
        min: 4,
    })
}

/// Alternating horizontal/vertical splits, `count` panes deep.
fn deep_container(count: u32) -> (SashContainer, Vec<PartId>) {
    let mut container = SashContainer::new(LayoutConfig::default());
    container.set_active(true);
    let mut ids = Vec::with_capacity(count as usize);
    let mut relative = None;
    for index in 0..count {
        let relationship = if index % 2 == 0 {
            Relationship::Right
        } else {
            Relationship::Bottom
        };
        let id = container.add(pane(index), relationship, 0.4, relative);
        relative = Some(id);
        ids.push(id);
    }
    container.set_bounds(Rect::new(0, 0, 1920, 1080));
    (container, ids)
}

fn bench_apply_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_bounds");
    for count in [16_u32, 64] {
        group.bench_function(format!("{count}-pane-resize"), |bencher| {
            let (mut container, _) = deep_container(count);
            let mut toggle = false;
            bencher.iter(|| {
                toggle = !toggle;
                let width = if toggle { 1920 } else { 1918 };
                container.set_bounds(black_box(Rect::new(0, 0, width, 1080)));
            });
        });
    }
    group.finish();
}

fn bench_resolve_drop(c: &mut Criterion) {
    let (container, ids) = deep_container(64);
    let payload = DragPayload::Part { id: ids[0] };
    c.bench_function("resolve_drop/64-pane", |bencher| {
        let mut x = 0;
        bencher.iter(|| {
            x = (x + 97) % 1900;
            black_box(resolve_drop(
                &container,
                black_box(&payload),
                Point::new(x, 540),
            ))
        });
    });
}

criterion_group!(benches, bench_apply_bounds, bench_resolve_drop);
criterion_main!(benches);
