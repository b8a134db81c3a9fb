// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use snipmark::color::ColorAssigner;
use snipmark::render::overlay_lines;
use snipmark::view::SnippetView;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `query.sweep`, `query.hover`, `query.overlay`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn view_for(case: fixtures::Case) -> SnippetView {
    let fixture = fixtures::fixture(case);
    SnippetView::new(fixture.start_line, fixture.code, &fixture.locations)
}

fn benches_query(c: &mut Criterion) {
    let cases = [
        fixtures::Case::Small,
        fixtures::Case::MediumNested,
        fixtures::Case::LargeFlat,
    ];

    // Every fixture carries one scope spanning the whole snippet, which would defeat a prefix
    // maximum of `end`. `large_flat` is the case to watch for lookups turning linear.
    let mut group = c.benchmark_group("query.sweep");
    for case in cases {
        let view = view_for(case);
        let len = view.table().len();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for position in (0..len).step_by(3) {
                    hits += view.annotations_at(black_box(position)).len();
                }
                black_box(hits)
            })
        });
    }
    group.finish();

    // Pointer moving line by line through the snippet, like a mouse drag over the text.
    let mut group = c.benchmark_group("query.hover");
    for case in cases {
        let mut view = view_for(case);
        let lines: Vec<(u32, u32)> = (view.start_line()..=view.end_line())
            .flat_map(|line| [(line, 5), (line, 18), (line, 23)])
            .collect();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let mut changed = 0usize;
                for &(line, col) in &lines {
                    let position = view.to_offset(line, col);
                    changed += view.on_pointer_move(black_box(position)).changed().count();
                }
                changed += view.on_pointer_leave().left.len();
                black_box(changed)
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("query.overlay");
    for case in cases {
        let view = view_for(case);
        let mut colors = ColorAssigner::new();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let lines = overlay_lines(black_box(&view), &mut colors);
                black_box(lines.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_query
}
criterion_main!(benches);
