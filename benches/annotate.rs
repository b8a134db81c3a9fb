// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use snipmark::annotate::{AnnotationBuilder, AnnotationIndex};
use snipmark::text::LineOffsetTable;
use snipmark::view::SnippetView;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `annotate.table`, `annotate.build`, `annotate.view`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn benches_annotate(c: &mut Criterion) {
    let cases = [
        fixtures::Case::Small,
        fixtures::Case::MediumNested,
        fixtures::Case::LargeFlat,
    ];

    let mut group = c.benchmark_group("annotate.table");
    for case in cases {
        let fixture = fixtures::fixture(case);
        group.throughput(Throughput::Bytes(fixture.code.len() as u64));
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let table = LineOffsetTable::build(black_box(&fixture.code), fixture.start_line);
                black_box(table.line_count())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("annotate.build");
    for case in cases {
        let fixture = fixtures::fixture(case);
        group.throughput(Throughput::Elements(fixture.locations.len() as u64));
        group.bench_function(case.id(), move |b| {
            let table = LineOffsetTable::build(&fixture.code, fixture.start_line);
            b.iter(|| {
                let built = AnnotationBuilder::new(&table).build(black_box(&fixture.locations));
                let index = AnnotationIndex::build(built.annotations, &table);
                black_box(index.len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("annotate.view");
    for case in cases {
        let fixture = fixtures::fixture(case);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let view = SnippetView::new(
                    fixture.start_line,
                    black_box(fixture.code.as_str()),
                    black_box(&fixture.locations),
                );
                black_box(view.annotations().len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_annotate
}
criterion_main!(benches);
