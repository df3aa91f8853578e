// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use palaver::format::cfg::{export_dialogue, export_quests, parse_dialogue, parse_quests};
use palaver::query::validate::{validate, ValidateOptions};

mod fixtures;

use fixtures::Case;

const CASES: [Case; 3] = [Case::Small, Case::Medium, Case::LargeLongText];

// Benchmark identity (keep stable):
// - Group names: `format.parse_dialogue`, `format.export_dialogue`, `format.parse_quests`,
//   `query.validate`
// - Case IDs come from `Case::id` and must not be renamed.
fn benches_parse(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("format.parse_dialogue");
        for case in CASES {
            let graph = fixtures::dialogue(case);
            let cfg = export_dialogue(&graph).expect("export_dialogue");
            group.throughput(Throughput::Bytes(cfg.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let parsed = parse_dialogue(black_box(&cfg));
                    black_box(fixtures::checksum_dialogue(black_box(&parsed.value)))
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("format.export_dialogue");
        for case in CASES {
            let graph = fixtures::dialogue(case);
            group.throughput(Throughput::Elements(graph.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let cfg = export_dialogue(black_box(&graph)).expect("export_dialogue");
                    black_box(cfg.len())
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("format.parse_quests");
        for case in CASES {
            let book = fixtures::quests(case);
            let cfg = export_quests(&book).expect("export_quests");
            group.throughput(Throughput::Elements(book.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let parsed = parse_quests(black_box(&cfg));
                    black_box(fixtures::checksum_quests(black_box(&parsed.value)))
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("query.validate");
        for case in CASES {
            let graph = fixtures::dialogue(case);
            let options = ValidateOptions::default();
            group.throughput(Throughput::Elements(graph.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(validate(black_box(&graph), &options).len()))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_parse);
criterion_main!(benches);
