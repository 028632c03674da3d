// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use patchbay::model::{BoxNode, Patch, PatchLine, PortRef, Rect, VarName};
use patchbay::protocol::PatchSnapshot;

// Benchmark identity (keep stable):
// - Group names in this file: `patch.bounds`, `patch.snapshot`
// - Case IDs (the string after the `/`) must remain stable across refactors
//   so results stay comparable over time (e.g. `small`, `large`).
fn generated_patch(boxes: usize) -> Patch {
    let mut patch = Patch::new();
    let mut varnames = Vec::with_capacity(boxes);
    for index in 0..boxes {
        let varname = VarName::new(format!("box_{index}")).expect("varname");
        let x = (index % 16) as f64 * 120.0;
        let y = (index / 16) as f64 * 60.0;
        patch.insert_box(varname.clone(), BoxNode::new("cycle~", Rect::at(x, y)));
        varnames.push(varname);
    }
    for pair in varnames.windows(2) {
        patch.connect(PatchLine::new(
            PortRef::new(pair[0].clone(), 0),
            PortRef::new(pair[1].clone(), 0),
        ));
    }
    patch
}

fn benches_patch(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("patch.bounds");
        for (case_id, boxes) in [("small", 16), ("large", 1024)] {
            let patch = generated_patch(boxes);
            group.throughput(Throughput::Elements(boxes as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| black_box(black_box(&patch).bounds()))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("patch.snapshot");
        for (case_id, boxes) in [("small", 16), ("large", 1024)] {
            let patch = generated_patch(boxes);
            group.throughput(Throughput::Elements(boxes as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let snapshot = PatchSnapshot::from(black_box(&patch));
                    let encoded = serde_json::to_string(&snapshot).expect("encode");
                    black_box(encoded.len())
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_patch);
criterion_main!(benches);
