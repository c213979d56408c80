//! Benchmark – lookups and in-place writes on `jsonfrag::Document`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonfrag::{Document, DocumentOptions, NewValue};

/// Builds a document with `members` root keys `k0..kN`, each holding a small
/// nested object, so that the last key sits at the far end of the buffer.
fn make_document(members: usize) -> Document {
    let mut doc = Document::new(DocumentOptions {
        capacity: members * 48 + 64,
        initialize_empty_object: true,
        ..Default::default()
    });
    for i in 0..members {
        let key = format!("k{i}");
        doc.upsert(&key, NewValue::Raw(r#"{"v":[1,{"w":2}],"s":"x"}"#), "")
            .expect("capacity covers every member");
    }
    doc
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    for members in [8usize, 64, 512] {
        let doc = make_document(members);
        // Inserts go to the front, so k0 is the last member.
        group.bench_with_input(BenchmarkId::new("last_member", members), &doc, |b, doc| {
            b.iter(|| black_box(doc.locate(black_box("k0"))));
        });
        group.bench_with_input(BenchmarkId::new("nested", members), &doc, |b, doc| {
            b.iter(|| black_box(doc.resolve(black_box("s"), "k0")));
        });
    }
    group.finish();
}

fn bench_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("upsert");
    for members in [8usize, 64, 512] {
        group.bench_function(BenchmarkId::new("grow_and_shrink_front", members), |b| {
            let mut doc = make_document(members);
            let first = format!("k{}", members - 1);
            b.iter(|| {
                doc.upsert(&first, NewValue::String("a-longer-value"), "")
                    .unwrap();
                doc.upsert(&first, NewValue::Integer("1"), "").unwrap();
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let c = Criterion::default();
    if is_ci::cached() {
        c.warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10)
    } else {
        c.warm_up_time(Duration::from_secs(2))
            .measurement_time(Duration::from_secs(5))
    }
}

criterion_group! { name = benches; config = criterion(); targets = bench_locate, bench_upsert }
criterion_main!(benches);
