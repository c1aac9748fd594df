//! Performance benchmarks for StatementProcessor
//!
//! Run with: cargo bench --bench transform_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recut_engine::{
    ColumnMapping, ExecutionMode, Granularity, SourceTable, StatementProcessor, TransformConfig,
};
use std::hint::black_box;

/// Generate a dialogue table with `groups` chats of `turns` turns each
fn generate_table(groups: usize, turns: usize) -> SourceTable {
    let mut rows = Vec::with_capacity(groups * turns);
    for g in 0..groups {
        for t in 1..=turns {
            rows.push(vec![
                Some(format!("chat-{g}")),
                Some(t.to_string()),
                Some(if t % 2 == 0 { "agent" } else { "customer" }.to_string()),
                Some(format!(
                    "This is turn {t}. It has a couple of sentences! Does it? #topic{} #bench",
                    t % 5
                )),
            ]);
        }
    }
    SourceTable::from_strings(
        ["id", "turn", "speaker", "text"].map(String::from),
        rows,
    )
    .unwrap()
}

fn columns() -> ColumnMapping {
    ColumnMapping::new("id", "text")
        .with_turn("turn")
        .with_speaker("speaker")
}

/// Benchmark table sizes in sentence mode
fn bench_table_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_sizes");
    let processor = StatementProcessor::builder()
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap();

    for groups in [10, 100, 1_000] {
        let table = generate_table(groups, 20);
        group.throughput(Throughput::Elements(table.len() as u64));
        group.bench_with_input(BenchmarkId::new("sentence", groups), &table, |b, table| {
            b.iter(|| processor.process(black_box(table), &columns()).unwrap());
        });
    }

    group.finish();
}

/// Compare sequential and parallel execution
fn bench_execution_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("execution_modes");
    let table = generate_table(2_000, 10);

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let processor = StatementProcessor::builder()
            .execution_mode(mode)
            .build()
            .unwrap();
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| processor.process(black_box(&table), &columns()).unwrap());
        });
    }

    group.finish();
}

/// Turn-level output skips sentence splitting
fn bench_turn_granularity(c: &mut Criterion) {
    let table = generate_table(500, 20);
    let config = TransformConfig::builder()
        .granularity(Granularity::Turn)
        .whole()
        .build()
        .unwrap();
    let processor = StatementProcessor::with_config(config).unwrap();

    c.bench_function("turn_whole_context", |b| {
        b.iter(|| processor.process(black_box(&table), &columns()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_table_sizes,
    bench_execution_modes,
    bench_turn_granularity
);
criterion_main!(benches);
