use std::fmt::Write as _;
use std::path::PathBuf;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use futures::StreamExt;

use oa_importer::prelude::*;

fn write_fixture(dir: &std::path::Path, rows: usize) -> PathBuf {
    let mut contents = String::from("lon,lat,number,street,city\n");
    for i in 0..rows {
        writeln!(
            contents,
            "-73.{},40.{},{},{} st,Springfield",
            i % 1000,
            i % 90,
            i + 1,
            ["main", "n 5th", "park ave w", "e broadway"][i % 4]
        )
        .unwrap();
    }
    let path = dir.join(format!("fixture_{rows}.csv"));
    std::fs::write(&path, contents).unwrap();
    path
}

/// End-to-end throughput of the full per-file chain plus sequencing
fn bench_import_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let mut group = c.benchmark_group("import_throughput");
    for rows in [1_000usize, 10_000] {
        let path = write_fixture(dir.path(), rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &path, |b, path| {
            b.to_async(&rt).iter(|| async {
                let count = RecordSequencer::new(vec![path.clone()])
                    .filter_map(|item| async { item.ok() })
                    .count()
                    .await;
                black_box(count)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_import_throughput);
criterion_main!(benches);
