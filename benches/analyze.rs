use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::sync::Arc;

use infoschema::catalog::Catalog;
use infoschema::memory;
use infoschema::row;
use infoschema::session::Context;
use infoschema::sql::{parse_statement, Statement};

fn catalog_with_rows(row_count: usize) -> Arc<Catalog> {
    let catalog = Catalog::new();
    let database = memory::Database::new("bench");
    let statement = match parse_statement(
        "CREATE TABLE t (id BIGINT UNSIGNED PRIMARY KEY, score DOUBLE, bucket INT, label TEXT)",
    ) {
        Ok(Statement::CreateTable(statement)) => statement,
        other => panic!("Unexpected statement: {:?}", other),
    };
    database.add_table(statement).unwrap();
    let table = database.memory_table("t").unwrap();
    let mut rng = rand::thread_rng();
    for id in 0..row_count as u64 {
        let bucket: Option<i64> = if rng.gen_bool(0.1) {
            None
        } else {
            Some(rng.gen_range(0..100))
        };
        table.push_row(row![id, rng.gen::<f64>() * 1000.0, bucket, "label"]);
    }
    catalog.add_database(Arc::new(database)).unwrap();
    catalog
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let ctx = Context::default();
    for row_count in [1_000, 10_000, 100_000] {
        let catalog = catalog_with_rows(row_count);
        group.bench_with_input(BenchmarkId::from_parameter(row_count), &catalog, |b, catalog| {
            b.iter(|| catalog.analyze(&ctx, "bench", black_box("t")).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
