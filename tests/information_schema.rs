use pretty_assertions::assert_eq;
use std::sync::Arc;

use infoschema::catalog::capabilities::Partition;
use infoschema::catalog::definitions::ViewDefinition;
use infoschema::catalog::Catalog;
use infoschema::config::Config;
use infoschema::constructs::components::DataInstance;
use infoschema::errors::{Error, Result};
use infoschema::executor::{Executor, Query, QueryResult};
use infoschema::information_schema::INFORMATION_SCHEMA_NAME;
use infoschema::session::Context;
use infoschema::stats::Bucket;

struct Harness {
    executor: Executor,
    ctx: Context,
}

impl Harness {
    fn new() -> Self {
        let mut executor = Executor::new(&Config::default(), Catalog::new());
        executor.bootstrap().unwrap();
        let ctx = executor.prepare_channel().context(None);
        Harness { executor, ctx }
    }

    fn try_run(&self, sql: &str) -> Result<QueryResult> {
        self.executor.execute(&Query::parse(sql)?, &self.ctx)
    }

    fn run(&self, sql: &str) -> QueryResult {
        self.try_run(sql).unwrap()
    }

    fn run_all(&self, statements: &[&str]) {
        for sql in statements {
            self.run(sql);
        }
    }

    fn catalog(&self) -> &Catalog {
        self.executor.catalog()
    }
}

fn strings(values: &[&str]) -> Vec<DataInstance> {
    values.iter().map(|value| DataInstance::from(*value)).collect()
}

fn owned(values: Vec<&DataInstance>) -> Vec<DataInstance> {
    values.into_iter().cloned().collect()
}

#[test]
fn columns_follow_schema_order() {
    let harness = Harness::new();
    harness.run("CREATE TABLE t (c INT, b TEXT, a DATETIME, d DOUBLE)");
    let result =
        harness.run("SELECT * FROM information_schema.columns WHERE table_schema = 'mydb' AND table_name = 't'");
    assert_eq!(owned(result.column("COLUMN_NAME")), strings(&["c", "b", "a", "d"]));
    assert_eq!(
        owned(result.column("ORDINAL_POSITION")),
        (1u64..=4).map(DataInstance::from).collect::<Vec<_>>()
    );
}

#[test]
fn column_keys_follow_mysql_rules() {
    let harness = Harness::new();
    harness.run_all(&[
        "CREATE TABLE declared (id INT PRIMARY KEY, other INT UNIQUE)",
        "CREATE TABLE promoted (a INT NOT NULL UNIQUE, b INT)",
        "CREATE TABLE nullable (a INT UNIQUE, b INT)",
        "CREATE TABLE composite (a INT, b INT, UNIQUE KEY a_b (a, b))",
    ]);
    let keys = |table: &str| {
        let result = harness
            .run(&format!(
                "SELECT * FROM information_schema.columns WHERE table_name = '{}'",
                table
            ));
        owned(result.column("COLUMN_KEY"))
    };
    assert_eq!(keys("declared"), strings(&["PRI", "UNI"]));
    assert_eq!(keys("promoted"), strings(&["PRI", ""]));
    assert_eq!(keys("nullable"), strings(&["UNI", ""]));
    assert_eq!(keys("composite"), strings(&["UNI", "MUL"]));
}

#[test]
fn foreign_keys_show_up_in_constraint_views() {
    let harness = Harness::new();
    harness.run_all(&[
        "CREATE TABLE parent (a INT, b INT, c INT, PRIMARY KEY (a), UNIQUE KEY b_a (b, a))",
        "CREATE TABLE child (x INT, y INT, z INT, \
         CONSTRAINT fk_pair FOREIGN KEY (x, y) REFERENCES parent (a, b), \
         CONSTRAINT fk_loose FOREIGN KEY (z) REFERENCES parent (c))",
    ]);
    let usage = harness.run(
        "SELECT * FROM information_schema.key_column_usage WHERE constraint_name = 'fk_pair'",
    );
    assert_eq!(
        owned(usage.column("ORDINAL_POSITION")),
        vec![DataInstance::from(1u64), DataInstance::from(2u64)]
    );
    assert_eq!(
        owned(usage.column("POSITION_IN_UNIQUE_CONSTRAINT")),
        vec![DataInstance::from(1u64), DataInstance::from(2u64)]
    );

    let referential = harness.run("SELECT * FROM information_schema.referential_constraints");
    assert_eq!(
        owned(referential.column("CONSTRAINT_NAME")),
        strings(&["fk_pair", "fk_loose"])
    );
    assert_eq!(
        owned(referential.column("UNIQUE_CONSTRAINT_NAME")),
        vec![DataInstance::from("b_a"), DataInstance::Null]
    );
}

#[test]
fn trigger_action_order_restarts_per_bucket() {
    let harness = Harness::new();
    harness.run_all(&[
        "CREATE TABLE t (a INT)",
        "CREATE TRIGGER au1 AFTER UPDATE ON t FOR EACH ROW SET @x = 1",
        "CREATE TRIGGER bi BEFORE INSERT ON t FOR EACH ROW SET @x = 2",
        "CREATE TRIGGER au2 AFTER UPDATE ON t FOR EACH ROW SET @x = 3",
    ]);
    let result = harness.run("SELECT * FROM information_schema.triggers");
    let orders: Vec<(DataInstance, DataInstance)> = result
        .column("TRIGGER_NAME")
        .into_iter()
        .cloned()
        .zip(result.column("ACTION_ORDER").into_iter().cloned())
        .collect();
    assert_eq!(
        orders,
        vec![
            (DataInstance::from("bi"), DataInstance::from(1u64)),
            (DataInstance::from("au1"), DataInstance::from(1u64)),
            (DataInstance::from("au2"), DataInstance::from(2u64)),
        ]
    );
}

#[test]
fn analyzing_an_empty_table_yields_zeroed_histograms() {
    let harness = Harness::new();
    harness.run("CREATE TABLE t (a INT, b TEXT)");
    harness.run("ANALYZE TABLE t");
    for column in ["a", "b"] {
        let histogram = harness.catalog().hist("mydb", "t", column).unwrap();
        assert_eq!(histogram.count, 0);
        assert_eq!(histogram.null_count, 0);
        assert_eq!(histogram.distinct_count, 0);
        assert_eq!(histogram.min, 0.0);
        assert_eq!(histogram.max, 0.0);
        assert_eq!(histogram.buckets, Vec::<Bucket>::new());
    }
}

#[test]
fn analyze_builds_single_value_buckets() {
    let harness = Harness::new();
    harness.run("CREATE TABLE t (c INT)");
    harness.run("INSERT INTO t VALUES (1), (1), (3), (NULL)");
    harness.run("ANALYZE TABLE t");
    let histogram = harness.catalog().hist("mydb", "t", "c").unwrap();
    assert_eq!(histogram.count, 3);
    assert_eq!(histogram.null_count, 1);
    assert_eq!(histogram.distinct_count, 2);
    assert_eq!(histogram.mean, (1.0 + 1.0 + 3.0) / 3.0);
    assert_eq!(
        histogram.buckets,
        vec![
            Bucket {
                lower_bound: 1.0,
                upper_bound: 1.0,
                frequency: 2.0 / 3.0
            },
            Bucket {
                lower_bound: 3.0,
                upper_bound: 3.0,
                frequency: 1.0 / 3.0
            },
        ]
    );
    let column_statistics = harness.run("SELECT * FROM information_schema.column_statistics");
    assert_eq!(owned(column_statistics.column("COLUMN_NAME")), strings(&["c"]));
}

#[test]
fn statistics_edits_replace_analyzed_counts() {
    let harness = Harness::new();
    harness.run("CREATE TABLE t (id INT PRIMARY KEY)");
    harness.run("INSERT INTO t VALUES (1), (2), (3)");
    harness.run("ANALYZE TABLE t");
    assert_eq!(
        harness.catalog().row_count(&harness.ctx, "mydb", "t").unwrap(),
        Some(3)
    );

    harness.run("UPDATE information_schema.statistics SET cardinality = 1000 WHERE table_name = 't'");
    assert_eq!(
        harness.catalog().row_count(&harness.ctx, "mydb", "t").unwrap(),
        Some(1000)
    );
    assert!(matches!(
        harness.catalog().hist("mydb", "t", "id"),
        Err(Error::HistogramNotFound { .. })
    ));
}

#[test]
fn views_are_listed_once_across_sources() {
    let harness = Harness::new();
    harness.run("CREATE TABLE t (a INT)");
    harness.run("CREATE VIEW v AS SELECT * FROM t WHERE a = 1");
    harness
        .ctx
        .views
        .register(
            "mydb",
            ViewDefinition::parse("CREATE VIEW v AS SELECT * FROM t").unwrap(),
            false,
        )
        .unwrap();
    let result = harness.run("SELECT * FROM information_schema.views WHERE table_schema = 'mydb'");
    assert_eq!(owned(result.column("TABLE_NAME")), strings(&["v"]));
    assert_eq!(
        owned(result.column("VIEW_DEFINITION")),
        strings(&["SELECT * FROM t WHERE a = 1"])
    );
}

#[test]
fn system_views_are_found_case_insensitively() {
    let harness = Harness::new();
    harness.run("CREATE TABLE t (a INT)");
    let result = harness.run("SELECT * FROM INFORMATION_SCHEMA.Tables WHERE TABLE_NAME = 'T'");
    assert_eq!(owned(result.column("TABLE_SCHEMA")), strings(&["mydb"]));
}

#[test]
fn system_views_have_a_single_guarded_partition() {
    let harness = Harness::new();
    let ctx = Context::default();
    let tables = harness
        .catalog()
        .table(&ctx, INFORMATION_SCHEMA_NAME, "tables")
        .unwrap();
    let partitions = tables.partitions(&ctx).unwrap();
    assert_eq!(partitions, vec![Partition("information_schema.TABLES".to_string())]);
    assert_eq!(
        tables.partition_rows(&ctx, &Partition("information_schema.VIEWS".to_string())),
        Err(Error::PartitionNotFound("information_schema.VIEWS".to_string()))
    );

    let plugins = harness
        .catalog()
        .table(&ctx, INFORMATION_SCHEMA_NAME, "plugins")
        .unwrap();
    let partition = &plugins.partitions(&ctx).unwrap()[0];
    assert!(plugins.partition_rows(&ctx, partition).unwrap().is_empty());
}

#[test]
fn columns_view_is_rebuilt_per_lookup() {
    let harness = Harness::new();
    let ctx = Context::default();
    let lookup = |name: &str| {
        harness
            .catalog()
            .table(&ctx, INFORMATION_SCHEMA_NAME, name)
            .unwrap()
    };
    assert!(!Arc::ptr_eq(&lookup("columns"), &lookup("COLUMNS")));
    assert!(Arc::ptr_eq(&lookup("tables"), &lookup("TABLES")));
}
