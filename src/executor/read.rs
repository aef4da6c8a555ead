use std::sync::Arc;
use tracing::*;

use super::QueryResult;
use crate::catalog::capabilities::Table;
use crate::catalog::Catalog;
use crate::constructs::components::Schema;
use crate::constructs::rows::Row;
use crate::constructs::statements::{AnalyzeTableStatement, ColumnValue, SelectStatement, TableReference};
use crate::errors::{Error, Result};
use crate::information_schema::INFORMATION_SCHEMA_NAME;
use crate::row;
use crate::session::Context;

/// Resolve a possibly unqualified reference against the session, hiding tables the session can't see.
pub fn resolve_table(
    catalog: &Catalog,
    ctx: &Context,
    reference: &TableReference,
) -> Result<(String, Arc<dyn Table>)> {
    let database = match &reference.database {
        Some(database) => database.clone(),
        None => ctx.current_database()?.to_string(),
    };
    let is_system = database.eq_ignore_ascii_case(INFORMATION_SCHEMA_NAME);
    if !is_system && !ctx.privileges.can_see_table(&database, &reference.table) {
        return Err(Error::TableNotFound {
            database,
            table: reference.table.clone(),
        });
    }
    let table = catalog.table(ctx, &database, &reference.table)?;
    Ok((database, table))
}

pub fn column_position(schema: &Schema, name: &str) -> Result<usize> {
    schema
        .iter()
        .position(|column| column.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
}

/// Positions of the filtered columns, each paired with the value it must match.
pub fn resolve_conditions<'a>(
    schema: &Schema,
    conditions: &'a [ColumnValue],
) -> Result<Vec<(usize, &'a ColumnValue)>> {
    conditions
        .iter()
        .map(|condition| Ok((column_position(schema, &condition.column)?, condition)))
        .collect()
}

pub fn row_matches(row: &Row, conditions: &[(usize, &ColumnValue)]) -> bool {
    conditions
        .iter()
        .all(|(position, condition)| row.get(*position).matches(&condition.value))
}

/// Every row of every partition, checking for cancellation between partitions.
pub fn scan(ctx: &Context, table: &dyn Table) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for partition in table.partitions(ctx)? {
        ctx.check_cancelled()?;
        rows.extend(table.partition_rows(ctx, &partition)?);
    }
    Ok(rows)
}

pub fn select(catalog: &Catalog, ctx: &Context, statement: &SelectStatement) -> Result<QueryResult> {
    let (_, table) = resolve_table(catalog, ctx, &statement.table)?;
    let schema = table.schema();
    let conditions = resolve_conditions(&schema, &statement.conditions)?;
    let rows = scan(ctx, table.as_ref())?
        .into_iter()
        .filter(|row| row_matches(row, &conditions))
        .collect();
    Ok(QueryResult {
        column_names: schema.into_iter().map(|column| column.name).collect(),
        rows,
    })
}

/// One MySQL-style status row per table. A failing table doesn't stop the others,
/// only cancellation does.
pub fn analyze(
    catalog: &Catalog,
    ctx: &Context,
    statement: &AnalyzeTableStatement,
) -> Result<QueryResult> {
    let mut rows = Vec::with_capacity(statement.tables.len());
    for reference in &statement.tables {
        let database = match &reference.database {
            Some(database) => database.clone(),
            None => ctx.current_database()?.to_string(),
        };
        let qualified_name = format!("{}.{}", database, reference.table);
        let outcome = resolve_table(catalog, ctx, reference)
            .and_then(|(database, table)| catalog.analyze(ctx, &database, table.name()));
        match outcome {
            Ok(_) => rows.push(row![qualified_name, "analyze", "status", "OK"]),
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(error) => {
                warn!("‼️ Could not analyze table {}: {}", qualified_name, error);
                rows.push(row![qualified_name, "analyze", "Error", error.to_string()]);
            }
        }
    }
    Ok(QueryResult {
        column_names: ["Table", "Op", "Msg_type", "Msg_text"]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{executor, run};
    use super::*;
    use crate::catalog::privileges::{PrivilegeSet, PrivilegeType};
    use crate::constructs::components::DataInstance;
    use pretty_assertions::assert_eq;

    #[test]
    fn select_filters_by_equality() {
        let (executor, ctx) = executor();
        run(&executor, &ctx, "CREATE TABLE t (a INT, b VARCHAR(10))").unwrap();
        run(&executor, &ctx, "INSERT INTO t VALUES (1, 'x'), (2, 'Y'), (3, 'y')").unwrap();
        let result = run(&executor, &ctx, "SELECT * FROM mydb.t WHERE B = 'y'").unwrap();
        assert_eq!(result.column_names, vec!["a", "b"]);
        assert_eq!(
            result.column("a"),
            vec![&DataInstance::from(2u64), &DataInstance::from(3u64)]
        );
        assert_eq!(
            run(&executor, &ctx, "SELECT * FROM t WHERE c = 1"),
            Err(Error::ColumnNotFound("c".to_string()))
        );
    }

    #[test]
    fn system_views_are_selectable_from_any_database() {
        let (executor, ctx) = executor();
        run(&executor, &ctx, "CREATE TABLE t (a INT PRIMARY KEY)").unwrap();
        let result = run(
            &executor,
            &ctx,
            "SELECT * FROM information_schema.columns WHERE table_name = 't'",
        )
        .unwrap();
        assert_eq!(result.column("COLUMN_KEY"), vec![&DataInstance::from("PRI")]);
    }

    #[test]
    fn invisible_tables_look_missing() {
        let (executor, ctx) = executor();
        run(&executor, &ctx, "CREATE TABLE secret (a INT)").unwrap();
        let mut privileges = PrivilegeSet::new();
        privileges.grant_table("mydb", "other", PrivilegeType::Select);
        let guest = ctx.clone().with_user("guest", "%", privileges);
        assert_eq!(
            run(&executor, &guest, "SELECT * FROM secret"),
            Err(Error::TableNotFound {
                database: "mydb".to_string(),
                table: "secret".to_string()
            })
        );
    }

    #[test]
    fn analyze_reports_per_table_status() {
        let (executor, ctx) = executor();
        run(&executor, &ctx, "CREATE TABLE t (a INT)").unwrap();
        run(&executor, &ctx, "INSERT INTO t VALUES (1), (1), (NULL)").unwrap();
        let result = run(&executor, &ctx, "ANALYZE TABLE t, missing").unwrap();
        assert_eq!(
            result.column("Msg_type"),
            vec![&DataInstance::from("status"), &DataInstance::from("Error")]
        );
        assert_eq!(result.rows[0].get(0), &DataInstance::from("mydb.t"));
        let histogram = executor.catalog().hist("mydb", "t", "a").unwrap();
        assert_eq!(histogram.count, 2);
        assert_eq!(histogram.null_count, 1);
    }

    #[test]
    fn cancelled_analyze_fails_the_whole_statement() {
        let (executor, mut ctx) = executor();
        run(&executor, &ctx, "CREATE TABLE t (a INT)").unwrap();
        run(&executor, &ctx, "INSERT INTO t VALUES (1), (2)").unwrap();
        ctx.analyze_progress_interval = 1;
        ctx.cancel();
        assert_eq!(run(&executor, &ctx, "ANALYZE TABLE t"), Err(Error::Cancelled));
        assert!(executor.catalog().table_statistics("mydb", "t").is_err());
    }
}
