use time::macros::datetime;
use time::OffsetDateTime;

use super::charsets::{DEFAULT_CHARACTER_SET, DEFAULT_COLLATION};
use super::{for_each_table, views, CATALOG_NAME, INFORMATION_SCHEMA_NAME};
use crate::catalog::capabilities::unwrap_database;
use crate::catalog::Catalog;
use crate::constructs::components::DataInstance;
use crate::constructs::rows::Row;
use crate::errors::Result;
use crate::row;
use crate::session::Context;

/// Creation and update time reported for every table, there being no real one to show.
const Y2K: OffsetDateTime = datetime!(2000-01-01 0:00 UTC);

/// Protocol version, always 10.
const TABLE_VERSION: u64 = 10;

pub fn read_tables(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        let (table_type, engine, row_format) = if database.name() == INFORMATION_SCHEMA_NAME {
            ("SYSTEM VIEW", "MEMORY", "Fixed")
        } else {
            ("BASE TABLE", "InnoDB", "Dynamic")
        };
        let table_rows = catalog.row_count(ctx, database.name(), table.name())?;
        rows.push(row![
            CATALOG_NAME,
            database.name(),
            table.name(),
            table_type,
            engine,
            TABLE_VERSION,
            row_format,
            table_rows,
            0u64,
            0u64,
            0u64,
            0u64,
            0u64,
            DataInstance::Null,
            Y2K,
            Y2K,
            DataInstance::Null,
            DEFAULT_COLLATION,
            DataInstance::Null,
            DataInstance::Null,
            "",
        ]);
        Ok(())
    })?;
    for database in catalog.all_databases(ctx) {
        for view in views::merged_views(ctx, unwrap_database(database.clone()).as_ref())? {
            if !ctx.privileges.can_see_table(database.name(), &view.name) {
                continue;
            }
            rows.push(row![
                CATALOG_NAME,
                database.name(),
                view.name,
                "VIEW",
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                Y2K,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                "VIEW",
            ]);
        }
    }
    Ok(rows)
}

pub fn read_schemata(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    Ok(catalog
        .all_databases(ctx)
        .iter()
        .map(|database| {
            row![
                CATALOG_NAME,
                database.name(),
                DEFAULT_CHARACTER_SET,
                DEFAULT_COLLATION,
                DataInstance::Null,
                "NO",
            ]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{catalog_with, project, read_view};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tables_and_views_are_listed_with_their_type() {
        let catalog = catalog_with(&[
            "CREATE TABLE t (a INT)",
            "INSERT INTO t VALUES (1), (2)",
            "CREATE VIEW v AS SELECT * FROM t",
        ]);
        assert_eq!(
            project(&catalog, "TABLES", "TABLE_SCHEMA", &["TABLE_NAME", "TABLE_TYPE", "TABLE_ROWS"]),
            vec![
                row!["t", "BASE TABLE", 2u64],
                row!["v", "VIEW", DataInstance::Null],
            ]
        );
    }

    #[test]
    fn table_rows_follow_statistics_edits() {
        let catalog = catalog_with(&["CREATE TABLE t (a INT)"]);
        catalog
            .set_row_count(&Context::default(), "mydb", "t", 1234)
            .unwrap();
        assert_eq!(
            project(&catalog, "TABLES", "TABLE_SCHEMA", &["TABLE_ROWS"]),
            vec![row![1234u64]]
        );
    }

    #[test]
    fn system_views_are_listed_too() {
        let catalog = catalog_with(&[]);
        let rows = read_view(&catalog, &Context::default(), "TABLES");
        let plugins = rows
            .iter()
            .find(|row| row.get(2).as_str() == Some("PLUGINS"))
            .unwrap();
        assert_eq!(plugins.get(1), &DataInstance::from(INFORMATION_SCHEMA_NAME));
        assert_eq!(plugins.get(3), &DataInstance::from("SYSTEM VIEW"));
        assert_eq!(plugins.get(4), &DataInstance::from("MEMORY"));
    }

    #[test]
    fn schemata_lists_visible_databases() {
        let catalog = catalog_with(&[]);
        let names: Vec<DataInstance> = read_view(&catalog, &Context::default(), "SCHEMATA")
            .iter()
            .map(|row| row.get(1).clone())
            .collect();
        assert_eq!(
            names,
            vec![
                DataInstance::from(INFORMATION_SCHEMA_NAME),
                DataInstance::from("mydb")
            ]
        );
    }
}
