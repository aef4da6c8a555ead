//! Index layout (`STATISTICS`, editable) and cached histograms (`COLUMN_STATISTICS`).
//! The two draw on separate sources: index cardinality comes from the storage engine,
//! histograms from the statistics store. Nothing reconciles them.

use super::{for_each_table, CATALOG_NAME};
use crate::catalog::Catalog;
use crate::constructs::components::DataInstance;
use crate::constructs::constraints::IndexDefinition;
use crate::constructs::rows::Row;
use crate::errors::{Error, Result};
use crate::row;
use crate::session::Context;

const TABLE_SCHEMA_POSITION: usize = 1;
const TABLE_NAME_POSITION: usize = 2;
const CARDINALITY_POSITION: usize = 9;

/// A primary key is unique whatever the index claims.
fn non_unique(index: &IndexDefinition) -> i64 {
    if index.unique || index.is_primary() {
        0
    } else {
        1
    }
}

pub fn read_statistics(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        let addressable = match table.as_index_addressable() {
            Some(addressable) => addressable,
            None => return Ok(()),
        };
        let schema = table.schema();
        for index in addressable.indexes(ctx)? {
            for (position, column) in index.columns.iter().enumerate() {
                let cardinality = match table.as_statistics_table() {
                    Some(statistics_table) => statistics_table.cardinality(ctx, column)?,
                    None => None,
                };
                let is_nullable = schema
                    .iter()
                    .find(|definition| definition.name.eq_ignore_ascii_case(column))
                    .map_or(false, |definition| definition.data_type.is_nullable);
                rows.push(row![
                    CATALOG_NAME,
                    database.name(),
                    table.name(),
                    non_unique(&index),
                    database.name(),
                    index.id.as_str(),
                    position + 1,
                    column.as_str(),
                    "A",
                    cardinality,
                    index.prefix_length(position),
                    DataInstance::Null,
                    if is_nullable { "YES" } else { "" },
                    index.index_type.as_str(),
                    "",
                    index.comment.as_str(),
                    "YES",
                    DataInstance::Null,
                ]);
            }
        }
        Ok(())
    })?;
    Ok(rows)
}

/// `UPDATE information_schema.statistics SET cardinality = n`: overwrite the cached
/// statistics of the table the old row points at with a bare row count.
pub fn update_statistics(ctx: &Context, catalog: &Catalog, old: &Row, new: &Row) -> Result<()> {
    let (database, table) = match (
        old.get(TABLE_SCHEMA_POSITION).as_str(),
        old.get(TABLE_NAME_POSITION).as_str(),
    ) {
        (Some(database), Some(table)) => (database, table),
        _ => {
            return Err(Error::InvalidStatisticsEdit(
                "row does not identify a table".to_string(),
            ))
        }
    };
    let row_count = new.get(CARDINALITY_POSITION).as_u64().ok_or_else(|| {
        Error::InvalidStatisticsEdit(format!(
            "CARDINALITY must be a non-negative integer, got {}",
            new.get(CARDINALITY_POSITION)
        ))
    })?;
    catalog.set_row_count(ctx, database, table, row_count)?;
    Ok(())
}

pub fn read_column_statistics(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for statistics in catalog.all_statistics() {
        if !ctx
            .privileges
            .can_see_table(&statistics.database, &statistics.table)
        {
            continue;
        }
        for (column, histogram) in &statistics.histograms {
            if histogram.count == 0 {
                continue;
            }
            rows.push(row![
                statistics.database.as_str(),
                statistics.table.as_str(),
                column.as_str(),
                serde_json::to_value(histogram)
                    .map_err(|error| Error::Serialization(error.to_string()))?,
            ]);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{catalog_with, project, read_view};
    use super::*;
    use crate::catalog::capabilities::UpdatableTable;
    use pretty_assertions::assert_eq;

    fn catalog() -> std::sync::Arc<Catalog> {
        catalog_with(&[
            "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(100), score INT, KEY name_prefix (name(10), score))",
            "INSERT INTO t VALUES (1, 'a', 10), (2, 'b', 10), (3, 'b', NULL)",
        ])
    }

    #[test]
    fn one_row_per_index_column() {
        assert_eq!(
            project(
                &catalog(),
                "STATISTICS",
                "TABLE_SCHEMA",
                &[
                    "INDEX_NAME",
                    "NON_UNIQUE",
                    "SEQ_IN_INDEX",
                    "COLUMN_NAME",
                    "CARDINALITY",
                    "SUB_PART",
                    "NULLABLE"
                ]
            ),
            vec![
                row!["PRIMARY", 0i64, 1u64, "id", 3u64, DataInstance::Null, ""],
                row!["name_prefix", 1i64, 1u64, "name", 2u64, 10u64, "YES"],
                row!["name_prefix", 1i64, 2u64, "score", 1u64, DataInstance::Null, "YES"],
            ]
        );
    }

    #[test]
    fn primary_index_is_unique_even_if_unflagged() {
        let unflagged_primary = IndexDefinition {
            unique: false,
            ..IndexDefinition::primary(&["id"])
        };
        assert_eq!(non_unique(&unflagged_primary), 0);
        assert_eq!(non_unique(&IndexDefinition::new("name_key", true, &["name"])), 0);
        assert_eq!(non_unique(&IndexDefinition::new("name_prefix", false, &["name"])), 1);
    }

    #[test]
    fn editing_cardinality_overwrites_cached_row_count() {
        let catalog = catalog();
        let ctx = Context::default();
        catalog.analyze(&ctx, "mydb", "t").unwrap();
        assert_eq!(catalog.hist("mydb", "t", "score").unwrap().count, 2);

        let statistics = catalog.table(&ctx, "information_schema", "statistics").unwrap();
        let old = read_view(&catalog, &ctx, "STATISTICS")
            .into_iter()
            .find(|row| row.get(TABLE_SCHEMA_POSITION).as_str() == Some("mydb"))
            .unwrap();
        let mut new = old.clone();
        new.0[CARDINALITY_POSITION] = DataInstance::from(500u64);
        statistics
            .as_updatable()
            .unwrap()
            .update_row(&ctx, &old, &new)
            .unwrap();

        assert_eq!(catalog.row_count(&ctx, "mydb", "t").unwrap(), Some(500));
        assert!(matches!(
            catalog.hist("mydb", "t", "score"),
            Err(Error::HistogramNotFound { .. })
        ));
    }

    #[test]
    fn edits_need_a_resolvable_table_and_an_integer() {
        let catalog = catalog();
        let ctx = Context::default();
        let old = read_view(&catalog, &ctx, "STATISTICS")
            .into_iter()
            .find(|row| row.get(TABLE_SCHEMA_POSITION).as_str() == Some("mydb"))
            .unwrap();

        let mut not_a_number = old.clone();
        not_a_number.0[CARDINALITY_POSITION] = DataInstance::from("lots");
        assert!(matches!(
            update_statistics(&ctx, &catalog, &old, &not_a_number),
            Err(Error::InvalidStatisticsEdit(_))
        ));

        let mut stale = old.clone();
        stale.0[TABLE_NAME_POSITION] = DataInstance::from("gone");
        let mut new = stale.clone();
        new.0[CARDINALITY_POSITION] = DataInstance::from(5u64);
        assert!(matches!(
            update_statistics(&ctx, &catalog, &stale, &new),
            Err(Error::InvalidStatisticsEdit(_))
        ));
        assert!(catalog.table_statistics("mydb", "gone").is_err());
        assert!(catalog.table_statistics("mydb", "t").is_err());
    }

    #[test]
    fn column_statistics_lists_counted_histograms() {
        let catalog = catalog();
        let ctx = Context::default();
        assert_eq!(read_view(&catalog, &ctx, "COLUMN_STATISTICS"), vec![]);
        catalog.analyze(&ctx, "mydb", "t").unwrap();
        let rows = read_view(&catalog, &ctx, "COLUMN_STATISTICS");
        let columns: Vec<&DataInstance> = rows.iter().map(|row| row.get(2)).collect();
        // Text columns are not convertible and so never counted
        assert_eq!(
            columns,
            vec![&DataInstance::from("id"), &DataInstance::from("score")]
        );
        match rows[1].get(3) {
            DataInstance::Direct(crate::constructs::components::DataInstanceRaw::Json(histogram)) => {
                assert_eq!(histogram["count"], 2);
                assert_eq!(histogram["null_count"], 1);
            }
            other => panic!("Unexpected histogram value: {:?}", other),
        }
    }
}
