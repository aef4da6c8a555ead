use super::{for_each_table, CATALOG_NAME};
use crate::catalog::capabilities::Table;
use crate::catalog::Catalog;
use crate::constructs::components::DataInstance;
use crate::constructs::constraints::{ForeignKeyDefinition, IndexDefinition};
use crate::constructs::rows::Row;
use crate::errors::{Error, Result};
use crate::row;
use crate::session::Context;

/// Indexes that MySQL shows as constraints, i.e. the primary and the unique ones.
fn constraint_indexes(ctx: &Context, table: &dyn Table) -> Result<Vec<IndexDefinition>> {
    Ok(match table.as_index_addressable() {
        Some(addressable) => addressable
            .indexes(ctx)?
            .into_iter()
            .filter(|index| index.is_primary() || index.unique)
            .collect(),
        None => Vec::new(),
    })
}

fn foreign_keys(ctx: &Context, table: &dyn Table) -> Result<Vec<ForeignKeyDefinition>> {
    match table.as_foreign_key_table() {
        Some(foreign_key_table) => foreign_key_table.foreign_keys(ctx),
        None => Ok(Vec::new()),
    }
}

fn parent_database<'a>(foreign_key: &'a ForeignKeyDefinition, database: &'a str) -> &'a str {
    if foreign_key.parent_database.is_empty() {
        database
    } else {
        &foreign_key.parent_database
    }
}

pub fn read_table_constraints(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        let database = database.name();
        if let Some(check_table) = table.as_check_table() {
            for check in check_table.checks(ctx)? {
                rows.push(row![
                    CATALOG_NAME,
                    database,
                    check.name,
                    database,
                    table.name(),
                    "CHECK",
                    if check.enforced { "YES" } else { "NO" },
                ]);
            }
        }
        for index in constraint_indexes(ctx, table.as_ref())? {
            let constraint_type = if index.is_primary() {
                "PRIMARY KEY"
            } else {
                "UNIQUE"
            };
            rows.push(row![
                CATALOG_NAME,
                database,
                index.id,
                database,
                table.name(),
                constraint_type,
                "YES",
            ]);
        }
        for foreign_key in foreign_keys(ctx, table.as_ref())? {
            rows.push(row![
                CATALOG_NAME,
                database,
                foreign_key.name,
                database,
                table.name(),
                "FOREIGN KEY",
                "YES",
            ]);
        }
        Ok(())
    })?;
    Ok(rows)
}

pub fn read_key_column_usage(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        let database = database.name();
        for index in constraint_indexes(ctx, table.as_ref())? {
            for (position, column) in index.columns.iter().enumerate() {
                rows.push(row![
                    CATALOG_NAME,
                    database,
                    index.id.as_str(),
                    CATALOG_NAME,
                    database,
                    table.name(),
                    column.as_str(),
                    position + 1,
                    DataInstance::Null,
                    DataInstance::Null,
                    DataInstance::Null,
                    DataInstance::Null,
                ]);
            }
        }
        for foreign_key in foreign_keys(ctx, table.as_ref())? {
            let referenced_schema = parent_database(&foreign_key, database);
            for (position, (column, parent_column)) in foreign_key
                .columns
                .iter()
                .zip(&foreign_key.parent_columns)
                .enumerate()
            {
                rows.push(row![
                    CATALOG_NAME,
                    database,
                    foreign_key.name.as_str(),
                    CATALOG_NAME,
                    database,
                    table.name(),
                    column.as_str(),
                    position + 1,
                    position + 1,
                    referenced_schema,
                    foreign_key.parent_table.as_str(),
                    parent_column.as_str(),
                ]);
            }
        }
        Ok(())
    })?;
    Ok(rows)
}

pub fn read_check_constraints(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        if let Some(check_table) = table.as_check_table() {
            for check in check_table.checks(ctx)? {
                rows.push(row![CATALOG_NAME, database.name(), check.name, check.expression]);
            }
        }
        Ok(())
    })?;
    Ok(rows)
}

/// The parent index whose columns are exactly the foreign key's parent columns.
fn referenced_index(
    ctx: &Context,
    catalog: &Catalog,
    database: &str,
    foreign_key: &ForeignKeyDefinition,
) -> Result<Option<String>> {
    let parent = match catalog.table(ctx, database, &foreign_key.parent_table) {
        Ok(parent) => parent,
        Err(Error::TableNotFound { .. } | Error::DatabaseNotFound(_)) => return Ok(None),
        Err(error) => return Err(error),
    };
    let indexes = match parent.as_index_addressable() {
        Some(addressable) => addressable.indexes(ctx)?,
        None => return Ok(None),
    };
    Ok(indexes
        .into_iter()
        .find(|index| {
            index.columns.len() == foreign_key.parent_columns.len()
                && foreign_key.parent_columns.iter().all(|parent_column| {
                    index
                        .columns
                        .iter()
                        .any(|column| column.eq_ignore_ascii_case(parent_column))
                })
        })
        .map(|index| index.id))
}

pub fn read_referential_constraints(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        let database = database.name();
        for foreign_key in foreign_keys(ctx, table.as_ref())? {
            let referenced_schema = parent_database(&foreign_key, database);
            let unique_constraint_name =
                referenced_index(ctx, catalog, referenced_schema, &foreign_key)?;
            rows.push(row![
                CATALOG_NAME,
                database,
                foreign_key.name.as_str(),
                CATALOG_NAME,
                referenced_schema,
                unique_constraint_name,
                "NONE",
                foreign_key.on_update.to_string(),
                foreign_key.on_delete.to_string(),
                table.name(),
                foreign_key.parent_table.as_str(),
            ]);
        }
        Ok(())
    })?;
    Ok(rows)
}
