use std::collections::HashMap;

use super::charsets::{DEFAULT_CHARACTER_SET, DEFAULT_COLLATION};
use super::{for_each_table, CATALOG_NAME};
use crate::catalog::capabilities::Table;
use crate::catalog::Catalog;
use crate::constructs::components::{ColumnDefinition, DataDefinition, DataInstance};
use crate::constructs::rows::Row;
use crate::errors::Result;
use crate::row;
use crate::session::Context;

const PRIMARY: &str = "PRI";
const UNIQUE: &str = "UNI";
const MULTIPLE: &str = "MUL";

/// Rank of a key class, so a stronger class from one index is not erased by a weaker one.
fn strength(class: &str) -> u8 {
    match class {
        PRIMARY => 3,
        UNIQUE => 2,
        MULTIPLE => 1,
        _ => 0,
    }
}

/// `COLUMN_KEY` of every column of the table, in schema order.
pub fn column_keys(ctx: &Context, table: &dyn Table) -> Result<Vec<&'static str>> {
    let schema = table.schema();
    // Keyed by lowercase column name
    let mut index_classes: HashMap<String, &'static str> = HashMap::new();
    let mut has_primary_key = schema.iter().any(|column| column.primary_key);
    if let Some(addressable) = table.as_index_addressable() {
        for index in addressable.indexes(ctx)? {
            let classes: Vec<&'static str> = if index.is_primary() {
                has_primary_key = true;
                vec![PRIMARY; index.columns.len()]
            } else if index.unique && index.columns.len() > 1 {
                // Only the leading column of a composite unique index is unique on its own
                std::iter::once(UNIQUE)
                    .chain(std::iter::repeat(MULTIPLE))
                    .take(index.columns.len())
                    .collect()
            } else if index.unique {
                vec![UNIQUE]
            } else {
                vec![MULTIPLE; index.columns.len()]
            };
            for (column, class) in index.columns.iter().zip(classes) {
                let slot = index_classes.entry(column.to_lowercase()).or_insert(class);
                if strength(class) > strength(*slot) {
                    *slot = class;
                }
            }
        }
    }
    let mut keys = Vec::with_capacity(schema.len());
    for column in &schema {
        let key = if column.primary_key {
            PRIMARY
        } else {
            match index_classes.get(&column.name.to_lowercase()) {
                Some(&UNIQUE) if !column.data_type.is_nullable && !has_primary_key => {
                    has_primary_key = true;
                    PRIMARY
                }
                Some(class) => *class,
                None => "",
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

fn column_default(column: &ColumnDefinition) -> DataInstance {
    match &column.default {
        Some(DataDefinition::Const(DataInstance::Null)) | None => DataInstance::Null,
        Some(DataDefinition::Const(value)) => DataInstance::from(value.to_string()),
        Some(DataDefinition::FunctionCall(function)) => DataInstance::from(function.expression()),
    }
}

fn extra(column: &ColumnDefinition) -> String {
    match &column.default {
        Some(default) if column.extra.is_empty() && !default.is_literal() => {
            "DEFAULT_GENERATED".to_string()
        }
        _ => column.extra.clone(),
    }
}

pub fn read_columns(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for_each_table(ctx, catalog, |database, table| {
        let keys = column_keys(ctx, table.as_ref())?;
        for ((position, column), key) in table.schema().iter().enumerate().zip(keys) {
            let raw_type = column.data_type.raw_type;
            let (character_set, collation) = if raw_type.is_text() {
                (Some(DEFAULT_CHARACTER_SET), Some(DEFAULT_COLLATION))
            } else {
                (None, None)
            };
            rows.push(row![
                CATALOG_NAME,
                database.name(),
                table.name(),
                column.name.as_str(),
                position + 1,
                column_default(column),
                if column.data_type.is_nullable { "YES" } else { "NO" },
                raw_type.data_type(),
                raw_type.character_maximum_length(),
                raw_type.character_octet_length(),
                raw_type.numeric_precision(),
                raw_type.numeric_scale(),
                raw_type.datetime_precision(),
                character_set,
                collation,
                raw_type.column_type(),
                key,
                extra(column),
                "select",
                column.comment.as_str(),
                "",
                DataInstance::Null,
            ]);
        }
        Ok(())
    })?;
    Ok(rows)
}
