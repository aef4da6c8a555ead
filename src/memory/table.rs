use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::catalog::capabilities::{
    CheckTable, ForeignKeyTable, IndexAddressable, InsertableTable, Partition, StatisticsTable,
    Table as TableTrait,
};
use crate::constructs::components::{DataDefinition, DataInstance, Schema, TableDefinition};
use crate::constructs::constraints::{CheckDefinition, ForeignKeyDefinition, IndexDefinition};
use crate::constructs::rows::Row;
use crate::constructs::statements::{CreateTableStatement, InsertStatement};
use crate::errors::{Error, Result};
use crate::session::Context;
use crate::sql::ValidationError;

const AUTO_INCREMENT_EXTRA: &str = "auto_increment";

/// Table held entirely in memory, rows spread round-robin over a fixed number of partitions.
#[derive(Debug)]
pub struct Table {
    definition: TableDefinition,
    indexes: Vec<IndexDefinition>,
    foreign_keys: Vec<ForeignKeyDefinition>,
    checks: Vec<CheckDefinition>,
    partitions: Vec<RwLock<Vec<Row>>>,
    next_partition: AtomicUsize,
    next_auto_increment: AtomicU64,
}

impl Table {
    pub fn new(statement: CreateTableStatement, partition_count: usize) -> Self {
        Table {
            definition: statement.table,
            indexes: statement.indexes,
            foreign_keys: statement.foreign_keys,
            checks: statement.checks,
            partitions: (0..partition_count.max(1))
                .map(|_| RwLock::new(Vec::new()))
                .collect(),
            next_partition: AtomicUsize::new(0),
            next_auto_increment: AtomicU64::new(1),
        }
    }

    /// Append a row as is, without defaults or validation.
    pub fn push_row(&self, row: Row) {
        let index = self.next_partition.fetch_add(1, Ordering::Relaxed) % self.partitions.len();
        self.partitions[index].write().push(row);
    }

    pub fn row_count(&self) -> u64 {
        self.partitions
            .iter()
            .map(|partition| partition.read().len() as u64)
            .sum()
    }

    fn partition_key(&self, index: usize) -> String {
        format!("{}:{}", self.definition.name, index)
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.definition
            .columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Hand out the next counter value. The last representable value is never generated.
    fn generate_auto_increment(&self, column: &str) -> Result<u64> {
        self.next_auto_increment
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| next.checked_add(1))
            .map_err(|_| {
                ValidationError(format!(
                    "Auto-increment values of column `{}` are exhausted",
                    column
                ))
                .into()
            })
    }

    /// Lay out one VALUES tuple in schema order, filling in defaults.
    fn build_row(&self, column_names: &[String], values: &[DataInstance]) -> Result<Row> {
        let columns = &self.definition.columns;
        let expected_count = if column_names.is_empty() {
            columns.len()
        } else {
            column_names.len()
        };
        if values.len() != expected_count {
            return Err(ValidationError(format!(
                "Column count doesn't match value count: expected {}, got {}",
                expected_count,
                values.len()
            ))
            .into());
        }
        let mut provided: Vec<Option<&DataInstance>> = vec![None; columns.len()];
        if column_names.is_empty() {
            for (slot, value) in provided.iter_mut().zip(values) {
                *slot = Some(value);
            }
        } else {
            for (name, value) in column_names.iter().zip(values) {
                let position = self
                    .column_position(name)
                    .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
                provided[position] = Some(value);
            }
        }
        let mut row = Vec::with_capacity(columns.len());
        for (column, value) in columns.iter().zip(provided) {
            let is_auto_increment = column.extra.eq_ignore_ascii_case(AUTO_INCREMENT_EXTRA);
            let value = match value {
                Some(DataInstance::Null) | None if is_auto_increment => {
                    DataInstance::from(self.generate_auto_increment(&column.name)?)
                }
                Some(value) => {
                    if is_auto_increment {
                        if let Some(explicit) = value.as_u64() {
                            // Pinned at u64::MAX once the top value is taken
                            self.next_auto_increment
                                .fetch_max(explicit.saturating_add(1), Ordering::SeqCst);
                        }
                    }
                    value.clone()
                }
                None => match &column.default {
                    Some(DataDefinition::Const(value)) => value.clone(),
                    Some(DataDefinition::FunctionCall(function)) => {
                        DataInstance::Direct(function.call())
                    }
                    None => DataInstance::Null,
                },
            };
            if value.is_null() && !column.data_type.is_nullable {
                return Err(
                    ValidationError(format!("Column `{}` cannot be NULL", column.name)).into(),
                );
            }
            row.push(value);
        }
        Ok(Row(row))
    }
}

impl TableTrait for Table {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn schema(&self) -> Schema {
        self.definition.columns.clone()
    }

    fn partitions(&self, _ctx: &Context) -> Result<Vec<Partition>> {
        Ok((0..self.partitions.len())
            .map(|index| Partition(self.partition_key(index)))
            .collect())
    }

    fn partition_rows(&self, _ctx: &Context, partition: &Partition) -> Result<Vec<Row>> {
        (0..self.partitions.len())
            .find(|index| self.partition_key(*index) == partition.key())
            .map(|index| self.partitions[index].read().clone())
            .ok_or_else(|| Error::PartitionNotFound(partition.key().to_string()))
    }

    fn as_index_addressable(&self) -> Option<&dyn IndexAddressable> {
        Some(self)
    }

    fn as_check_table(&self) -> Option<&dyn CheckTable> {
        Some(self)
    }

    fn as_foreign_key_table(&self) -> Option<&dyn ForeignKeyTable> {
        Some(self)
    }

    fn as_statistics_table(&self) -> Option<&dyn StatisticsTable> {
        Some(self)
    }

    fn as_insertable(&self) -> Option<&dyn InsertableTable> {
        Some(self)
    }
}

impl IndexAddressable for Table {
    fn indexes(&self, _ctx: &Context) -> Result<Vec<IndexDefinition>> {
        Ok(self.indexes.clone())
    }
}

impl CheckTable for Table {
    fn checks(&self, _ctx: &Context) -> Result<Vec<CheckDefinition>> {
        Ok(self.checks.clone())
    }
}

impl ForeignKeyTable for Table {
    fn foreign_keys(&self, _ctx: &Context) -> Result<Vec<ForeignKeyDefinition>> {
        Ok(self.foreign_keys.clone())
    }
}

impl StatisticsTable for Table {
    fn row_count(&self, _ctx: &Context) -> Result<u64> {
        Ok(Table::row_count(self))
    }

    fn cardinality(&self, _ctx: &Context, column: &str) -> Result<Option<u64>> {
        let position = match self.column_position(column) {
            Some(position) => position,
            None => return Ok(None),
        };
        let mut distinct = HashSet::new();
        for partition in &self.partitions {
            for row in partition.read().iter() {
                let value = row.get(position);
                if !value.is_null() {
                    distinct.insert(value.to_string());
                }
            }
        }
        Ok(Some(distinct.len() as u64))
    }
}

impl InsertableTable for Table {
    fn insert(&self, _ctx: &Context, statement: &InsertStatement) -> Result<u64> {
        // Build every row first so a bad tuple inserts nothing
        let rows = statement
            .rows
            .iter()
            .map(|values| self.build_row(&statement.column_names, values))
            .collect::<Result<Vec<Row>>>()?;
        let inserted_count = rows.len() as u64;
        for row in rows {
            self.push_row(row);
        }
        Ok(inserted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{parse_statement, Statement};
    use crate::row;
    use pretty_assertions::assert_eq;

    fn table(sql: &str, partition_count: usize) -> Table {
        match parse_statement(sql).unwrap() {
            Statement::CreateTable(statement) => Table::new(statement, partition_count),
            other => panic!("Unexpected statement: {:?}", other),
        }
    }

    fn insert(table: &Table, sql: &str) -> Result<u64> {
        match parse_statement(sql).unwrap() {
            Statement::Insert(statement) => table.insert(&Context::default(), &statement),
            other => panic!("Unexpected statement: {:?}", other),
        }
    }

    fn all_rows(table: &Table) -> Vec<Row> {
        let ctx = Context::default();
        table
            .partitions(&ctx)
            .unwrap()
            .iter()
            .flat_map(|partition| table.partition_rows(&ctx, partition).unwrap())
            .collect()
    }

    #[test]
    fn rows_are_spread_round_robin() {
        let table = table("CREATE TABLE t (a INT)", 3);
        for value in 0u64..7 {
            table.push_row(row![value]);
        }
        let ctx = Context::default();
        let sizes: Vec<usize> = table
            .partitions(&ctx)
            .unwrap()
            .iter()
            .map(|partition| table.partition_rows(&ctx, partition).unwrap().len())
            .collect();
        assert_eq!(sizes, vec![3, 2, 2]);
        assert_eq!(
            table.partition_rows(&ctx, &Partition("u:0".to_string())),
            Err(Error::PartitionNotFound("u:0".to_string()))
        );
    }

    #[test]
    fn insert_fills_defaults_and_auto_increment() {
        let table = table(
            "CREATE TABLE t (id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY, name VARCHAR(10) DEFAULT 'anon', note TEXT)",
            1,
        );
        assert_eq!(insert(&table, "INSERT INTO t (note) VALUES ('x'), ('y')").unwrap(), 2);
        assert_eq!(insert(&table, "INSERT INTO t VALUES (10, 'z', NULL)").unwrap(), 1);
        assert_eq!(insert(&table, "INSERT INTO t (name) VALUES ('w')").unwrap(), 1);
        assert_eq!(
            all_rows(&table),
            vec![
                row![1u64, "anon", "x"],
                row![2u64, "anon", "y"],
                row![10u64, "z", DataInstance::Null],
                row![11u64, "w", DataInstance::Null],
            ]
        );
    }

    #[test]
    fn explicit_max_auto_increment_is_accepted() {
        let table = table("CREATE TABLE t (id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY, note TEXT)", 1);
        assert_eq!(
            insert(&table, "INSERT INTO t VALUES (18446744073709551615, 'top')").unwrap(),
            1
        );
        assert_eq!(
            insert(&table, "INSERT INTO t (note) VALUES ('next')"),
            Err(Error::Validation(ValidationError(
                "Auto-increment values of column `id` are exhausted".to_string()
            )))
        );
        assert_eq!(all_rows(&table), vec![row![u64::MAX, "top"]]);
    }

    #[test]
    fn insert_rejects_null_in_not_null_column() {
        let table = table("CREATE TABLE t (a INT NOT NULL, b INT)", 1);
        assert_eq!(
            insert(&table, "INSERT INTO t (b) VALUES (1)"),
            Err(Error::Validation(ValidationError(
                "Column `a` cannot be NULL".to_string()
            )))
        );
        assert_eq!(
            insert(&table, "INSERT INTO t (c) VALUES (1)"),
            Err(Error::ColumnNotFound("c".to_string()))
        );
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn cardinality_counts_distinct_non_null_values() {
        let table = table("CREATE TABLE t (a INT, b INT)", 2);
        for (a, b) in [(1u64, Some(1u64)), (1, None), (2, Some(1)), (3, None)] {
            table.push_row(row![a, b]);
        }
        let ctx = Context::default();
        assert_eq!(table.cardinality(&ctx, "A").unwrap(), Some(3));
        assert_eq!(table.cardinality(&ctx, "b").unwrap(), Some(1));
        assert_eq!(table.cardinality(&ctx, "c").unwrap(), None);
    }
}
