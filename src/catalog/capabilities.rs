//! What a storage table or database can do. Only `Table` and `Database` are mandatory,
//! everything else is advertised through the `as_*` probes and may be missing.
//! Metadata readers treat a missing capability as "no rows from here", never as an error.

use std::sync::Arc;

use super::definitions::{StoredProcedureDetails, TriggerDefinition, ViewDefinition};
use crate::constructs::components::Schema;
use crate::constructs::constraints::{CheckDefinition, ForeignKeyDefinition, IndexDefinition};
use crate::constructs::rows::Row;
use crate::constructs::statements::{CreateTableStatement, InsertStatement};
use crate::errors::Result;
use crate::session::Context;

/// Opaque handle to one slice of a table's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition(pub String);

impl Partition {
    pub fn key(&self) -> &str {
        &self.0
    }
}

pub trait Table: Send + Sync {
    fn name(&self) -> &str;

    fn schema(&self) -> Schema;

    fn partitions(&self, ctx: &Context) -> Result<Vec<Partition>>;

    fn partition_rows(&self, ctx: &Context, partition: &Partition) -> Result<Vec<Row>>;

    fn as_index_addressable(&self) -> Option<&dyn IndexAddressable> {
        None
    }

    fn as_check_table(&self) -> Option<&dyn CheckTable> {
        None
    }

    fn as_foreign_key_table(&self) -> Option<&dyn ForeignKeyTable> {
        None
    }

    fn as_statistics_table(&self) -> Option<&dyn StatisticsTable> {
        None
    }

    fn as_insertable(&self) -> Option<&dyn InsertableTable> {
        None
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableTable> {
        None
    }
}

pub trait IndexAddressable {
    /// All indexes, the primary one (if any) included.
    fn indexes(&self, ctx: &Context) -> Result<Vec<IndexDefinition>>;
}

pub trait CheckTable {
    fn checks(&self, ctx: &Context) -> Result<Vec<CheckDefinition>>;
}

pub trait ForeignKeyTable {
    /// Foreign keys declared on this table, i.e. where it is the child.
    fn foreign_keys(&self, ctx: &Context) -> Result<Vec<ForeignKeyDefinition>>;
}

/// Native statistics the storage engine keeps on its own.
pub trait StatisticsTable {
    fn row_count(&self, ctx: &Context) -> Result<u64>;

    /// Estimated number of distinct values in the column, if known.
    fn cardinality(&self, ctx: &Context, column: &str) -> Result<Option<u64>>;
}

pub trait InsertableTable {
    /// Returns the number of rows inserted.
    fn insert(&self, ctx: &Context, statement: &InsertStatement) -> Result<u64>;
}

pub trait UpdatableTable {
    /// Replace `old` with `new`. Both rows follow the table's schema.
    fn update_row(&self, ctx: &Context, old: &Row, new: &Row) -> Result<()>;
}

pub trait Database: Send + Sync {
    fn name(&self) -> &str;

    fn table_names(&self, ctx: &Context) -> Result<Vec<String>>;

    /// Case-insensitive table lookup.
    fn table_insensitive(&self, ctx: &Context, name: &str) -> Result<Option<Arc<dyn Table>>>;

    fn as_trigger_database(&self) -> Option<&dyn TriggerDatabase> {
        None
    }

    fn as_view_database(&self) -> Option<&dyn ViewDatabase> {
        None
    }

    fn as_stored_procedure_database(&self) -> Option<&dyn StoredProcedureDatabase> {
        None
    }

    fn as_table_creator(&self) -> Option<&dyn TableCreator> {
        None
    }

    /// The database this one decorates, if it is a decorator.
    fn wrapped(&self) -> Option<Arc<dyn Database>> {
        None
    }
}

pub trait TriggerDatabase {
    /// Triggers in creation order.
    fn triggers(&self, ctx: &Context) -> Result<Vec<TriggerDefinition>>;

    fn create_trigger(&self, ctx: &Context, definition: TriggerDefinition) -> Result<()>;

    fn drop_trigger(&self, ctx: &Context, name: &str) -> Result<()>;
}

pub trait ViewDatabase {
    fn views(&self, ctx: &Context) -> Result<Vec<ViewDefinition>>;

    fn create_view(&self, ctx: &Context, definition: ViewDefinition, or_replace: bool)
        -> Result<()>;

    fn drop_view(&self, ctx: &Context, name: &str) -> Result<()>;
}

pub trait StoredProcedureDatabase {
    fn procedures(&self, ctx: &Context) -> Result<Vec<StoredProcedureDetails>>;

    fn create_procedure(&self, ctx: &Context, details: StoredProcedureDetails) -> Result<()>;

    fn drop_procedure(&self, ctx: &Context, name: &str) -> Result<()>;
}

pub trait TableCreator {
    fn create_table(&self, ctx: &Context, statement: &CreateTableStatement) -> Result<()>;
}

/// Strip every decorator (e.g. privilege filtering) off a database.
pub fn unwrap_database(database: Arc<dyn Database>) -> Arc<dyn Database> {
    let mut database = database;
    while let Some(inner) = database.wrapped() {
        database = inner;
    }
    database
}
