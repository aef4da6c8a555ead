use std::fmt;
use std::sync::{Arc, Weak};

use super::INFORMATION_SCHEMA_NAME;
use crate::catalog::capabilities::{Partition, Table, UpdatableTable};
use crate::catalog::Catalog;
use crate::constructs::components::Schema;
use crate::constructs::rows::Row;
use crate::errors::{Error, Result};
use crate::session::Context;

/// Produces the rows of a system view from the catalog.
pub type RowReader = fn(&Context, &Catalog) -> Result<Vec<Row>>;

/// Applies a row edit against a system view.
pub type RowUpdater = fn(&Context, &Catalog, &Row, &Row) -> Result<()>;

/// A system view: fixed schema, one partition, rows computed on every read.
#[derive(Clone)]
pub struct InformationSchemaTable {
    name: &'static str,
    schema: Schema,
    reader: Option<RowReader>,
    updater: Option<RowUpdater>,
    catalog: Option<Weak<Catalog>>,
}

pub fn partition_key(table_name: &str) -> String {
    format!("{}.{}", INFORMATION_SCHEMA_NAME, table_name)
}

impl InformationSchemaTable {
    /// A view that is acknowledged but always empty.
    pub fn new(name: &'static str, schema: Schema) -> Self {
        InformationSchemaTable {
            name,
            schema,
            reader: None,
            updater: None,
            catalog: None,
        }
    }

    pub fn with_reader(mut self, reader: RowReader) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_updater(mut self, updater: RowUpdater) -> Self {
        self.updater = Some(updater);
        self
    }

    pub fn attach(mut self, catalog: Weak<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn name_static(&self) -> &'static str {
        self.name
    }

    fn catalog(&self) -> Result<Arc<Catalog>> {
        self.catalog
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or_else(|| Error::CatalogNotAttached(self.name.to_string()))
    }
}

impl fmt::Debug for InformationSchemaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InformationSchemaTable")
            .field("name", &self.name)
            .field("columns", &self.schema.len())
            .field("populated", &self.reader.is_some())
            .field("attached", &self.catalog.is_some())
            .finish()
    }
}

impl Table for InformationSchemaTable {
    fn name(&self) -> &str {
        self.name
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn partitions(&self, _ctx: &Context) -> Result<Vec<Partition>> {
        Ok(vec![Partition(partition_key(self.name))])
    }

    fn partition_rows(&self, ctx: &Context, partition: &Partition) -> Result<Vec<Row>> {
        if partition.key() != partition_key(self.name) {
            return Err(Error::PartitionNotFound(partition.key().to_string()));
        }
        match self.reader {
            None => Ok(Vec::new()),
            Some(reader) => reader(ctx, &*self.catalog()?),
        }
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableTable> {
        match self.updater {
            Some(_) => Some(self),
            None => None,
        }
    }
}

impl UpdatableTable for InformationSchemaTable {
    fn update_row(&self, ctx: &Context, old: &Row, new: &Row) -> Result<()> {
        match self.updater {
            Some(updater) => updater(ctx, &*self.catalog()?, old, new),
            None => Err(Error::NotUpdatable(partition_key(self.name))),
        }
    }
}
