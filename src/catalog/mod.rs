pub mod capabilities;
pub mod definitions;
pub mod privileges;

use parking_lot::RwLock;
use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::information_schema::{InformationSchemaDatabase, INFORMATION_SCHEMA_NAME};
use crate::session::Context;
use crate::stats::{Histogram, StatsStore, TableStatistics};
use capabilities::{Database, Table};
use privileges::PrivilegedDatabase;

/// Every database the engine knows about, plus the statistics cache.
pub struct Catalog {
    databases: RwLock<Vec<Arc<dyn Database>>>,
    stats: StatsStore,
}

impl Catalog {
    /// A catalog holding just `information_schema`, already attached to it.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|catalog| {
            let information_schema: Arc<dyn Database> =
                Arc::new(InformationSchemaDatabase::new(catalog.clone()));
            Catalog {
                databases: RwLock::new(vec![information_schema]),
                stats: StatsStore::new(),
            }
        })
    }

    pub fn add_database(&self, database: Arc<dyn Database>) -> Result<()> {
        let mut databases = self.databases.write();
        if databases
            .iter()
            .any(|existing| existing.name().eq_ignore_ascii_case(database.name()))
        {
            return Err(Error::AlreadyExists("database", database.name().to_string()));
        }
        databases.push(database);
        Ok(())
    }

    /// Case-insensitive lookup, bypassing privilege filtering.
    pub fn database(&self, name: &str) -> Result<Arc<dyn Database>> {
        self.databases
            .read()
            .iter()
            .find(|database| database.name().eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| Error::DatabaseNotFound(name.to_string()))
    }

    /// Databases visible to the session, each wrapped so that only visible tables show.
    pub fn all_databases(&self, ctx: &Context) -> Vec<Arc<dyn Database>> {
        self.databases
            .read()
            .iter()
            .filter_map(|database| {
                if database.name() == INFORMATION_SCHEMA_NAME {
                    Some(database.clone())
                } else if ctx.privileges.can_see_database(database.name()) {
                    Some(Arc::new(PrivilegedDatabase::new(
                        database.clone(),
                        ctx.privileges.clone(),
                    )) as Arc<dyn Database>)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn table(&self, ctx: &Context, database: &str, table: &str) -> Result<Arc<dyn Table>> {
        self.database(database)?
            .table_insensitive(ctx, table)?
            .ok_or_else(|| Error::TableNotFound {
                database: database.to_string(),
                table: table.to_string(),
            })
    }

    /// Call `callback` for every table of the database until it returns `false`.
    pub fn db_table_iter(
        &self,
        ctx: &Context,
        database: &dyn Database,
        mut callback: impl FnMut(&Arc<dyn Table>) -> Result<bool>,
    ) -> Result<()> {
        for table_name in database.table_names(ctx)? {
            if let Some(table) = database.table_insensitive(ctx, &table_name)? {
                if !callback(&table)? {
                    break;
                }
            }
        }
        Ok(())
    }

    pub fn analyze(&self, ctx: &Context, database: &str, table: &str) -> Result<Arc<TableStatistics>> {
        let database = self.database(database)?;
        let table = self.table(ctx, database.name(), table)?;
        self.stats.analyze(ctx, database.name(), table.as_ref())
    }

    /// Row count for planning. `None` means neither the cache nor the table knows.
    pub fn row_count(&self, ctx: &Context, database: &str, table: &str) -> Result<Option<u64>> {
        let table = self.table(ctx, database, table)?;
        self.stats.row_count(ctx, database, table.as_ref())
    }

    pub fn hist(&self, database: &str, table: &str, column: &str) -> Result<Histogram> {
        self.stats.hist(database, table, column)
    }

    pub fn table_statistics(&self, database: &str, table: &str) -> Result<Arc<TableStatistics>> {
        self.stats
            .get(database, table)
            .ok_or_else(|| Error::StatisticsNotFound {
                database: database.to_string(),
                table: table.to_string(),
            })
    }

    pub fn all_statistics(&self) -> Vec<Arc<TableStatistics>> {
        self.stats.all()
    }

    /// Overwrite the cached statistics of a table that must still exist.
    pub fn set_row_count(
        &self,
        ctx: &Context,
        database: &str,
        table: &str,
        row_count: u64,
    ) -> Result<Arc<TableStatistics>> {
        let table = self.table(ctx, database, table).map_err(|error| {
            Error::InvalidStatisticsEdit(error.to_string())
        })?;
        Ok(self.stats.set_row_count(database, table.name(), row_count))
    }
}
