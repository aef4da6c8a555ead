use parking_lot::RwLock;
use std::sync::Arc;
use tracing::*;

use super::table::Table;
use crate::catalog::capabilities::{
    Database as DatabaseTrait, StoredProcedureDatabase, Table as TableTrait, TableCreator,
    TriggerDatabase, ViewDatabase,
};
use crate::catalog::definitions::{StoredProcedureDetails, TriggerDefinition, ViewDefinition};
use crate::constructs::statements::{CreateTableStatement, TriggerOrder};
use crate::constructs::Validatable;
use crate::errors::{Error, Result};
use crate::session::Context;

pub const DEFAULT_PARTITION_COUNT: usize = 4;

/// Database living entirely in memory. Stored definitions are parsed once, when created.
pub struct Database {
    name: String,
    partition_count: usize,
    tables: RwLock<Vec<Arc<Table>>>,
    triggers: RwLock<Vec<TriggerDefinition>>,
    views: RwLock<Vec<ViewDefinition>>,
    procedures: RwLock<Vec<StoredProcedureDetails>>,
}

impl Database {
    pub fn new(name: &str) -> Self {
        Self::with_partition_count(name, DEFAULT_PARTITION_COUNT)
    }

    pub fn with_partition_count(name: &str, partition_count: usize) -> Self {
        Database {
            name: name.to_string(),
            partition_count,
            tables: RwLock::new(Vec::new()),
            triggers: RwLock::new(Vec::new()),
            views: RwLock::new(Vec::new()),
            procedures: RwLock::new(Vec::new()),
        }
    }

    /// Returns `false` if the table already existed and `IF NOT EXISTS` was given.
    pub fn add_table(&self, statement: CreateTableStatement) -> Result<bool> {
        statement.validate()?;
        let mut tables = self.tables.write();
        if tables
            .iter()
            .any(|table| table.name().eq_ignore_ascii_case(&statement.table.name))
        {
            return if statement.if_not_exists {
                Ok(false)
            } else {
                Err(Error::AlreadyExists("table", statement.table.name))
            };
        }
        debug!("🆕 Creating table {}.{}", self.name, statement.table.name);
        tables.push(Arc::new(Table::new(statement, self.partition_count)));
        Ok(true)
    }

    pub fn memory_table(&self, name: &str) -> Option<Arc<Table>> {
        self.tables
            .read()
            .iter()
            .find(|table| table.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl DatabaseTrait for Database {
    fn name(&self) -> &str {
        &self.name
    }

    fn table_names(&self, _ctx: &Context) -> Result<Vec<String>> {
        Ok(self
            .tables
            .read()
            .iter()
            .map(|table| table.name().to_string())
            .collect())
    }

    fn table_insensitive(&self, _ctx: &Context, name: &str) -> Result<Option<Arc<dyn TableTrait>>> {
        Ok(self
            .memory_table(name)
            .map(|table| table as Arc<dyn TableTrait>))
    }

    fn as_trigger_database(&self) -> Option<&dyn TriggerDatabase> {
        Some(self)
    }

    fn as_view_database(&self) -> Option<&dyn ViewDatabase> {
        Some(self)
    }

    fn as_stored_procedure_database(&self) -> Option<&dyn StoredProcedureDatabase> {
        Some(self)
    }

    fn as_table_creator(&self) -> Option<&dyn TableCreator> {
        Some(self)
    }
}

impl TableCreator for Database {
    fn create_table(&self, _ctx: &Context, statement: &CreateTableStatement) -> Result<()> {
        self.add_table(statement.clone())?;
        Ok(())
    }
}

impl TriggerDatabase for Database {
    fn triggers(&self, _ctx: &Context) -> Result<Vec<TriggerDefinition>> {
        Ok(self.triggers.read().clone())
    }

    fn create_trigger(&self, _ctx: &Context, definition: TriggerDefinition) -> Result<()> {
        let definition = if definition.is_parsed() {
            definition
        } else {
            TriggerDefinition::parse(&definition.create_statement)?
                .with_sql_mode(&definition.sql_mode)
        };
        let statement = definition.statement()?;
        if self.memory_table(&statement.table).is_none() {
            return Err(Error::TableNotFound {
                database: self.name.clone(),
                table: statement.table,
            });
        }
        let mut triggers = self.triggers.write();
        if triggers
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&definition.name))
        {
            return Err(Error::AlreadyExists("trigger", definition.name));
        }
        if let Some(TriggerOrder::Follows(other) | TriggerOrder::Precedes(other)) = &statement.order {
            if !triggers
                .iter()
                .any(|existing| existing.name.eq_ignore_ascii_case(other))
            {
                return Err(Error::NotFound("trigger", other.clone()));
            }
        }
        debug!("🆕 Creating trigger {}.{}", self.name, definition.name);
        triggers.push(definition);
        Ok(())
    }

    fn drop_trigger(&self, _ctx: &Context, name: &str) -> Result<()> {
        let mut triggers = self.triggers.write();
        let count_before = triggers.len();
        triggers.retain(|trigger| !trigger.name.eq_ignore_ascii_case(name));
        if triggers.len() == count_before {
            return Err(Error::NotFound("trigger", name.to_string()));
        }
        Ok(())
    }
}

impl ViewDatabase for Database {
    fn views(&self, _ctx: &Context) -> Result<Vec<ViewDefinition>> {
        Ok(self.views.read().clone())
    }

    fn create_view(&self, _ctx: &Context, definition: ViewDefinition, or_replace: bool) -> Result<()> {
        // Malformed text fails here, not on read
        let definition = ViewDefinition::from_statement(
            definition.statement()?,
            &definition.create_statement,
        );
        let mut views = self.views.write();
        match views
            .iter()
            .position(|existing| existing.name.eq_ignore_ascii_case(&definition.name))
        {
            Some(position) if or_replace => views[position] = definition,
            Some(_) => return Err(Error::AlreadyExists("view", definition.name)),
            None => {
                debug!("🆕 Creating view {}.{}", self.name, definition.name);
                views.push(definition)
            }
        }
        Ok(())
    }

    fn drop_view(&self, _ctx: &Context, name: &str) -> Result<()> {
        let mut views = self.views.write();
        let count_before = views.len();
        views.retain(|view| !view.name.eq_ignore_ascii_case(name));
        if views.len() == count_before {
            return Err(Error::NotFound("view", name.to_string()));
        }
        Ok(())
    }
}

impl StoredProcedureDatabase for Database {
    fn procedures(&self, _ctx: &Context) -> Result<Vec<StoredProcedureDetails>> {
        Ok(self.procedures.read().clone())
    }

    fn create_procedure(&self, _ctx: &Context, details: StoredProcedureDetails) -> Result<()> {
        let details = StoredProcedureDetails::parse(&details.create_statement)?;
        let mut procedures = self.procedures.write();
        if procedures
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&details.name))
        {
            return Err(Error::AlreadyExists("procedure", details.name));
        }
        debug!("🆕 Creating procedure {}.{}", self.name, details.name);
        procedures.push(details);
        Ok(())
    }

    fn drop_procedure(&self, _ctx: &Context, name: &str) -> Result<()> {
        let mut procedures = self.procedures.write();
        let count_before = procedures.len();
        procedures.retain(|procedure| !procedure.name.eq_ignore_ascii_case(name));
        if procedures.len() == count_before {
            return Err(Error::NotFound("procedure", name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{parse_statement, Statement};
    use pretty_assertions::assert_eq;

    fn database_with_table() -> Database {
        let database = Database::new("mydb");
        match parse_statement("CREATE TABLE t (a INT)").unwrap() {
            Statement::CreateTable(statement) => {
                assert!(database.add_table(statement).unwrap())
            }
            other => panic!("Unexpected statement: {:?}", other),
        }
        database
    }

    #[test]
    fn duplicate_table_respects_if_not_exists() {
        let database = database_with_table();
        match parse_statement("CREATE TABLE IF NOT EXISTS T (b INT)").unwrap() {
            Statement::CreateTable(statement) => {
                assert!(!database.add_table(statement.clone()).unwrap());
                assert_eq!(
                    database.add_table(CreateTableStatement {
                        if_not_exists: false,
                        ..statement
                    }),
                    Err(Error::AlreadyExists("table", "T".to_string()))
                );
            }
            other => panic!("Unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn triggers_need_their_table_and_order_target() {
        let database = database_with_table();
        let ctx = Context::default();
        assert_eq!(
            database.create_trigger(
                &ctx,
                TriggerDefinition::new(
                    "trg",
                    "CREATE TRIGGER trg BEFORE INSERT ON nope FOR EACH ROW SET @a = 1"
                )
            ),
            Err(Error::TableNotFound {
                database: "mydb".to_string(),
                table: "nope".to_string(),
            })
        );
        assert_eq!(
            database.create_trigger(
                &ctx,
                TriggerDefinition::new(
                    "trg",
                    "CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW FOLLOWS other SET @a = 1"
                )
            ),
            Err(Error::NotFound("trigger", "other".to_string()))
        );
        database
            .create_trigger(
                &ctx,
                TriggerDefinition::new(
                    "trg",
                    "CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW SET @a = 1",
                ),
            )
            .unwrap();
        let triggers = database.triggers(&ctx).unwrap();
        assert_eq!(triggers.len(), 1);
        assert!(triggers[0].is_parsed());
        database.drop_trigger(&ctx, "TRG").unwrap();
        assert_eq!(
            database.drop_trigger(&ctx, "trg"),
            Err(Error::NotFound("trigger", "trg".to_string()))
        );
    }

    #[test]
    fn views_can_be_replaced() {
        let database = database_with_table();
        let ctx = Context::default();
        let first = ViewDefinition::parse("CREATE VIEW v AS SELECT * FROM t").unwrap();
        let second = ViewDefinition::parse("CREATE VIEW v AS SELECT * FROM t WHERE a = 1").unwrap();
        database.create_view(&ctx, first, false).unwrap();
        assert_eq!(
            database.create_view(&ctx, second.clone(), false),
            Err(Error::AlreadyExists("view", "v".to_string()))
        );
        database.create_view(&ctx, second, true).unwrap();
        let views = database.views(&ctx).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].text_definition, "SELECT * FROM t WHERE a = 1");
    }
}
