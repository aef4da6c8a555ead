//! The `information_schema` database: MySQL 8.0 system views, recomputed from the catalog on every read.

mod charsets;
mod columns;
mod constraints;
mod privileges;
mod routines;
pub mod schemas;
mod statistics;
mod table;
mod tables;
mod triggers;
mod views;

pub use charsets::{DEFAULT_CHARACTER_SET, DEFAULT_COLLATION};
pub use table::{partition_key, InformationSchemaTable, RowReader, RowUpdater};

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use crate::catalog::capabilities::{Database, Table};
use crate::catalog::Catalog;
use crate::errors::Result;
use crate::session::Context;

pub const INFORMATION_SCHEMA_NAME: &str = "information_schema";

/// Value of every `*_CATALOG` column.
const CATALOG_NAME: &str = "def";

const COLUMNS: &str = "COLUMNS";

/// Call `visit` for every table of every database the session can see.
fn for_each_table(
    ctx: &Context,
    catalog: &Catalog,
    mut visit: impl FnMut(&dyn Database, &Arc<dyn Table>) -> Result<()>,
) -> Result<()> {
    for database in catalog.all_databases(ctx) {
        catalog.db_table_iter(ctx, database.as_ref(), |table| {
            visit(database.as_ref(), table)?;
            Ok(true)
        })?;
    }
    Ok(())
}

pub struct InformationSchemaDatabase {
    // Keyed by upper case name
    tables: BTreeMap<&'static str, Arc<InformationSchemaTable>>,
    catalog: Weak<Catalog>,
}

impl InformationSchemaDatabase {
    pub fn new(catalog: Weak<Catalog>) -> Self {
        let populated = [
            InformationSchemaTable::new("TABLES", schemas::tables()).with_reader(tables::read_tables),
            InformationSchemaTable::new("SCHEMATA", schemas::schemata())
                .with_reader(tables::read_schemata),
            InformationSchemaTable::new("COLLATIONS", schemas::collations())
                .with_reader(charsets::read_collations),
            InformationSchemaTable::new("CHARACTER_SETS", schemas::character_sets())
                .with_reader(charsets::read_character_sets),
            InformationSchemaTable::new("ENGINES", schemas::engines())
                .with_reader(charsets::read_engines),
            InformationSchemaTable::new("STATISTICS", schemas::statistics())
                .with_reader(statistics::read_statistics)
                .with_updater(statistics::update_statistics),
            InformationSchemaTable::new("COLUMN_STATISTICS", schemas::column_statistics())
                .with_reader(statistics::read_column_statistics),
            InformationSchemaTable::new("TABLE_CONSTRAINTS", schemas::table_constraints())
                .with_reader(constraints::read_table_constraints),
            InformationSchemaTable::new("REFERENTIAL_CONSTRAINTS", schemas::referential_constraints())
                .with_reader(constraints::read_referential_constraints),
            InformationSchemaTable::new("KEY_COLUMN_USAGE", schemas::key_column_usage())
                .with_reader(constraints::read_key_column_usage),
            InformationSchemaTable::new("CHECK_CONSTRAINTS", schemas::check_constraints())
                .with_reader(constraints::read_check_constraints),
            InformationSchemaTable::new("TRIGGERS", schemas::triggers())
                .with_reader(triggers::read_triggers),
            InformationSchemaTable::new("ROUTINES", schemas::routines())
                .with_reader(routines::read_routines),
            InformationSchemaTable::new("VIEWS", schemas::views()).with_reader(views::read_views),
            InformationSchemaTable::new("USER_PRIVILEGES", schemas::user_privileges())
                .with_reader(privileges::read_user_privileges),
            InformationSchemaTable::new("SCHEMA_PRIVILEGES", schemas::schema_privileges())
                .with_reader(privileges::read_schema_privileges),
            InformationSchemaTable::new("TABLE_PRIVILEGES", schemas::table_privileges())
                .with_reader(privileges::read_table_privileges),
        ];
        let empty = [
            InformationSchemaTable::new("COLUMN_PRIVILEGES", schemas::column_privileges()),
            InformationSchemaTable::new("EVENTS", schemas::events()),
            InformationSchemaTable::new("PARTITIONS", schemas::partitions()),
            InformationSchemaTable::new("FILES", schemas::files()),
            InformationSchemaTable::new("PLUGINS", schemas::plugins()),
            InformationSchemaTable::new("PROCESSLIST", schemas::processlist()),
            InformationSchemaTable::new("RESOURCE_GROUPS", schemas::resource_groups()),
            InformationSchemaTable::new("KEYWORDS", schemas::keywords()),
            InformationSchemaTable::new("PARAMETERS", schemas::parameters()),
            InformationSchemaTable::new("ENABLED_ROLES", schemas::enabled_roles()),
            InformationSchemaTable::new("APPLICABLE_ROLES", schemas::role_authorizations()),
            InformationSchemaTable::new(
                "ADMINISTRABLE_ROLE_AUTHORIZATIONS",
                schemas::role_authorizations(),
            ),
            InformationSchemaTable::new("ROLE_TABLE_GRANTS", schemas::role_table_grants()),
            InformationSchemaTable::new("ROLE_COLUMN_GRANTS", schemas::role_column_grants()),
            InformationSchemaTable::new("ROLE_ROUTINE_GRANTS", schemas::role_routine_grants()),
            InformationSchemaTable::new(
                "ST_SPATIAL_REFERENCE_SYSTEMS",
                schemas::st_spatial_reference_systems(),
            ),
            InformationSchemaTable::new("ST_UNITS_OF_MEASURE", schemas::st_units_of_measure()),
            InformationSchemaTable::new("ST_GEOMETRY_COLUMNS", schemas::st_geometry_columns()),
            InformationSchemaTable::new("TABLES_EXTENSIONS", schemas::tables_extensions()),
            InformationSchemaTable::new("COLUMNS_EXTENSIONS", schemas::columns_extensions()),
            InformationSchemaTable::new(
                "TABLE_CONSTRAINTS_EXTENSIONS",
                schemas::table_constraints_extensions(),
            ),
            InformationSchemaTable::new("SCHEMATA_EXTENSIONS", schemas::schemata_extensions()),
            InformationSchemaTable::new("TABLESPACES", schemas::tablespaces()),
            InformationSchemaTable::new("OPTIMIZER_TRACE", schemas::optimizer_trace()),
            InformationSchemaTable::new("PROFILING", schemas::profiling()),
            InformationSchemaTable::new("USER_ATTRIBUTES", schemas::user_attributes()),
            InformationSchemaTable::new("VIEW_TABLE_USAGE", schemas::view_table_usage()),
            InformationSchemaTable::new("VIEW_ROUTINE_USAGE", schemas::view_routine_usage()),
            InformationSchemaTable::new("INNODB_TEMP_TABLE_INFO", schemas::innodb_temp_table_info()),
            InformationSchemaTable::new(
                "INNODB_TABLESPACES_BRIEF",
                schemas::innodb_tablespaces_brief(),
            ),
            InformationSchemaTable::new("INNODB_CMP", schemas::innodb_cmp()),
            InformationSchemaTable::new("INNODB_FT_CONFIG", schemas::innodb_ft_config()),
            InformationSchemaTable::new(
                "INNODB_FT_DEFAULT_STOPWORD",
                schemas::innodb_ft_default_stopword(),
            ),
        ];
        let tables = populated
            .into_iter()
            .chain(empty)
            .map(|table| {
                let table = table.attach(catalog.clone());
                (table.name_static(), Arc::new(table))
            })
            .collect();
        InformationSchemaDatabase { tables, catalog }
    }

    /// `COLUMNS` is built anew for every lookup instead of being shared.
    fn columns_table(&self) -> InformationSchemaTable {
        InformationSchemaTable::new(COLUMNS, schemas::columns())
            .with_reader(columns::read_columns)
            .attach(self.catalog.clone())
    }
}

impl Database for InformationSchemaDatabase {
    fn name(&self) -> &str {
        INFORMATION_SCHEMA_NAME
    }

    fn table_names(&self, _ctx: &Context) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .tables
            .keys()
            .map(|name| name.to_string())
            .chain(std::iter::once(COLUMNS.to_string()))
            .collect();
        names.sort();
        Ok(names)
    }

    fn table_insensitive(&self, _ctx: &Context, name: &str) -> Result<Option<Arc<dyn Table>>> {
        let name = name.to_uppercase();
        if name == COLUMNS {
            return Ok(Some(Arc::new(self.columns_table())));
        }
        Ok(self
            .tables
            .get(name.as_str())
            .map(|table| table.clone() as Arc<dyn Table>))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::catalog::capabilities::{
        InsertableTable, StoredProcedureDatabase, TriggerDatabase, ViewDatabase,
    };
    use crate::catalog::definitions::{StoredProcedureDetails, TriggerDefinition, ViewDefinition};
    use crate::catalog::Catalog;
    use crate::constructs::rows::Row;
    use crate::memory;
    use crate::session::Context;
    use crate::sql::{parse_statement, Statement};

    /// Catalog with one in-memory database `mydb` built from the given statements.
    pub fn catalog_with(statements: &[&str]) -> Arc<Catalog> {
        let catalog = Catalog::new();
        let database = memory::Database::new("mydb");
        let ctx = Context::default().with_database("mydb");
        for sql in statements {
            match parse_statement(sql).unwrap() {
                Statement::CreateTable(statement) => {
                    database.add_table(statement).unwrap();
                }
                Statement::CreateTrigger(_) => database
                    .create_trigger(&ctx, TriggerDefinition::parse(sql).unwrap())
                    .unwrap(),
                Statement::CreateView(_) => database
                    .create_view(&ctx, ViewDefinition::parse(sql).unwrap(), false)
                    .unwrap(),
                Statement::CreateProcedure(_) => database
                    .create_procedure(&ctx, StoredProcedureDetails::parse(sql).unwrap())
                    .unwrap(),
                Statement::Insert(statement) => {
                    database
                        .memory_table(&statement.table_name)
                        .unwrap()
                        .insert(&ctx, &statement)
                        .unwrap();
                }
                other => panic!("Unexpected statement: {:?}", other),
            }
        }
        catalog.add_database(Arc::new(database)).unwrap();
        catalog
    }

    /// Every row of a system view, read the way a query would.
    pub fn read_view(catalog: &Catalog, ctx: &Context, name: &str) -> Vec<Row> {
        let table = catalog.table(ctx, super::INFORMATION_SCHEMA_NAME, name).unwrap();
        let partition = &table.partitions(ctx).unwrap()[0];
        table.partition_rows(ctx, partition).unwrap()
    }

    /// Rows of a system view that belong to `mydb`, projected onto the named columns.
    pub fn project(catalog: &Catalog, name: &str, schema_column: &str, columns: &[&str]) -> Vec<Row> {
        let ctx = Context::default();
        let table = catalog.table(&ctx, super::INFORMATION_SCHEMA_NAME, name).unwrap();
        let schema = table.schema();
        let position = |column: &str| {
            schema
                .iter()
                .position(|definition| definition.name == column)
                .unwrap()
        };
        let schema_position = position(schema_column);
        let positions: Vec<usize> = columns.iter().map(|column| position(column)).collect();
        read_view(catalog, &ctx, name)
            .into_iter()
            .filter(|row| row.get(schema_position).as_str() == Some("mydb"))
            .map(|row| Row(positions.iter().map(|&i| row.get(i).clone()).collect()))
            .collect()
    }
}
