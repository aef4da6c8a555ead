use std::sync::Arc;
use tracing::*;

use super::read::{column_position, resolve_conditions, resolve_table, row_matches, scan};
use super::QueryResult;
use crate::catalog::capabilities::Database;
use crate::catalog::definitions::{StoredProcedureDetails, TriggerDefinition, ViewDefinition};
use crate::catalog::Catalog;
use crate::constructs::components::DataInstance;
use crate::constructs::rows::Row;
use crate::constructs::statements::{
    CreateTableStatement, CreateViewStatement, DropKind, DropStatement, InsertStatement,
    TableReference, UpdateStatement,
};
use crate::errors::{Error, Result};
use crate::session::Context;

fn current_database(catalog: &Catalog, ctx: &Context) -> Result<Arc<dyn Database>> {
    catalog.database(ctx.current_database()?)
}

fn unsupported(database: &dyn Database, capability: &str) -> Error {
    Error::UnsupportedCapability {
        database: database.name().to_string(),
        capability: capability.to_string(),
    }
}

pub fn create_table(
    catalog: &Catalog,
    ctx: &Context,
    statement: &CreateTableStatement,
) -> Result<QueryResult> {
    let database = current_database(catalog, ctx)?;
    database
        .as_table_creator()
        .ok_or_else(|| unsupported(database.as_ref(), "CREATE TABLE"))?
        .create_table(ctx, statement)?;
    Ok(QueryResult::affected(0))
}

pub fn insert(catalog: &Catalog, ctx: &Context, statement: &InsertStatement) -> Result<QueryResult> {
    let reference = TableReference {
        database: None,
        table: statement.table_name.clone(),
    };
    let (database, table) = resolve_table(catalog, ctx, &reference)?;
    let inserted = table
        .as_insertable()
        .ok_or_else(|| Error::NotUpdatable(format!("{}.{}", database, table.name())))?
        .insert(ctx, statement)?;
    trace!("✏️ Inserted {} rows into {}.{}", inserted, database, table.name());
    Ok(QueryResult::affected(inserted))
}

/// Hands each matching row to the table as an `(old, new)` pair.
pub fn update(catalog: &Catalog, ctx: &Context, statement: &UpdateStatement) -> Result<QueryResult> {
    let (database, table) = resolve_table(catalog, ctx, &statement.table)?;
    let updatable = table
        .as_updatable()
        .ok_or_else(|| Error::NotUpdatable(format!("{}.{}", database, table.name())))?;
    let schema = table.schema();
    let conditions = resolve_conditions(&schema, &statement.conditions)?;
    let assignments = statement
        .assignments
        .iter()
        .map(|assignment| Ok((column_position(&schema, &assignment.column)?, &assignment.value)))
        .collect::<Result<Vec<_>>>()?;

    let mut affected: u64 = 0;
    for old in scan(ctx, table.as_ref())? {
        if !row_matches(&old, &conditions) {
            continue;
        }
        let mut new: Row = old.clone();
        for (position, value) in &assignments {
            if *position >= new.0.len() {
                new.0.resize(*position + 1, DataInstance::Null);
            }
            new.0[*position] = (*value).clone();
        }
        updatable.update_row(ctx, &old, &new)?;
        affected += 1;
    }
    debug!(
        "✏️ Updated {} rows of {}.{}",
        affected,
        database,
        table.name()
    );
    Ok(QueryResult::affected(affected))
}

pub fn create_trigger(catalog: &Catalog, ctx: &Context, text: &str) -> Result<QueryResult> {
    let database = current_database(catalog, ctx)?;
    let trigger_database = database
        .as_trigger_database()
        .ok_or_else(|| unsupported(database.as_ref(), "triggers"))?;
    let definition = TriggerDefinition::parse(text)?
        .with_sql_mode(ctx.session_variable("sql_mode").unwrap_or_default());
    trigger_database.create_trigger(ctx, definition)?;
    Ok(QueryResult::affected(0))
}

/// Databases that cannot store views get them kept in the session's registry instead.
pub fn create_view(
    catalog: &Catalog,
    ctx: &Context,
    statement: &CreateViewStatement,
    text: &str,
) -> Result<QueryResult> {
    let database = current_database(catalog, ctx)?;
    let definition = ViewDefinition::from_statement(statement.clone(), text);
    match database.as_view_database() {
        Some(view_database) => view_database.create_view(ctx, definition, statement.or_replace)?,
        None => {
            debug!(
                "🆕 Registering view {}.{} in the session",
                database.name(),
                definition.name
            );
            ctx.views
                .register(database.name(), definition, statement.or_replace)?
        }
    }
    Ok(QueryResult::affected(0))
}

pub fn create_procedure(catalog: &Catalog, ctx: &Context, text: &str) -> Result<QueryResult> {
    let database = current_database(catalog, ctx)?;
    database
        .as_stored_procedure_database()
        .ok_or_else(|| unsupported(database.as_ref(), "stored procedures"))?
        .create_procedure(ctx, StoredProcedureDetails::parse(text)?)?;
    Ok(QueryResult::affected(0))
}

fn drop_view(ctx: &Context, database: &dyn Database, name: &str) -> Result<()> {
    if let Some(view_database) = database.as_view_database() {
        match view_database.drop_view(ctx, name) {
            Err(Error::NotFound(..)) => (),
            outcome => return outcome,
        }
    }
    if ctx.views.remove(database.name(), name) {
        Ok(())
    } else {
        Err(Error::NotFound("view", name.to_string()))
    }
}

pub fn drop(catalog: &Catalog, ctx: &Context, statement: &DropStatement) -> Result<QueryResult> {
    let database = current_database(catalog, ctx)?;
    let outcome = match statement.kind {
        DropKind::Trigger => database
            .as_trigger_database()
            .ok_or_else(|| unsupported(database.as_ref(), "triggers"))
            .and_then(|triggers| triggers.drop_trigger(ctx, &statement.name)),
        DropKind::View => drop_view(ctx, database.as_ref(), &statement.name),
        DropKind::Procedure => database
            .as_stored_procedure_database()
            .ok_or_else(|| unsupported(database.as_ref(), "stored procedures"))
            .and_then(|procedures| procedures.drop_procedure(ctx, &statement.name)),
    };
    match outcome {
        Ok(()) => {
            debug!(
                "🗡 Dropped {} {}.{}",
                statement.kind,
                database.name(),
                statement.name
            );
            Ok(QueryResult::affected(0))
        }
        Err(Error::NotFound(..)) if statement.if_exists => Ok(QueryResult::affected(0)),
        Err(error) => Err(error),
    }
}
