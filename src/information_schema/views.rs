use std::collections::HashSet;
use tracing::*;

use super::CATALOG_NAME;
use crate::catalog::capabilities::{unwrap_database, Database};
use crate::catalog::definitions::ViewDefinition;
use crate::catalog::privileges::PrivilegeType;
use crate::catalog::Catalog;
use crate::constructs::rows::Row;
use crate::constructs::statements::SqlSecurity;
use crate::errors::Result;
use crate::row;
use crate::session::Context;

/// Views stored by the database itself followed by those registered in the session,
/// one per name. A native view shadows a session one of the same name.
pub(super) fn merged_views(ctx: &Context, database: &dyn Database) -> Result<Vec<ViewDefinition>> {
    let mut views = match database.as_view_database() {
        Some(view_database) => view_database.views(ctx)?,
        None => Vec::new(),
    };
    let mut seen: HashSet<String> = views.iter().map(|view| view.name.to_lowercase()).collect();
    for view in ctx.views.views_in_database(database.name()) {
        if seen.insert(view.name.to_lowercase()) {
            views.push(view);
        }
    }
    Ok(views)
}

pub fn read_views(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let character_set_client = ctx.session_variable("character_set_client").unwrap_or_default();
    let collation_connection = ctx.session_variable("collation_connection").unwrap_or_default();

    let mut rows = Vec::new();
    for database in catalog.all_databases(ctx) {
        let database = unwrap_database(database);
        for view in merged_views(ctx, database.as_ref())? {
            if !ctx
                .privileges
                .has_table(database.name(), &view.name, PrivilegeType::ShowView)
            {
                continue;
            }
            let statement = view.statement().map_err(|error| {
                warn!("‼️ Stored view {}.{} is malformed", database.name(), view.name);
                error
            })?;
            rows.push(row![
                CATALOG_NAME,
                database.name(),
                view.name.as_str(),
                view.text_definition.as_str(),
                statement.check_option.to_string(),
                "YES",
                statement.definer.unwrap_or_else(|| ctx.definer()),
                statement.security.unwrap_or(SqlSecurity::Definer).to_string(),
                character_set_client,
                collation_connection,
            ]);
        }
    }
    Ok(rows)
}
