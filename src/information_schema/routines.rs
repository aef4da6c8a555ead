use tracing::*;

use super::CATALOG_NAME;
use crate::catalog::capabilities::unwrap_database;
use crate::catalog::Catalog;
use crate::constructs::components::DataInstance;
use crate::constructs::rows::Row;
use crate::errors::Result;
use crate::row;
use crate::session::Context;

pub fn read_routines(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let character_set_client = ctx.session_variable("character_set_client").unwrap_or_default();
    let collation_connection = ctx.session_variable("collation_connection").unwrap_or_default();
    let collation_server = ctx.session_variable("collation_server").unwrap_or_default();
    let sql_mode = ctx.session_variable("sql_mode").unwrap_or_default();

    let mut rows = Vec::new();
    for database in catalog.all_databases(ctx) {
        let database = unwrap_database(database);
        let procedure_database = match database.as_stored_procedure_database() {
            Some(procedure_database) => procedure_database,
            None => continue,
        };
        for procedure in procedure_database.procedures(ctx)? {
            let statement = procedure.statement().map_err(|error| {
                warn!(
                    "‼️ Stored procedure {}.{} is malformed",
                    database.name(),
                    procedure.name
                );
                error
            })?;
            rows.push(row![
                statement.name.as_str(),
                CATALOG_NAME,
                database.name(),
                statement.name.as_str(),
                "PROCEDURE",
                "",
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                DataInstance::Null,
                "SQL",
                statement.body.as_str(),
                DataInstance::Null,
                "SQL",
                "SQL",
                if statement.deterministic { "YES" } else { "NO" },
                "CONTAINS SQL",
                DataInstance::Null,
                "DEFINER",
                procedure.created_at,
                procedure.modified_at,
                sql_mode,
                statement.comment.as_str(),
                statement.definer.clone().unwrap_or_else(|| ctx.definer()),
                character_set_client,
                collation_connection,
                collation_server,
            ]);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{catalog_with, project};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn procedures_are_listed_with_their_clauses() {
        let catalog = catalog_with(&[
            "CREATE PROCEDURE noop() SELECT * FROM t",
            "CREATE DEFINER = 'ops'@'localhost' PROCEDURE bump(IN n INT, OUT total BIGINT) \
             COMMENT 'adds n' DETERMINISTIC BEGIN SELECT * FROM t; END",
        ]);
        assert_eq!(
            project(
                &catalog,
                "ROUTINES",
                "ROUTINE_SCHEMA",
                &[
                    "ROUTINE_NAME",
                    "ROUTINE_TYPE",
                    "ROUTINE_DEFINITION",
                    "IS_DETERMINISTIC",
                    "ROUTINE_COMMENT",
                    "DEFINER"
                ]
            ),
            vec![
                row!["noop", "PROCEDURE", "SELECT * FROM t", "NO", "", "root@localhost"],
                row![
                    "bump",
                    "PROCEDURE",
                    "BEGIN SELECT * FROM t; END",
                    "YES",
                    "adds n",
                    "ops@localhost"
                ],
            ]
        );
    }
}
