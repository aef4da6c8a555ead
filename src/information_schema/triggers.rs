use tracing::*;

use super::CATALOG_NAME;
use crate::catalog::capabilities::unwrap_database;
use crate::catalog::definitions::TriggerDefinition;
use crate::catalog::Catalog;
use crate::constructs::components::DataInstance;
use crate::constructs::rows::Row;
use crate::constructs::statements::{
    CreateTriggerStatement, TriggerEvent, TriggerOrder, TriggerTiming,
};
use crate::errors::Result;
use crate::row;
use crate::session::Context;

/// Row order of the six (timing, event) groups.
const BUCKETS: [(TriggerTiming, TriggerEvent); 6] = [
    (TriggerTiming::Before, TriggerEvent::Delete),
    (TriggerTiming::Before, TriggerEvent::Insert),
    (TriggerTiming::Before, TriggerEvent::Update),
    (TriggerTiming::After, TriggerEvent::Delete),
    (TriggerTiming::After, TriggerEvent::Insert),
    (TriggerTiming::After, TriggerEvent::Update),
];

/// Execution order within one timing: creation order, adjusted by `FOLLOWS`/`PRECEDES`.
/// An anchor that doesn't exist (yet) leaves the trigger at the end.
fn order_triggers<'a>(
    triggers: &'a [(TriggerDefinition, CreateTriggerStatement)],
    timing: TriggerTiming,
) -> Vec<&'a (TriggerDefinition, CreateTriggerStatement)> {
    let mut ordered: Vec<&(TriggerDefinition, CreateTriggerStatement)> = Vec::new();
    for trigger in triggers.iter().filter(|(_, statement)| statement.timing == timing) {
        let anchor_position = |anchor: &str| {
            ordered
                .iter()
                .position(|(_, other)| other.name.eq_ignore_ascii_case(anchor))
        };
        let position = match &trigger.1.order {
            Some(TriggerOrder::Follows(anchor)) => anchor_position(anchor).map(|found| found + 1),
            Some(TriggerOrder::Precedes(anchor)) => anchor_position(anchor),
            None => None,
        };
        match position {
            Some(position) => ordered.insert(position, trigger),
            None => ordered.push(trigger),
        }
    }
    ordered
}

pub fn read_triggers(ctx: &Context, catalog: &Catalog) -> Result<Vec<Row>> {
    let character_set_client = ctx.session_variable("character_set_client").unwrap_or_default();
    let collation_connection = ctx.session_variable("collation_connection").unwrap_or_default();
    let collation_server = ctx.session_variable("collation_server").unwrap_or_default();
    let session_sql_mode = ctx.session_variable("sql_mode").unwrap_or_default();

    let mut rows = Vec::new();
    for database in catalog.all_databases(ctx) {
        let database = unwrap_database(database);
        let trigger_database = match database.as_trigger_database() {
            Some(trigger_database) => trigger_database,
            None => continue,
        };
        let definitions = trigger_database.triggers(ctx)?;
        if definitions.is_empty() {
            continue;
        }
        let mut triggers = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let statement = definition.statement().map_err(|error| {
                warn!("‼️ Stored trigger {}.{} is malformed", database.name(), definition.name);
                error
            })?;
            triggers.push((definition, statement));
        }
        let before = order_triggers(&triggers, TriggerTiming::Before);
        let after = order_triggers(&triggers, TriggerTiming::After);

        for (timing, event) in BUCKETS {
            let ordered = match timing {
                TriggerTiming::Before => &before,
                TriggerTiming::After => &after,
            };
            let bucket = ordered
                .iter()
                .filter(|(_, statement)| statement.event == event);
            for (action_order, (definition, statement)) in bucket.enumerate() {
                let sql_mode = if definition.sql_mode.is_empty() {
                    session_sql_mode
                } else {
                    definition.sql_mode.as_str()
                };
                rows.push(row![
                    CATALOG_NAME,
                    database.name(),
                    statement.name.as_str(),
                    event.to_string(),
                    CATALOG_NAME,
                    database.name(),
                    statement.table.as_str(),
                    action_order as u32 + 1,
                    DataInstance::Null,
                    statement.body.as_str(),
                    "ROW",
                    timing.to_string(),
                    DataInstance::Null,
                    DataInstance::Null,
                    "OLD",
                    "NEW",
                    definition.created_at,
                    sql_mode,
                    statement.definer.clone().unwrap_or_else(|| ctx.definer()),
                    character_set_client,
                    collation_connection,
                    collation_server,
                ]);
            }
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{catalog_with, project};
    use super::*;
    use crate::catalog::capabilities::{Database, Table, TriggerDatabase};
    use crate::errors::Error;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn orders(statements: &[&str]) -> Vec<Row> {
        let mut all = vec!["CREATE TABLE t (a INT)"];
        all.extend_from_slice(statements);
        project(
            &catalog_with(&all),
            "TRIGGERS",
            "TRIGGER_SCHEMA",
            &["TRIGGER_NAME", "ACTION_TIMING", "EVENT_MANIPULATION", "ACTION_ORDER"],
        )
    }

    #[test]
    fn action_order_restarts_per_bucket() {
        assert_eq!(
            orders(&[
                "CREATE TRIGGER au1 AFTER UPDATE ON t FOR EACH ROW SET @x = 1",
                "CREATE TRIGGER bi BEFORE INSERT ON t FOR EACH ROW SET @x = 2",
                "CREATE TRIGGER au2 AFTER UPDATE ON t FOR EACH ROW SET @x = 3",
            ]),
            vec![
                row!["bi", "BEFORE", "INSERT", 1u32],
                row!["au1", "AFTER", "UPDATE", 1u32],
                row!["au2", "AFTER", "UPDATE", 2u32],
            ]
        );
    }

    #[test]
    fn follows_and_precedes_reorder_within_bucket() {
        assert_eq!(
            orders(&[
                "CREATE TRIGGER alpha BEFORE DELETE ON t FOR EACH ROW SET @x = 1",
                "CREATE TRIGGER beta BEFORE DELETE ON t FOR EACH ROW SET @x = 2",
                "CREATE TRIGGER after_alpha BEFORE DELETE ON t FOR EACH ROW FOLLOWS alpha SET @x = 3",
                "CREATE TRIGGER before_alpha BEFORE DELETE ON t FOR EACH ROW PRECEDES alpha SET @x = 4",
            ]),
            vec![
                row!["before_alpha", "BEFORE", "DELETE", 1u32],
                row!["alpha", "BEFORE", "DELETE", 2u32],
                row!["after_alpha", "BEFORE", "DELETE", 3u32],
                row!["beta", "BEFORE", "DELETE", 4u32],
            ]
        );
    }

    #[test]
    fn definer_and_body_come_from_the_statement() {
        let catalog = catalog_with(&[
            "CREATE TABLE t (a INT)",
            "CREATE DEFINER = 'admin'@'%' TRIGGER trg BEFORE INSERT ON t FOR EACH ROW SET @x = 1",
            "CREATE TRIGGER plain AFTER INSERT ON t FOR EACH ROW SET @y = 2",
        ]);
        assert_eq!(
            project(
                &catalog,
                "TRIGGERS",
                "TRIGGER_SCHEMA",
                &["TRIGGER_NAME", "EVENT_OBJECT_TABLE", "ACTION_STATEMENT", "DEFINER"]
            ),
            vec![
                row!["trg", "t", "SET @x = 1", "admin@%"],
                row!["plain", "t", "SET @y = 2", "root@localhost"],
            ]
        );
    }

    /// Keeps trigger text as given, the way a database without a parser would.
    struct RawTriggerDatabase(Vec<TriggerDefinition>);

    impl Database for RawTriggerDatabase {
        fn name(&self) -> &str {
            "raw"
        }

        fn table_names(&self, _ctx: &Context) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn table_insensitive(&self, _ctx: &Context, _name: &str) -> Result<Option<Arc<dyn Table>>> {
            Ok(None)
        }

        fn as_trigger_database(&self) -> Option<&dyn TriggerDatabase> {
            Some(self)
        }
    }

    impl TriggerDatabase for RawTriggerDatabase {
        fn triggers(&self, _ctx: &Context) -> Result<Vec<TriggerDefinition>> {
            Ok(self.0.clone())
        }

        fn create_trigger(&self, _ctx: &Context, _definition: TriggerDefinition) -> Result<()> {
            Ok(())
        }

        fn drop_trigger(&self, _ctx: &Context, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unparsed_text_is_parsed_on_read() {
        let catalog = Catalog::new();
        catalog
            .add_database(Arc::new(RawTriggerDatabase(vec![TriggerDefinition::new(
                "late",
                "CREATE TRIGGER late AFTER DELETE ON t FOR EACH ROW SET @x = 1",
            )
            .with_sql_mode("ANSI_QUOTES")])))
            .unwrap();
        let rows = read_triggers(&Context::default(), &catalog).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(2), &DataInstance::from("late"));
        assert_eq!(rows[0].get(17), &DataInstance::from("ANSI_QUOTES"));
    }

    #[test]
    fn malformed_stored_trigger_fails_the_read() {
        let catalog = Catalog::new();
        catalog
            .add_database(Arc::new(RawTriggerDatabase(vec![TriggerDefinition::new(
                "bad",
                "CREATE TRIGGER bad BEFORE EXPLODE ON t",
            )])))
            .unwrap();
        match read_triggers(&Context::default(), &catalog) {
            Err(Error::MalformedTrigger { name, .. }) => assert_eq!(name, "bad"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
