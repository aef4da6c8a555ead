use time::OffsetDateTime;

use crate::constructs::statements::{
    CreateProcedureStatement, CreateTriggerStatement, CreateViewStatement,
};
use crate::errors::{Error, Result};
use crate::sql::{parse_statement, Statement};

/// A trigger as a database stores it: the `CREATE TRIGGER` text it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDefinition {
    pub name: String,
    pub create_statement: String,
    pub created_at: OffsetDateTime,
    pub sql_mode: String,
    parsed: Option<CreateTriggerStatement>,
}

impl TriggerDefinition {
    /// Unparsed definition, parsed lazily on every read.
    pub fn new(name: &str, create_statement: &str) -> Self {
        TriggerDefinition {
            name: name.to_string(),
            create_statement: create_statement.to_string(),
            created_at: OffsetDateTime::now_utc(),
            sql_mode: String::new(),
            parsed: None,
        }
    }

    /// Parse the text once and keep the structured form.
    pub fn parse(create_statement: &str) -> Result<Self> {
        let parsed = parse_trigger(create_statement, "<unnamed>")?;
        Ok(TriggerDefinition {
            parsed: Some(parsed.clone()),
            ..Self::new(&parsed.name, create_statement)
        })
    }

    pub fn with_sql_mode(mut self, sql_mode: &str) -> Self {
        self.sql_mode = sql_mode.to_string();
        self
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    pub fn statement(&self) -> Result<CreateTriggerStatement> {
        match &self.parsed {
            Some(parsed) => Ok(parsed.clone()),
            None => parse_trigger(&self.create_statement, &self.name),
        }
    }
}

fn parse_trigger(create_statement: &str, name: &str) -> Result<CreateTriggerStatement> {
    match parse_statement(create_statement) {
        Ok(Statement::CreateTrigger(trigger)) => Ok(trigger),
        Ok(_) => Err(Error::MalformedTrigger {
            name: name.to_string(),
            reason: format!("not a CREATE TRIGGER statement: {}", create_statement),
        }),
        Err(error) => Err(Error::MalformedTrigger {
            name: name.to_string(),
            reason: error.0,
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    pub name: String,
    /// The SELECT the view stands for.
    pub text_definition: String,
    pub create_statement: String,
    parsed: Option<CreateViewStatement>,
}

impl ViewDefinition {
    pub fn new(name: &str, text_definition: &str, create_statement: &str) -> Self {
        ViewDefinition {
            name: name.to_string(),
            text_definition: text_definition.to_string(),
            create_statement: create_statement.to_string(),
            parsed: None,
        }
    }

    pub fn from_statement(statement: CreateViewStatement, create_statement: &str) -> Self {
        ViewDefinition {
            name: statement.name.clone(),
            text_definition: statement.definition.clone(),
            create_statement: create_statement.to_string(),
            parsed: Some(statement),
        }
    }

    pub fn parse(create_statement: &str) -> Result<Self> {
        let statement = parse_view(create_statement, "<unnamed>")?;
        Ok(Self::from_statement(statement, create_statement))
    }

    pub fn statement(&self) -> Result<CreateViewStatement> {
        match &self.parsed {
            Some(parsed) => Ok(parsed.clone()),
            None => parse_view(&self.create_statement, &self.name),
        }
    }
}

fn parse_view(create_statement: &str, name: &str) -> Result<CreateViewStatement> {
    match parse_statement(create_statement) {
        Ok(Statement::CreateView(view)) => Ok(view),
        Ok(_) => Err(Error::MalformedView {
            name: name.to_string(),
            reason: format!("not a CREATE VIEW statement: {}", create_statement),
        }),
        Err(error) => Err(Error::MalformedView {
            name: name.to_string(),
            reason: error.0,
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredProcedureDetails {
    pub name: String,
    pub create_statement: String,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
    parsed: Option<CreateProcedureStatement>,
}

impl StoredProcedureDetails {
    pub fn new(name: &str, create_statement: &str) -> Self {
        let now = OffsetDateTime::now_utc();
        StoredProcedureDetails {
            name: name.to_string(),
            create_statement: create_statement.to_string(),
            created_at: now,
            modified_at: now,
            parsed: None,
        }
    }

    pub fn parse(create_statement: &str) -> Result<Self> {
        let parsed = parse_procedure(create_statement, "<unnamed>")?;
        Ok(StoredProcedureDetails {
            parsed: Some(parsed.clone()),
            ..Self::new(&parsed.name, create_statement)
        })
    }

    pub fn statement(&self) -> Result<CreateProcedureStatement> {
        match &self.parsed {
            Some(parsed) => Ok(parsed.clone()),
            None => parse_procedure(&self.create_statement, &self.name),
        }
    }
}

fn parse_procedure(create_statement: &str, name: &str) -> Result<CreateProcedureStatement> {
    match parse_statement(create_statement) {
        Ok(Statement::CreateProcedure(procedure)) => Ok(procedure),
        Ok(_) => Err(Error::MalformedProcedure {
            name: name.to_string(),
            reason: format!("not a CREATE PROCEDURE statement: {}", create_statement),
        }),
        Err(error) => Err(Error::MalformedProcedure {
            name: name.to_string(),
            reason: error.0,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructs::statements::{TriggerEvent, TriggerTiming};
    use pretty_assertions::assert_eq;

    #[test]
    fn trigger_is_parsed_once_on_creation() {
        let trigger =
            TriggerDefinition::parse("CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW SET @a = 1")
                .unwrap();
        assert!(trigger.is_parsed());
        assert_eq!(trigger.name, "trg");
        let statement = trigger.statement().unwrap();
        assert_eq!(statement.timing, TriggerTiming::Before);
        assert_eq!(statement.event, TriggerEvent::Insert);
    }

    #[test]
    fn unparsed_trigger_reports_malformed_text_by_name() {
        let trigger = TriggerDefinition::new("broken", "CREATE TRIGGER broken ON t");
        match trigger.statement() {
            Err(Error::MalformedTrigger { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn view_text_of_another_kind_is_malformed() {
        let view = ViewDefinition::new("v", "SELECT 1", "SELECT * FROM t");
        match view.statement() {
            Err(Error::MalformedView { name, reason }) => {
                assert_eq!(name, "v");
                assert_eq!(reason, "not a CREATE VIEW statement: SELECT * FROM t");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
