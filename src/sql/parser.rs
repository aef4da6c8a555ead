use super::errors::*;
use super::expects::*;
use super::tokenizer::*;
use crate::constructs::statements::{
    AnalyzeTableStatement, CreateProcedureStatement, CreateTableStatement,
    CreateTriggerStatement, CreateViewStatement, DropStatement, InsertStatement, SelectStatement,
    UpdateStatement,
};
use crate::constructs::Validatable;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    CreateTable(CreateTableStatement),
    CreateTrigger(CreateTriggerStatement),
    CreateView(CreateViewStatement),
    CreateProcedure(CreateProcedureStatement),
    Insert(InsertStatement),
    Select(SelectStatement),
    Update(UpdateStatement),
    AnalyzeTable(AnalyzeTableStatement),
    Drop(DropStatement),
}

impl Statement {
    /// Whether the statement leaves both data and catalog untouched.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}

impl Validatable for Statement {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Statement::CreateTable(create_table) => create_table.validate(),
            Statement::Insert(insert) if insert.rows.is_empty() => {
                Err(ValidationError("INSERT needs at least one row".into()))
            }
            Statement::Update(update) if update.assignments.is_empty() => {
                Err(ValidationError("UPDATE needs at least one assignment".into()))
            }
            _ => Ok(()),
        }
    }
}

fn parse_create(rest: &[Token], input: &str) -> Result<Statement, SyntaxError> {
    let ExpectOk {
        rest,
        outcome: prelude,
        ..
    } = expect_create_prelude(rest)?;
    let expected_objects = format!(
        "{}, {}, {} or {}",
        Keyword::Table,
        Keyword::Trigger,
        Keyword::View,
        Keyword::Procedure
    );
    let ExpectOk {
        rest,
        outcome: found_token,
        ..
    } = expect_next_token(rest, &expected_objects)?;
    if prelude.is_view_only() && found_token.value != TokenValue::Const(Keyword::View) {
        return Err(SyntaxError(format!(
            "Expected {}, instead found {}.",
            Keyword::View,
            found_token
        )));
    }
    match found_token.value {
        // CREATE TABLE
        TokenValue::Const(Keyword::Table) if prelude.definer.is_none() => Ok(
            Statement::CreateTable(consume_all(rest, |tokens| expect_create_table(tokens, input))?),
        ),
        // CREATE TRIGGER
        TokenValue::Const(Keyword::Trigger) => Ok(Statement::CreateTrigger(consume_all(
            rest,
            |tokens| expect_create_trigger(tokens, prelude.definer.clone(), input),
        )?)),
        // CREATE VIEW
        TokenValue::Const(Keyword::View) => {
            let ExpectOk { outcome, .. } = expect_create_view(rest, prelude, input)?;
            Ok(Statement::CreateView(outcome))
        }
        // CREATE PROCEDURE
        TokenValue::Const(Keyword::Procedure) => Ok(Statement::CreateProcedure(consume_all(
            rest,
            |tokens| expect_create_procedure(tokens, prelude.definer.clone(), input),
        )?)),
        // CREATE ???
        _ => Err(SyntaxError(format!(
            "Expected {}, instead found {}.",
            expected_objects, found_token
        ))),
    }
}

pub fn parse_statement(input: &str) -> Result<Statement, SyntaxError> {
    let tokens = tokenize_statement(input);
    let expected_beginnings = format!(
        "{}, {}, {}, {}, {} or {}",
        Keyword::Create,
        Keyword::Insert,
        Keyword::Select,
        Keyword::Update,
        Keyword::Analyze,
        Keyword::Drop
    );
    let ExpectOk {
        rest,
        outcome: found_token_first,
        ..
    } = expect_next_token(&tokens, &expected_beginnings)?;
    match found_token_first.value {
        // CREATE
        TokenValue::Const(Keyword::Create) => parse_create(rest, input),
        // INSERT
        TokenValue::Const(Keyword::Insert) => Ok(Statement::Insert(consume_all(rest, expect_insert)?)),
        // SELECT
        TokenValue::Const(Keyword::Select) => Ok(Statement::Select(consume_all(rest, expect_select)?)),
        // UPDATE
        TokenValue::Const(Keyword::Update) => Ok(Statement::Update(consume_all(rest, expect_update)?)),
        // ANALYZE
        TokenValue::Const(Keyword::Analyze) => Ok(Statement::AnalyzeTable(consume_all(
            rest,
            expect_analyze_table,
        )?)),
        // DROP
        TokenValue::Const(Keyword::Drop) => Ok(Statement::Drop(consume_all(rest, expect_drop)?)),
        // ???
        _ => Err(SyntaxError(format!(
            "Expected {}, instead found {}.",
            expected_beginnings, found_token_first
        ))),
    }
}
