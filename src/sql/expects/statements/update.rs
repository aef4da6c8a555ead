use crate::constructs::statements::UpdateStatement;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

/// Conjure an UpdateStatement from tokens following UPDATE.
pub fn expect_update<'t>(tokens: &'t [Token]) -> ExpectResult<'t, UpdateStatement> {
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_table,
        outcome: table,
    } = expect_table_reference(tokens)?;
    let ExpectOk { rest, .. } = expect_token_value(rest, &TokenValue::Const(Keyword::Set))?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_assignments,
        outcome: assignments,
    } = expect_comma_separated(rest, expect_column_value)?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_conditions,
        outcome: conditions,
    } = expect_conditions(rest)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 1 // SET
            + tokens_consumed_count_table
            + tokens_consumed_count_assignments
            + tokens_consumed_count_conditions,
        outcome: UpdateStatement {
            table,
            assignments,
            conditions,
        },
    })
}
