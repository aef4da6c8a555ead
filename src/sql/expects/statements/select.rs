use crate::constructs::statements::SelectStatement;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

/// Conjure a SelectStatement from tokens following SELECT.
pub fn expect_select<'t>(tokens: &'t [Token]) -> ExpectResult<'t, SelectStatement> {
    let ExpectOk { rest, .. } = expect_token_values_sequence(
        tokens,
        &[
            TokenValue::Delimiting(Delimiter::Asterisk),
            TokenValue::Const(Keyword::From),
        ],
    )?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_table,
        outcome: table,
    } = expect_table_reference(rest)?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_conditions,
        outcome: conditions,
    } = expect_conditions(rest)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 2 + tokens_consumed_count_table + tokens_consumed_count_conditions,
        outcome: SelectStatement { table, conditions },
    })
}
