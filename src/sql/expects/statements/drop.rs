use crate::constructs::statements::{DropKind, DropStatement};
use crate::sql::errors::*;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

/// Conjure a DropStatement from tokens following DROP.
pub fn expect_drop<'t>(tokens: &'t [Token]) -> ExpectResult<'t, DropStatement> {
    let ExpectOk {
        rest,
        outcome: found_token,
        ..
    } = expect_next_token(
        tokens,
        &format!("{}, {} or {}", Keyword::Trigger, Keyword::View, Keyword::Procedure),
    )?;
    let kind = match found_token.value {
        TokenValue::Const(Keyword::Trigger) => DropKind::Trigger,
        TokenValue::Const(Keyword::View) => DropKind::View,
        TokenValue::Const(Keyword::Procedure) => DropKind::Procedure,
        _ => {
            return Err(SyntaxError(format!(
                "Expected {}, {} or {}, instead found {}.",
                Keyword::Trigger,
                Keyword::View,
                Keyword::Procedure,
                found_token
            )))
        }
    };
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_if_exists,
        outcome: if_exists,
    } = detect(
        rest,
        &[
            TokenValue::Const(Keyword::If),
            TokenValue::Const(Keyword::Exists),
        ],
    );
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_name,
        outcome: reference,
    } = expect_table_reference(rest)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 1 + tokens_consumed_count_if_exists + tokens_consumed_count_name,
        outcome: DropStatement {
            kind,
            name: reference.table,
            if_exists,
        },
    })
}
