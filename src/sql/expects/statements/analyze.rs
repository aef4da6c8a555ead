use crate::constructs::statements::AnalyzeTableStatement;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

/// Conjure an AnalyzeTableStatement from tokens following ANALYZE.
pub fn expect_analyze_table<'t>(tokens: &'t [Token]) -> ExpectResult<'t, AnalyzeTableStatement> {
    let ExpectOk { rest, .. } = expect_token_value(tokens, &TokenValue::Const(Keyword::Table))?;
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: tables,
    } = expect_comma_separated(rest, expect_table_reference)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 1 + tokens_consumed_count,
        outcome: AnalyzeTableStatement { tables },
    })
}
