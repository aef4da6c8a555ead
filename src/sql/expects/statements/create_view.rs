use crate::constructs::statements::{CheckOption, CreateViewStatement};
use crate::sql::errors::*;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

use super::CreatePrelude;

/// Number of trailing tokens forming `WITH [CASCADED|LOCAL] CHECK OPTION`, and the option itself.
fn trailing_check_option(tokens: &[Token]) -> (usize, CheckOption) {
    let values: Vec<&TokenValue> = tokens.iter().map(|token| &token.value).collect();
    match values.as_slice() {
        [.., TokenValue::Const(Keyword::With), TokenValue::Const(Keyword::Cascaded), TokenValue::Const(Keyword::Check), TokenValue::Const(Keyword::Option)] => {
            (4, CheckOption::Cascaded)
        }
        [.., TokenValue::Const(Keyword::With), TokenValue::Const(Keyword::Local), TokenValue::Const(Keyword::Check), TokenValue::Const(Keyword::Option)] => {
            (4, CheckOption::Local)
        }
        // Plain WITH CHECK OPTION defaults to CASCADED
        [.., TokenValue::Const(Keyword::With), TokenValue::Const(Keyword::Check), TokenValue::Const(Keyword::Option)] => {
            (3, CheckOption::Cascaded)
        }
        _ => (0, CheckOption::None),
    }
}

/// Conjure a CreateViewStatement from tokens following CREATE [...] VIEW.
pub fn expect_create_view<'t>(
    tokens: &'t [Token],
    prelude: CreatePrelude,
    source: &str,
) -> ExpectResult<'t, CreateViewStatement> {
    let ExpectOk { rest, outcome: name, .. } = expect_identifier(tokens)?;
    let ExpectOk { rest, outcome: columns, .. } = optionalize(rest, |tokens| {
        expect_enclosed_comma_separated(tokens, expect_identifier)
    });
    let ExpectOk { rest, .. } = expect_token_value(rest, &TokenValue::Const(Keyword::As))?;
    let meaningful_count = rest.len()
        - rest
            .iter()
            .rev()
            .take_while(|token| token.value == TokenValue::Delimiting(Delimiter::Semicolon))
            .count();
    let meaningful = &rest[..meaningful_count];
    let (check_option_length, check_option) = trailing_check_option(meaningful);
    let query = &meaningful[..meaningful.len() - check_option_length];
    match query.first() {
        Some(Token {
            value: TokenValue::Const(Keyword::Select),
            ..
        })
        | Some(Token {
            value: TokenValue::Delimiting(Delimiter::ParenthesisOpening),
            ..
        }) => {}
        Some(wrong_token) => {
            return Err(SyntaxError(format!(
                "Expected {}, instead found {}.",
                Keyword::Select,
                wrong_token
            )))
        }
        None => {
            return Err(SyntaxError(format!(
                "Expected {}, instead found end of statement.",
                Keyword::Select
            )))
        }
    }
    let definition_end = meaningful
        .get(query.len())
        .map_or(source.len(), |token| token.offset);
    let definition = source[query[0].offset..definition_end]
        .trim()
        .trim_end_matches(';')
        .trim_end()
        .to_string();
    Ok(ExpectOk {
        rest: &rest[rest.len()..],
        tokens_consumed_count: tokens.len(),
        outcome: CreateViewStatement {
            name,
            or_replace: prelude.or_replace,
            algorithm: prelude.algorithm,
            definer: prelude.definer,
            security: prelude.security,
            columns: columns.unwrap_or_default(),
            definition,
            check_option,
        },
    })
}
