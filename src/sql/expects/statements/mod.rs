mod analyze;
mod create_procedure;
mod create_table;
mod create_trigger;
mod create_view;
mod drop;
mod insert;
mod select;
mod update;

pub use analyze::*;
pub use create_procedure::*;
pub use create_table::*;
pub use create_trigger::*;
pub use create_view::*;
pub use drop::*;
pub use insert::*;
pub use select::*;
pub use update::*;

use crate::sql::tokenizer::{Delimiter, Token, TokenValue};

/// Source text from `from_token` to the end of the statement, without trailing separators.
pub(crate) fn slice_to_end<'s>(source: &'s str, from_token: &Token) -> &'s str {
    source[from_token.offset..]
        .trim()
        .trim_end_matches(|character: char| character == ';' || character.is_whitespace())
}

/// Index of the parenthesis closing the one that `tokens` starts with.
pub(crate) fn find_closing_parenthesis(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.value {
            TokenValue::Delimiting(Delimiter::ParenthesisOpening) => depth += 1,
            TokenValue::Delimiting(Delimiter::ParenthesisClosing) => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

use crate::constructs::statements::SqlSecurity;
use crate::sql::errors::SyntaxError;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::Keyword;

/// Options that may sit between CREATE and the object keyword.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreatePrelude {
    pub or_replace: bool,
    pub algorithm: Option<String>,
    pub definer: Option<String>,
    pub security: Option<SqlSecurity>,
}

impl CreatePrelude {
    pub fn is_view_only(&self) -> bool {
        self.or_replace || self.algorithm.is_some() || self.security.is_some()
    }
}

pub fn expect_create_prelude<'t>(tokens: &'t [Token]) -> ExpectResult<'t, CreatePrelude> {
    let ExpectOk {
        rest,
        outcome: or_replace,
        ..
    } = detect(
        tokens,
        &[
            TokenValue::Const(Keyword::Or),
            TokenValue::Const(Keyword::Replace),
        ],
    );
    let ExpectOk {
        rest,
        outcome: algorithm,
        ..
    } = optionalize(rest, |tokens| {
        let ExpectOk { rest, .. } = expect_token_values_sequence(
            tokens,
            &[
                TokenValue::Const(Keyword::Algorithm),
                TokenValue::Delimiting(Delimiter::Equals),
            ],
        )?;
        let ExpectOk { rest, outcome, .. } = expect_identifier(rest)?;
        Ok(ExpectOk {
            rest,
            tokens_consumed_count: 3,
            outcome: outcome.to_uppercase(),
        })
    });
    let ExpectOk {
        rest,
        outcome: definer,
        ..
    } = optionalize(rest, expect_definer);
    let ExpectOk {
        rest,
        outcome: has_security,
        ..
    } = detect(
        rest,
        &[
            TokenValue::Const(Keyword::Sql),
            TokenValue::Const(Keyword::Security),
        ],
    );
    let (rest, security) = if has_security {
        let ExpectOk {
            rest,
            outcome: found_token,
            ..
        } = expect_next_token(rest, &format!("{} or {}", Keyword::Definer, Keyword::Invoker))?;
        match found_token.value {
            TokenValue::Const(Keyword::Definer) => (rest, Some(SqlSecurity::Definer)),
            TokenValue::Const(Keyword::Invoker) => (rest, Some(SqlSecurity::Invoker)),
            _ => {
                return Err(SyntaxError(format!(
                    "Expected {} or {}, instead found {}.",
                    Keyword::Definer,
                    Keyword::Invoker,
                    found_token
                )))
            }
        }
    } else {
        (rest, None)
    };
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens.len() - rest.len(),
        outcome: CreatePrelude {
            or_replace,
            algorithm,
            definer,
            security,
        },
    })
}
