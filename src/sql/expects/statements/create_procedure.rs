use crate::constructs::statements::{CreateProcedureStatement, ParameterMode, ProcedureParameter};
use crate::sql::errors::*;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

use super::slice_to_end;

fn expect_parameter<'t>(tokens: &'t [Token]) -> ExpectResult<'t, ProcedureParameter> {
    let (rest, mode) = match tokens.first().map(|token| &token.value) {
        Some(TokenValue::Const(Keyword::In)) => (&tokens[1..], ParameterMode::In),
        Some(TokenValue::Const(Keyword::Out)) => (&tokens[1..], ParameterMode::Out),
        Some(TokenValue::Const(Keyword::Inout)) => (&tokens[1..], ParameterMode::InOut),
        _ => (tokens, ParameterMode::In),
    };
    let ExpectOk { rest, outcome: name, .. } = expect_identifier(rest)?;
    let ExpectOk { rest, outcome: data_type, .. } = expect_data_type_raw(rest)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens.len() - rest.len(),
        outcome: ProcedureParameter {
            mode,
            name,
            data_type,
        },
    })
}

fn expect_parameters<'t>(tokens: &'t [Token]) -> ExpectResult<'t, Vec<ProcedureParameter>> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: is_empty,
    } = detect(
        tokens,
        &[
            TokenValue::Delimiting(Delimiter::ParenthesisOpening),
            TokenValue::Delimiting(Delimiter::ParenthesisClosing),
        ],
    );
    if is_empty {
        return Ok(ExpectOk {
            rest,
            tokens_consumed_count,
            outcome: Vec::new(),
        });
    }
    expect_enclosed_comma_separated(tokens, expect_parameter)
}

/// Conjure a CreateProcedureStatement from tokens following CREATE [DEFINER = ...] PROCEDURE.
pub fn expect_create_procedure<'t>(
    tokens: &'t [Token],
    definer: Option<String>,
    source: &str,
) -> ExpectResult<'t, CreateProcedureStatement> {
    let ExpectOk { rest, outcome: name, .. } = expect_identifier(tokens)?;
    let ExpectOk {
        mut rest,
        outcome: parameters,
        ..
    } = expect_parameters(rest)?;
    let mut comment = String::new();
    let mut deterministic = false;
    loop {
        match rest.first().map(|token| &token.value) {
            Some(TokenValue::Const(Keyword::Comment)) => {
                let ExpectOk {
                    rest: rest_after_comment,
                    outcome: found_token,
                    ..
                } = expect_next_token(&rest[1..], &"a comment string")?;
                match &found_token.value {
                    TokenValue::String(value) => comment = value.clone(),
                    _ => {
                        return Err(SyntaxError(format!(
                            "Expected a comment string, instead found {}.",
                            found_token
                        )))
                    }
                }
                rest = rest_after_comment;
            }
            Some(TokenValue::Const(Keyword::Deterministic)) => {
                deterministic = true;
                rest = &rest[1..];
            }
            Some(TokenValue::Const(Keyword::Not)) => {
                let ExpectOk { rest: rest_after, .. } = expect_token_values_sequence(
                    rest,
                    &[
                        TokenValue::Const(Keyword::Not),
                        TokenValue::Const(Keyword::Deterministic),
                    ],
                )?;
                deterministic = false;
                rest = rest_after;
            }
            _ => break,
        }
    }
    let body_start = rest
        .iter()
        .find(|token| token.value != TokenValue::Delimiting(Delimiter::Semicolon))
        .ok_or_else(|| {
            SyntaxError("Expected a procedure body, instead found end of statement.".to_string())
        })?;
    let body = slice_to_end(source, body_start).to_string();
    Ok(ExpectOk {
        rest: &rest[rest.len()..],
        tokens_consumed_count: tokens.len(),
        outcome: CreateProcedureStatement {
            name,
            definer,
            parameters,
            comment,
            deterministic,
            body,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructs::components::DataTypeRaw;
    use pretty_assertions::assert_eq;

    #[test]
    fn parameters_and_characteristics() {
        let source = "CREATE PROCEDURE p(IN a INT, OUT b VARCHAR(10)) COMMENT 'does things' DETERMINISTIC SELECT a";
        let tokens = tokenize_statement(source);
        let statement = expect_create_procedure(&tokens[2..], None, source)
            .unwrap()
            .outcome;
        assert_eq!(
            statement.parameters,
            vec![
                ProcedureParameter {
                    mode: ParameterMode::In,
                    name: "a".to_string(),
                    data_type: DataTypeRaw::Int32,
                },
                ProcedureParameter {
                    mode: ParameterMode::Out,
                    name: "b".to_string(),
                    data_type: DataTypeRaw::VarChar(10),
                },
            ]
        );
        assert_eq!(statement.comment, "does things");
        assert!(statement.deterministic);
        assert_eq!(statement.body, "SELECT a");
    }

    #[test]
    fn empty_parameter_list() {
        let source = "CREATE PROCEDURE p() BEGIN END";
        let tokens = tokenize_statement(source);
        let statement = expect_create_procedure(&tokens[2..], None, source)
            .unwrap()
            .outcome;
        assert!(statement.parameters.is_empty());
        assert_eq!(statement.body, "BEGIN END");
    }
}
