use std::str::FromStr;

use crate::constructs::components::{DataDefinition, DataInstance, DataInstanceRaw, DataTypeRaw};
use crate::constructs::functions::Function;
use crate::constructs::statements::{ColumnValue, TableReference};
use crate::sql::errors::*;
use crate::sql::expects::{generic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

pub fn expect_identifier<'t>(tokens: &'t [Token]) -> ExpectResult<'t, String> {
    let ExpectOk {
        outcome: found_token,
        ..
    } = expect_next_token(tokens, &"an identifier")?;
    match found_token {
        Token {
            value: TokenValue::Arbitrary(value),
            ..
        } => Ok(ExpectOk {
            rest: &tokens[1..],
            tokens_consumed_count: 1,
            outcome: value.to_owned(),
        }),
        wrong_token => Err(SyntaxError(format!(
            "Expected an identifier, instead found {}.",
            wrong_token
        ))),
    }
}

/// `name` or `database.name`.
pub fn expect_table_reference<'t>(tokens: &'t [Token]) -> ExpectResult<'t, TableReference> {
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_first,
        outcome: first,
    } = expect_identifier(tokens)?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_second,
        outcome: second,
    } = optionalize(rest, |tokens| {
        let ExpectOk { rest, .. } =
            expect_token_value(tokens, &TokenValue::Delimiting(Delimiter::Period))?;
        let ExpectOk { rest, outcome, .. } = expect_identifier(rest)?;
        Ok(ExpectOk {
            rest,
            tokens_consumed_count: 2,
            outcome,
        })
    });
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_first + tokens_consumed_count_second,
        outcome: match second {
            Some(table) => TableReference {
                database: Some(first),
                table,
            },
            None => TableReference {
                database: None,
                table: first,
            },
        },
    })
}

pub fn expect_number<'t>(tokens: &'t [Token]) -> ExpectResult<'t, u32> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: found_token,
    } = expect_next_token(tokens, &"a number")?;
    match found_token {
        Token {
            value: TokenValue::Arbitrary(candidate),
            ..
        } if candidate.parse::<u32>().is_ok() => Ok(ExpectOk {
            rest,
            tokens_consumed_count,
            outcome: candidate.parse::<u32>().unwrap_or_default(),
        }),
        wrong_token => Err(SyntaxError(format!(
            "Expected a number, instead found {}.",
            wrong_token
        ))),
    }
}

/// A type name with optional parameters and `UNSIGNED`, e.g. `decimal(10,2)` or `int unsigned`.
pub fn expect_data_type_raw<'t>(tokens: &'t [Token]) -> ExpectResult<'t, DataTypeRaw> {
    let ExpectOk {
        outcome: found_token,
        ..
    } = expect_next_token(tokens, &"a data type")?;
    let base_type = match found_token {
        Token {
            value: TokenValue::Arbitrary(candidate),
            ..
        } => DataTypeRaw::from_str(candidate).map_err(|_| {
            SyntaxError(format!(
                "Expected a data type, instead found {}.",
                found_token
            ))
        })?,
        wrong_token => {
            return Err(SyntaxError(format!(
                "Expected a data type, instead found {}.",
                wrong_token
            )))
        }
    };
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_parameters,
        outcome: parameters,
    } = optionalize(&tokens[1..], |tokens| {
        expect_enclosed_comma_separated(tokens, expect_number)
    });
    let mut data_type = base_type
        .with_parameters(&parameters.unwrap_or_default())
        .map_err(|message| SyntaxError(format!("{} at line {}.", message, found_token.line_number)))?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_unsigned,
        outcome: is_unsigned,
    } = detect(rest, &[TokenValue::Const(Keyword::Unsigned)]);
    if is_unsigned {
        data_type = data_type.with_unsigned().map_err(|message| {
            SyntaxError(format!("{} at line {}.", message, found_token.line_number))
        })?;
    }
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 1 + tokens_consumed_count_parameters + tokens_consumed_count_unsigned,
        outcome: data_type,
    })
}

fn parse_number(candidate: &str) -> Option<DataInstanceRaw> {
    if let Ok(number) = candidate.parse::<u64>() {
        Some(DataInstanceRaw::UInt64(number))
    } else if let Ok(number) = candidate.parse::<i64>() {
        Some(DataInstanceRaw::Int64(number))
    } else if candidate.contains(|character: char| character.is_ascii_digit()) {
        candidate.parse::<f64>().ok().map(DataInstanceRaw::Float64)
    } else {
        None
    }
}

pub fn expect_data_instance<'t>(tokens: &'t [Token]) -> ExpectResult<'t, DataInstance> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: found_token,
    } = expect_next_token(tokens, &"a value")?;
    let outcome = match found_token {
        Token {
            value: TokenValue::String(found_string),
            ..
        } => DataInstance::Direct(DataInstanceRaw::String(found_string.to_string())),
        Token {
            value: TokenValue::Const(Keyword::Null),
            ..
        } => DataInstance::Null,
        Token {
            value: TokenValue::Arbitrary(candidate),
            ..
        } if candidate.eq_ignore_ascii_case("true") || candidate.eq_ignore_ascii_case("false") => {
            DataInstance::Direct(DataInstanceRaw::Bool(candidate.eq_ignore_ascii_case("true")))
        }
        Token {
            value: TokenValue::Arbitrary(candidate),
            ..
        } => match parse_number(candidate) {
            Some(number) => DataInstance::Direct(number),
            None => {
                return Err(SyntaxError(format!(
                    "Expected a value, instead found {}.",
                    found_token
                )))
            }
        },
        wrong_token => {
            return Err(SyntaxError(format!(
                "Expected a value, instead found {}.",
                wrong_token
            )))
        }
    };
    Ok(ExpectOk {
        rest,
        tokens_consumed_count,
        outcome,
    })
}

/// A column default: a literal, or a supported function with optional empty parentheses.
pub fn expect_data_definition<'t>(tokens: &'t [Token]) -> ExpectResult<'t, DataDefinition> {
    if let Some(Token {
        value: TokenValue::Arbitrary(candidate),
        ..
    }) = tokens.first()
    {
        if let Ok(function) = Function::from_str(candidate) {
            let ExpectOk {
                rest,
                tokens_consumed_count,
                ..
            } = detect(
                &tokens[1..],
                &[
                    TokenValue::Delimiting(Delimiter::ParenthesisOpening),
                    TokenValue::Delimiting(Delimiter::ParenthesisClosing),
                ],
            );
            return Ok(ExpectOk {
                rest,
                tokens_consumed_count: 1 + tokens_consumed_count,
                outcome: DataDefinition::FunctionCall(function),
            });
        }
    }
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome,
    } = expect_data_instance(tokens)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: DataDefinition::Const(outcome),
    })
}

/// `column = value`.
pub fn expect_column_value<'t>(tokens: &'t [Token]) -> ExpectResult<'t, ColumnValue> {
    let ExpectOk { rest, outcome: column, .. } = expect_identifier(tokens)?;
    let ExpectOk { rest, .. } = expect_token_value(rest, &TokenValue::Delimiting(Delimiter::Equals))?;
    let ExpectOk { rest, outcome: value, .. } = expect_data_instance(rest)?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 3,
        outcome: ColumnValue { column, value },
    })
}

/// Optional `WHERE column = value [AND column = value ...]`.
pub fn expect_conditions<'t>(tokens: &'t [Token]) -> ExpectResult<'t, Vec<ColumnValue>> {
    let ExpectOk {
        rest,
        outcome: has_where,
        ..
    } = detect(tokens, &[TokenValue::Const(Keyword::Where)]);
    if !has_where {
        return Ok(ExpectOk {
            rest: tokens,
            tokens_consumed_count: 0,
            outcome: Vec::new(),
        });
    }
    let mut conditions = Vec::new();
    let mut rest = rest;
    let mut tokens_consumed_total_count = 1;
    loop {
        let ExpectOk {
            rest: rest_after_condition,
            tokens_consumed_count,
            outcome,
        } = expect_column_value(rest)?;
        conditions.push(outcome);
        tokens_consumed_total_count += tokens_consumed_count;
        let ExpectOk {
            rest: rest_after_and,
            outcome: has_and,
            ..
        } = detect(rest_after_condition, &[TokenValue::Const(Keyword::And)]);
        if !has_and {
            rest = rest_after_condition;
            break;
        }
        tokens_consumed_total_count += 1;
        rest = rest_after_and;
    }
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_total_count,
        outcome: conditions,
    })
}

fn expect_account_part<'t>(tokens: &'t [Token]) -> ExpectResult<'t, String> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: found_token,
    } = expect_next_token(tokens, &"an account name")?;
    match &found_token.value {
        TokenValue::String(value) | TokenValue::Arbitrary(value) => Ok(ExpectOk {
            rest,
            tokens_consumed_count,
            outcome: value.to_owned(),
        }),
        _ => Err(SyntaxError(format!(
            "Expected an account name, instead found {}.",
            found_token
        ))),
    }
}

/// `DEFINER = user[@host]`, rendered as `user@host`.
pub fn expect_definer<'t>(tokens: &'t [Token]) -> ExpectResult<'t, String> {
    let ExpectOk { rest, .. } = expect_token_values_sequence(
        tokens,
        &[
            TokenValue::Const(Keyword::Definer),
            TokenValue::Delimiting(Delimiter::Equals),
        ],
    )?;
    let ExpectOk { rest, outcome: user, .. } = expect_account_part(rest)?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_host,
        outcome: host,
    } = optionalize(rest, |tokens| {
        let ExpectOk { rest, .. } = expect_token_value(tokens, &TokenValue::Delimiting(Delimiter::At))?;
        let ExpectOk { rest, outcome, .. } = expect_account_part(rest)?;
        Ok(ExpectOk {
            rest,
            tokens_consumed_count: 2,
            outcome,
        })
    });
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 3 + tokens_consumed_count_host,
        outcome: match host {
            Some(host) => format!("{}@{}", user, host),
            None => user,
        },
    })
}

#[cfg(test)]
mod expect_identifier_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn returns_ok() {
        assert_eq!(
            expect_identifier(&[token(TokenValue::Arbitrary("foo".to_string()))]),
            Ok(ExpectOk {
                rest: &[][..],
                tokens_consumed_count: 1,
                outcome: "foo".to_string()
            })
        )
    }

    #[test]
    fn returns_error_if_const_token() {
        assert_eq!(
            expect_identifier(&[token(TokenValue::Const(Keyword::Create))]),
            Err(SyntaxError(
                "Expected an identifier, instead found keyword `CREATE` at line 1.".to_string()
            ))
        )
    }

    #[test]
    fn returns_error_if_eos() {
        assert_eq!(
            expect_identifier(&[]),
            Err(SyntaxError(
                "Expected an identifier, instead found end of statement.".to_string()
            ))
        )
    }
}

#[cfg(test)]
mod expect_data_type_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn returns_ok_with_parameters() {
        let tokens = tokenize_statement("decimal(10, 2) NOT NULL");
        let ExpectOk {
            rest,
            tokens_consumed_count,
            outcome,
        } = expect_data_type_raw(&tokens).unwrap();
        assert_eq!(
            outcome,
            DataTypeRaw::Decimal {
                precision: 10,
                scale: 2
            }
        );
        assert_eq!(tokens_consumed_count, 6);
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn returns_ok_unsigned() {
        let tokens = tokenize_statement("BIGINT UNSIGNED");
        assert_eq!(
            expect_data_type_raw(&tokens).unwrap().outcome,
            DataTypeRaw::UInt64
        );
    }

    #[test]
    fn returns_error_if_no_type() {
        assert_eq!(
            expect_data_type_raw(&[token(TokenValue::Arbitrary("foo".to_string()))]),
            Err(SyntaxError(
                "Expected a data type, instead found arbitrary `foo` at line 1.".to_string()
            ))
        )
    }

    #[test]
    fn returns_error_if_eos() {
        assert_eq!(
            expect_data_type_raw(&[]),
            Err(SyntaxError(
                "Expected a data type, instead found end of statement.".to_string()
            ))
        )
    }
}


#[cfg(test)]
mod expect_definer_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_user_and_host() {
        let tokens = tokenize_statement("DEFINER = 'root'@'localhost' TRIGGER");
        let ExpectOk { rest, outcome, .. } = expect_definer(&tokens).unwrap();
        assert_eq!(outcome, "root@localhost");
        assert_eq!(rest.len(), 1);
    }
}
