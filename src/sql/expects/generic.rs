use crate::sql::errors::*;
use crate::sql::expects::{ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

pub fn expect_token_value<'t>(
    tokens: &'t [Token],
    expected_token_value: &TokenValue,
) -> ExpectResult<'t, ()> {
    let ExpectOk {
        outcome: found_token,
        ..
    } = expect_next_token(tokens, expected_token_value)?;
    if &found_token.value == expected_token_value {
        Ok(ExpectOk {
            rest: &tokens[1..],
            tokens_consumed_count: 1,
            outcome: (),
        })
    } else {
        Err(SyntaxError(format!(
            "Expected {}, instead found {}.",
            expected_token_value, found_token
        )))
    }
}

pub fn expect_token_values_sequence<'t>(
    tokens: &'t [Token],
    expected_token_values: &[TokenValue],
) -> ExpectResult<'t, ()> {
    for (token_index, expected_token_value) in expected_token_values.iter().enumerate() {
        expect_token_value(&tokens[token_index.min(tokens.len())..], expected_token_value)?;
    }
    let tokens_consumed_count = expected_token_values.len();
    Ok(ExpectOk {
        rest: &tokens[tokens_consumed_count..],
        tokens_consumed_count,
        outcome: (),
    })
}

/// Accepts the end of input, optionally preceded by statement separators.
pub fn expect_end_of_statement<'t>(tokens: &'t [Token]) -> ExpectResult<'t, ()> {
    let separators_count = tokens
        .iter()
        .take_while(|token| token.value == TokenValue::Delimiting(Delimiter::Semicolon))
        .count();
    match tokens.get(separators_count) {
        None => Ok(ExpectOk {
            rest: &tokens[separators_count..],
            tokens_consumed_count: separators_count,
            outcome: (),
        }),
        Some(wrong_token) => Err(SyntaxError(format!(
            "Expected end of statement, instead found {}.",
            wrong_token
        ))),
    }
}

pub fn expect_next_token<'t>(
    tokens: &'t [Token],
    expectation_description: &dyn std::fmt::Display,
) -> ExpectResult<'t, &'t Token> {
    match tokens.first() {
        Some(found_token) => Ok(ExpectOk {
            rest: &tokens[1..],
            tokens_consumed_count: 1,
            outcome: found_token,
        }),
        None => Err(SyntaxError(format!(
            "Expected {}, instead found end of statement.",
            expectation_description
        ))),
    }
}

pub fn expect_enclosed<'t, O>(
    tokens: &'t [Token],
    expect_inside: impl Fn(&'t [Token]) -> ExpectResult<'t, O>,
    opener: Delimiter,
    closer: Delimiter,
) -> ExpectResult<'t, O> {
    let ExpectOk { rest, .. } = expect_token_value(tokens, &TokenValue::Delimiting(opener))?;
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome,
    } = expect_inside(rest)?;
    let ExpectOk { rest, .. } = expect_token_value(rest, &TokenValue::Delimiting(closer))?;
    let tokens_consumed_count = tokens_consumed_count + 2; // Account for parentheses
    Ok(ExpectOk {
        rest,
        tokens_consumed_count,
        outcome,
    })
}

pub fn expect_comma_separated<'t, O>(
    tokens: &'t [Token],
    expect_element: impl Fn(&'t [Token]) -> ExpectResult<'t, O>,
) -> ExpectResult<'t, Vec<O>> {
    let mut tokens_consumed_total_count = 0;
    let mut outcomes = Vec::<O>::new();
    loop {
        // Parse next element
        let ExpectOk {
            tokens_consumed_count,
            outcome,
            ..
        } = expect_element(&tokens[tokens_consumed_total_count..])?;
        tokens_consumed_total_count += tokens_consumed_count;
        outcomes.push(outcome);
        // Check for the comma (trailing comma disallowed)
        match expect_token_value(
            &tokens[tokens_consumed_total_count..],
            &TokenValue::Delimiting(Delimiter::Comma),
        ) {
            Err(_) => break, // If there's no comma after this element, it's time to break out of the loop
            _ => {
                tokens_consumed_total_count += 1;
            }
        }
    }
    Ok(ExpectOk {
        rest: &tokens[tokens_consumed_total_count..],
        tokens_consumed_count: tokens_consumed_total_count,
        outcome: outcomes,
    })
}

pub fn expect_enclosed_comma_separated<'t, O>(
    tokens: &'t [Token],
    expect_element: impl Fn(&'t [Token]) -> ExpectResult<'t, O>,
) -> ExpectResult<'t, Vec<O>> {
    expect_enclosed(
        tokens,
        |tokens| expect_comma_separated(tokens, &expect_element),
        Delimiter::ParenthesisOpening,
        Delimiter::ParenthesisClosing,
    )
}

/// Turn a failed expectation into `None`, consuming nothing.
pub fn optionalize<'t, O>(
    tokens: &'t [Token],
    expect_something: impl Fn(&'t [Token]) -> ExpectResult<'t, O>,
) -> ExpectOk<'t, Option<O>> {
    match expect_something(tokens) {
        Ok(ExpectOk {
            rest,
            tokens_consumed_count,
            outcome,
        }) => ExpectOk {
            rest,
            tokens_consumed_count,
            outcome: Some(outcome),
        },
        Err(_) => ExpectOk {
            rest: tokens,
            tokens_consumed_count: 0,
            outcome: None,
        },
    }
}

/// Whether the tokens start with the given sequence. Consumes it if so.
pub fn detect<'t>(tokens: &'t [Token], expected_token_values: &[TokenValue]) -> ExpectOk<'t, bool> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome,
    } = optionalize(tokens, |tokens| {
        expect_token_values_sequence(tokens, expected_token_values)
    });
    ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: outcome.is_some(),
    }
}

/// Run an expectation that must span the rest of the statement.
pub fn consume_all<'t, O>(
    tokens: &'t [Token],
    expect_something: impl Fn(&'t [Token]) -> ExpectResult<'t, O>,
) -> Result<O, SyntaxError> {
    let ExpectOk { rest, outcome, .. } = expect_something(tokens)?;
    expect_end_of_statement(rest)?;
    Ok(outcome)
}

#[cfg(test)]
pub(crate) fn token(value: TokenValue) -> Token {
    Token {
        value,
        line_number: 1,
        offset: 0,
    }
}



#[cfg(test)]
mod expect_end_of_statement_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_trailing_separators() {
        let tokens = [
            token(TokenValue::Delimiting(Delimiter::Semicolon)),
            token(TokenValue::Delimiting(Delimiter::Semicolon)),
        ];
        assert_eq!(
            expect_end_of_statement(&tokens),
            Ok(ExpectOk {
                rest: &[][..],
                tokens_consumed_count: 2,
                outcome: ()
            })
        )
    }

    #[test]
    fn rejects_content_after_separator() {
        let tokens = [
            token(TokenValue::Delimiting(Delimiter::Semicolon)),
            token(TokenValue::Arbitrary("x".to_string())),
        ];
        assert_eq!(
            expect_end_of_statement(&tokens),
            Err(SyntaxError(
                "Expected end of statement, instead found arbitrary `x` at line 1.".to_string()
            ))
        )
    }
}
