use crate::constructs::statements::{CreateTriggerStatement, TriggerEvent, TriggerOrder, TriggerTiming};
use crate::sql::errors::*;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

use super::slice_to_end;

fn expect_timing<'t>(tokens: &'t [Token]) -> ExpectResult<'t, TriggerTiming> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: found_token,
    } = expect_next_token(tokens, &format!("{} or {}", Keyword::Before, Keyword::After))?;
    let timing = match found_token.value {
        TokenValue::Const(Keyword::Before) => TriggerTiming::Before,
        TokenValue::Const(Keyword::After) => TriggerTiming::After,
        _ => {
            return Err(SyntaxError(format!(
                "Expected {} or {}, instead found {}.",
                Keyword::Before,
                Keyword::After,
                found_token
            )))
        }
    };
    Ok(ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: timing,
    })
}

fn expect_event<'t>(tokens: &'t [Token]) -> ExpectResult<'t, TriggerEvent> {
    let ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: found_token,
    } = expect_next_token(
        tokens,
        &format!("{}, {} or {}", Keyword::Insert, Keyword::Update, Keyword::Delete),
    )?;
    let event = match found_token.value {
        TokenValue::Const(Keyword::Insert) => TriggerEvent::Insert,
        TokenValue::Const(Keyword::Update) => TriggerEvent::Update,
        TokenValue::Const(Keyword::Delete) => TriggerEvent::Delete,
        _ => {
            return Err(SyntaxError(format!(
                "Expected {}, {} or {}, instead found {}.",
                Keyword::Insert,
                Keyword::Update,
                Keyword::Delete,
                found_token
            )))
        }
    };
    Ok(ExpectOk {
        rest,
        tokens_consumed_count,
        outcome: event,
    })
}

fn expect_order<'t>(tokens: &'t [Token]) -> ExpectResult<'t, TriggerOrder> {
    let ExpectOk {
        rest,
        outcome: found_token,
        ..
    } = expect_next_token(tokens, &format!("{} or {}", Keyword::Follows, Keyword::Precedes))?;
    let ExpectOk { rest, outcome: other, .. } = expect_identifier(rest)?;
    let order = match found_token.value {
        TokenValue::Const(Keyword::Follows) => TriggerOrder::Follows(other),
        TokenValue::Const(Keyword::Precedes) => TriggerOrder::Precedes(other),
        _ => {
            return Err(SyntaxError(format!(
                "Expected {} or {}, instead found {}.",
                Keyword::Follows,
                Keyword::Precedes,
                found_token
            )))
        }
    };
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: 2,
        outcome: order,
    })
}

/// Conjure a CreateTriggerStatement from tokens following CREATE [DEFINER = ...] TRIGGER.
/// The body is everything after FOR EACH ROW (and the optional ordering clause), verbatim.
pub fn expect_create_trigger<'t>(
    tokens: &'t [Token],
    definer: Option<String>,
    source: &str,
) -> ExpectResult<'t, CreateTriggerStatement> {
    let ExpectOk { rest, outcome: name, .. } = expect_identifier(tokens)?;
    let ExpectOk { rest, outcome: timing, .. } = expect_timing(rest)?;
    let ExpectOk { rest, outcome: event, .. } = expect_event(rest)?;
    let ExpectOk { rest, .. } = expect_token_value(rest, &TokenValue::Const(Keyword::On))?;
    let ExpectOk { rest, outcome: table, .. } = expect_table_reference(rest)?;
    let ExpectOk { rest, .. } = expect_token_values_sequence(
        rest,
        &[
            TokenValue::Const(Keyword::For),
            TokenValue::Const(Keyword::Each),
            TokenValue::Const(Keyword::Row),
        ],
    )?;
    let ExpectOk { rest, outcome: order, .. } = optionalize(rest, expect_order);
    let body_start = rest
        .iter()
        .find(|token| token.value != TokenValue::Delimiting(Delimiter::Semicolon))
        .ok_or_else(|| {
            SyntaxError("Expected a trigger body, instead found end of statement.".to_string())
        })?;
    let body = slice_to_end(source, body_start).to_string();
    Ok(ExpectOk {
        rest: &rest[rest.len()..],
        tokens_consumed_count: tokens.len(),
        outcome: CreateTriggerStatement {
            name,
            definer,
            timing,
            event,
            table: table.table,
            order,
            body,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn body_is_kept_verbatim() {
        let source = "CREATE TRIGGER trg BEFORE INSERT ON db.t FOR EACH ROW PRECEDES other
            BEGIN SET NEW.a = 1; SET NEW.b = 2; END;";
        let tokens = tokenize_statement(source);
        let statement = expect_create_trigger(&tokens[2..], Some("root@localhost".into()), source)
            .unwrap()
            .outcome;
        assert_eq!(
            statement,
            CreateTriggerStatement {
                name: "trg".to_string(),
                definer: Some("root@localhost".to_string()),
                timing: TriggerTiming::Before,
                event: TriggerEvent::Insert,
                table: "t".to_string(),
                order: Some(TriggerOrder::Precedes("other".to_string())),
                body: "BEGIN SET NEW.a = 1; SET NEW.b = 2; END".to_string(),
            }
        );
    }

    #[test]
    fn missing_body_is_an_error() {
        let source = "CREATE TRIGGER trg AFTER DELETE ON t FOR EACH ROW;";
        let tokens = tokenize_statement(source);
        assert_eq!(
            expect_create_trigger(&tokens[2..], None, source),
            Err(SyntaxError(
                "Expected a trigger body, instead found end of statement.".to_string()
            ))
        );
    }
}
