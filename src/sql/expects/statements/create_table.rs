use crate::constructs::{
    components::{ColumnDefinition, DataType, TableDefinition},
    constraints::{CheckDefinition, ForeignKeyDefinition, IndexDefinition, ReferentialAction},
    statements::CreateTableStatement,
};
use crate::sql::errors::*;
use crate::sql::expects::{generic::*, semantic::*, ExpectOk, ExpectResult};
use crate::sql::tokenizer::*;

use super::find_closing_parenthesis;

#[derive(Debug, PartialEq)]
enum TableElement {
    Column {
        definition: ColumnDefinition,
        unique: bool,
    },
    PrimaryKey(Vec<String>),
    Index(IndexDefinition),
    ForeignKey(ForeignKeyDefinition),
    Check(CheckDefinition),
}

/// Column attributes may come in any order after the type.
pub fn expect_column_definition<'t>(tokens: &'t [Token]) -> ExpectResult<'t, (ColumnDefinition, bool)> {
    let ExpectOk {
        rest, outcome: name, ..
    } = expect_identifier(tokens)?;
    let ExpectOk {
        mut rest,
        outcome: raw_type,
        ..
    } = expect_data_type_raw(rest)?;
    let mut definition = ColumnDefinition::new(&name, DataType::nullable(raw_type));
    let mut explicit_nullability: Option<bool> = None;
    let mut unique = false;
    loop {
        let step = match rest.first().map(|token| &token.value) {
            Some(TokenValue::Const(Keyword::Not)) => {
                let step = expect_token_values_sequence(
                    rest,
                    &[
                        TokenValue::Const(Keyword::Not),
                        TokenValue::Const(Keyword::Null),
                    ],
                )?;
                explicit_nullability = Some(false);
                step.rest
            }
            Some(TokenValue::Const(Keyword::Null)) => {
                explicit_nullability = Some(true);
                &rest[1..]
            }
            Some(TokenValue::Const(Keyword::Default)) => {
                let ExpectOk {
                    rest: rest_after_default,
                    outcome,
                    ..
                } = expect_data_definition(&rest[1..])?;
                definition.default = Some(outcome);
                rest_after_default
            }
            Some(TokenValue::Const(Keyword::AutoIncrement)) => {
                definition.extra = "auto_increment".to_string();
                &rest[1..]
            }
            Some(TokenValue::Const(Keyword::Primary)) => {
                let step = expect_token_values_sequence(
                    rest,
                    &[
                        TokenValue::Const(Keyword::Primary),
                        TokenValue::Const(Keyword::Key),
                    ],
                )?;
                definition.primary_key = true;
                step.rest
            }
            Some(TokenValue::Const(Keyword::Unique)) => {
                unique = true;
                detect(&rest[1..], &[TokenValue::Const(Keyword::Key)]).rest
            }
            Some(TokenValue::Const(Keyword::Comment)) => {
                let ExpectOk {
                    outcome: found_token,
                    ..
                } = expect_next_token(&rest[1..], &"a comment string")?;
                match &found_token.value {
                    TokenValue::String(comment) => definition.comment = comment.clone(),
                    _ => {
                        return Err(SyntaxError(format!(
                            "Expected a comment string, instead found {}.",
                            found_token
                        )))
                    }
                }
                &rest[2..]
            }
            _ => break,
        };
        rest = step;
    }
    if definition.primary_key && explicit_nullability == Some(true) {
        return Err(SyntaxError(format!(
            "Column `{}` cannot be both NULL and PRIMARY KEY.",
            definition.name
        )));
    }
    definition.data_type.is_nullable = !definition.primary_key && explicit_nullability.unwrap_or(true);
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens.len() - rest.len(),
        outcome: (definition, unique),
    })
}

/// `column` or `column(prefix_length)`.
fn expect_index_column<'t>(tokens: &'t [Token]) -> ExpectResult<'t, (String, Option<u16>)> {
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_name,
        outcome: name,
    } = expect_identifier(tokens)?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_prefix,
        outcome: prefix_length,
    } = optionalize(rest, |tokens| {
        expect_enclosed(
            tokens,
            expect_number,
            Delimiter::ParenthesisOpening,
            Delimiter::ParenthesisClosing,
        )
    });
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_name + tokens_consumed_count_prefix,
        outcome: (
            name,
            prefix_length.map(|length| u16::try_from(length).unwrap_or(u16::MAX)),
        ),
    })
}

fn index_from_columns(id: String, unique: bool, columns: Vec<(String, Option<u16>)>) -> IndexDefinition {
    let (names, prefix_lengths): (Vec<String>, Vec<Option<u16>>) = columns.into_iter().unzip();
    IndexDefinition {
        unique: unique || id.eq_ignore_ascii_case(crate::constructs::constraints::PRIMARY_INDEX_ID),
        id,
        columns: names,
        prefix_lengths: if prefix_lengths.iter().any(Option::is_some) {
            prefix_lengths
        } else {
            Vec::new()
        },
        comment: String::new(),
        index_type: "BTREE".to_string(),
    }
}

fn expect_referential_action<'t>(tokens: &'t [Token]) -> ExpectResult<'t, ReferentialAction> {
    let candidates = [
        (vec![TokenValue::Const(Keyword::Restrict)], ReferentialAction::Restrict),
        (vec![TokenValue::Const(Keyword::Cascade)], ReferentialAction::Cascade),
        (
            vec![TokenValue::Const(Keyword::Set), TokenValue::Const(Keyword::Null)],
            ReferentialAction::SetNull,
        ),
        (
            vec![TokenValue::Const(Keyword::Set), TokenValue::Const(Keyword::Default)],
            ReferentialAction::SetDefault,
        ),
        (
            vec![TokenValue::Const(Keyword::No), TokenValue::Const(Keyword::Action)],
            ReferentialAction::NoAction,
        ),
    ];
    for (sequence, action) in candidates {
        if let Ok(ExpectOk {
            rest,
            tokens_consumed_count,
            ..
        }) = expect_token_values_sequence(tokens, &sequence)
        {
            return Ok(ExpectOk {
                rest,
                tokens_consumed_count,
                outcome: action,
            });
        }
    }
    let ExpectOk {
        outcome: found_token,
        ..
    } = expect_next_token(tokens, &"a referential action")?;
    Err(SyntaxError(format!(
        "Expected a referential action, instead found {}.",
        found_token
    )))
}

fn expect_foreign_key<'t>(tokens: &'t [Token], name: String) -> ExpectResult<'t, ForeignKeyDefinition> {
    let ExpectOk { rest, .. } = expect_token_values_sequence(
        tokens,
        &[
            TokenValue::Const(Keyword::Foreign),
            TokenValue::Const(Keyword::Key),
        ],
    )?;
    // An index name may follow FOREIGN KEY, it only matters when CONSTRAINT gave none
    let ExpectOk {
        rest,
        outcome: index_name,
        ..
    } = optionalize(rest, expect_identifier);
    let ExpectOk {
        rest,
        outcome: columns,
        ..
    } = expect_enclosed_comma_separated(rest, expect_identifier)?;
    let ExpectOk { rest, .. } = expect_token_value(rest, &TokenValue::Const(Keyword::References))?;
    let ExpectOk {
        rest,
        outcome: parent,
        ..
    } = expect_table_reference(rest)?;
    let ExpectOk {
        mut rest,
        outcome: parent_columns,
        ..
    } = expect_enclosed_comma_separated(rest, expect_identifier)?;
    let mut on_update = ReferentialAction::Default;
    let mut on_delete = ReferentialAction::Default;
    loop {
        let ExpectOk {
            rest: rest_after_on,
            outcome: has_on,
            ..
        } = detect(rest, &[TokenValue::Const(Keyword::On)]);
        if !has_on {
            break;
        }
        let ExpectOk {
            rest: rest_after_event,
            outcome: event_token,
            ..
        } = expect_next_token(rest_after_on, &format!("{} or {}", Keyword::Update, Keyword::Delete))?;
        let ExpectOk {
            rest: rest_after_action,
            outcome: action,
            ..
        } = expect_referential_action(rest_after_event)?;
        match event_token.value {
            TokenValue::Const(Keyword::Update) => on_update = action,
            TokenValue::Const(Keyword::Delete) => on_delete = action,
            _ => {
                return Err(SyntaxError(format!(
                    "Expected {} or {}, instead found {}.",
                    Keyword::Update,
                    Keyword::Delete,
                    event_token
                )))
            }
        }
        rest = rest_after_action;
    }
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens.len() - rest.len(),
        outcome: ForeignKeyDefinition {
            name: if name.is_empty() {
                index_name.unwrap_or_default()
            } else {
                name
            },
            columns,
            parent_database: parent.database.unwrap_or_default(),
            parent_table: parent.table,
            parent_columns,
            on_update,
            on_delete,
        },
    })
}

fn expect_check<'t>(tokens: &'t [Token], name: String, source: &str) -> ExpectResult<'t, CheckDefinition> {
    let ExpectOk { rest, .. } = expect_token_value(tokens, &TokenValue::Const(Keyword::Check))?;
    expect_token_value(rest, &TokenValue::Delimiting(Delimiter::ParenthesisOpening))?;
    let closing_index = find_closing_parenthesis(rest).ok_or_else(|| {
        SyntaxError(format!(
            "Expected {} closing the CHECK expression, instead found end of statement.",
            Delimiter::ParenthesisClosing
        ))
    })?;
    let expression = source[rest[0].offset + 1..rest[closing_index].offset]
        .trim()
        .to_string();
    let rest = &rest[closing_index + 1..];
    let ExpectOk {
        rest,
        outcome: not_enforced,
        ..
    } = detect(
        rest,
        &[
            TokenValue::Const(Keyword::Not),
            TokenValue::Const(Keyword::Enforced),
        ],
    );
    let ExpectOk { rest, .. } = detect(rest, &[TokenValue::Const(Keyword::Enforced)]);
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens.len() - rest.len(),
        outcome: CheckDefinition {
            name,
            expression,
            enforced: !not_enforced,
        },
    })
}

fn expect_table_element<'t>(tokens: &'t [Token], source: &str) -> ExpectResult<'t, TableElement> {
    let ExpectOk {
        rest,
        outcome: constraint_name,
        ..
    } = optionalize(tokens, |tokens| {
        let ExpectOk { rest, .. } = expect_token_value(tokens, &TokenValue::Const(Keyword::Constraint))?;
        let ExpectOk { rest, outcome, .. } = expect_identifier(rest)?;
        Ok(ExpectOk {
            rest,
            tokens_consumed_count: 2,
            outcome,
        })
    });
    let (rest, element) = match rest.first().map(|token| &token.value) {
        Some(TokenValue::Const(Keyword::Primary)) => {
            let ExpectOk { rest, .. } = expect_token_values_sequence(
                rest,
                &[
                    TokenValue::Const(Keyword::Primary),
                    TokenValue::Const(Keyword::Key),
                ],
            )?;
            let ExpectOk { rest, outcome, .. } =
                expect_enclosed_comma_separated(rest, expect_index_column)?;
            (
                rest,
                TableElement::PrimaryKey(outcome.into_iter().map(|(name, _)| name).collect()),
            )
        }
        Some(TokenValue::Const(Keyword::Unique)) => {
            let rest = &rest[1..];
            let rest = match rest.first().map(|token| &token.value) {
                Some(TokenValue::Const(Keyword::Key | Keyword::Index)) => &rest[1..],
                _ => rest,
            };
            let ExpectOk {
                rest,
                outcome: index_name,
                ..
            } = optionalize(rest, expect_identifier);
            let ExpectOk {
                rest,
                outcome: columns,
                ..
            } = expect_enclosed_comma_separated(rest, expect_index_column)?;
            let id = index_name
                .or_else(|| constraint_name.clone())
                .unwrap_or_default();
            (rest, TableElement::Index(index_from_columns(id, true, columns)))
        }
        Some(TokenValue::Const(Keyword::Key | Keyword::Index)) => {
            let ExpectOk {
                rest,
                outcome: index_name,
                ..
            } = optionalize(&rest[1..], expect_identifier);
            let ExpectOk {
                rest,
                outcome: columns,
                ..
            } = expect_enclosed_comma_separated(rest, expect_index_column)?;
            (
                rest,
                TableElement::Index(index_from_columns(
                    index_name.unwrap_or_default(),
                    false,
                    columns,
                )),
            )
        }
        Some(TokenValue::Const(Keyword::Foreign)) => {
            let ExpectOk { rest, outcome, .. } =
                expect_foreign_key(rest, constraint_name.clone().unwrap_or_default())?;
            (rest, TableElement::ForeignKey(outcome))
        }
        Some(TokenValue::Const(Keyword::Check)) => {
            let ExpectOk { rest, outcome, .. } =
                expect_check(rest, constraint_name.clone().unwrap_or_default(), source)?;
            (rest, TableElement::Check(outcome))
        }
        _ if constraint_name.is_some() => {
            let ExpectOk {
                outcome: found_token,
                ..
            } = expect_next_token(rest, &"a constraint")?;
            return Err(SyntaxError(format!(
                "Expected a constraint, instead found {}.",
                found_token
            )));
        }
        _ => {
            let ExpectOk {
                rest,
                outcome: (definition, unique),
                ..
            } = expect_column_definition(rest)?;
            (rest, TableElement::Column { definition, unique })
        }
    };
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens.len() - rest.len(),
        outcome: element,
    })
}

/// Fold parsed elements into the table definition and its constraints, naming unnamed ones the MySQL way.
fn assemble(name: String, if_not_exists: bool, elements: Vec<TableElement>) -> CreateTableStatement {
    let mut columns = Vec::new();
    let mut primary_key_columns: Vec<String> = Vec::new();
    let mut indexes: Vec<IndexDefinition> = Vec::new();
    let mut foreign_keys: Vec<ForeignKeyDefinition> = Vec::new();
    let mut checks: Vec<CheckDefinition> = Vec::new();
    for element in elements {
        match element {
            TableElement::Column { definition, unique } => {
                if definition.primary_key {
                    primary_key_columns.push(definition.name.clone());
                }
                if unique {
                    indexes.push(IndexDefinition::new(&definition.name, true, &[&definition.name]));
                }
                columns.push(definition);
            }
            TableElement::PrimaryKey(key_columns) => primary_key_columns.extend(key_columns),
            TableElement::Index(mut index) => {
                if index.id.is_empty() {
                    index.id = index.columns.first().cloned().unwrap_or_default();
                }
                indexes.push(index);
            }
            TableElement::ForeignKey(mut foreign_key) => {
                if foreign_key.name.is_empty() {
                    foreign_key.name = format!("{}_ibfk_{}", name, foreign_keys.len() + 1);
                }
                foreign_keys.push(foreign_key);
            }
            TableElement::Check(mut check) => {
                if check.name.is_empty() {
                    check.name = format!("{}_chk_{}", name, checks.len() + 1);
                }
                checks.push(check);
            }
        }
    }
    for column in columns.iter_mut() {
        if primary_key_columns
            .iter()
            .any(|key_column| key_column.eq_ignore_ascii_case(&column.name))
        {
            column.primary_key = true;
            column.data_type.is_nullable = false;
        }
    }
    if !primary_key_columns.is_empty() {
        let key_columns: Vec<&str> = primary_key_columns.iter().map(String::as_str).collect();
        indexes.insert(0, IndexDefinition::primary(&key_columns));
    }
    CreateTableStatement {
        table: TableDefinition::new(name, columns),
        if_not_exists,
        indexes,
        foreign_keys,
        checks,
    }
}

/// Conjure a CreateTableStatement from tokens following CREATE TABLE.
pub fn expect_create_table<'t>(tokens: &'t [Token], source: &str) -> ExpectResult<'t, CreateTableStatement> {
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_if_not_exists,
        outcome: if_not_exists,
    } = detect(
        tokens,
        &[
            TokenValue::Const(Keyword::If),
            TokenValue::Const(Keyword::Not),
            TokenValue::Const(Keyword::Exists),
        ],
    );
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_name,
        outcome: name,
    } = expect_identifier(rest)?;
    let ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_elements,
        outcome: elements,
    } = expect_enclosed_comma_separated(rest, |tokens| expect_table_element(tokens, source))?;
    Ok(ExpectOk {
        rest,
        tokens_consumed_count: tokens_consumed_count_if_not_exists
            + tokens_consumed_count_name
            + tokens_consumed_count_elements,
        outcome: assemble(name, if_not_exists, elements),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructs::components::{DataDefinition, DataInstance, DataTypeRaw};
    use crate::constructs::functions::Function;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> CreateTableStatement {
        let tokens = tokenize_statement(source);
        // Skip CREATE TABLE
        expect_create_table(&tokens[2..], source).unwrap().outcome
    }

    #[test]
    fn column_attributes_in_any_order() {
        let statement = parse(
            "CREATE TABLE t (
                id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP COMMENT 'creation time',
                email VARCHAR(100) UNIQUE,
                score INT DEFAULT 0 NULL
            )",
        );
        let columns = &statement.table.columns;
        assert_eq!(columns.len(), 4);
        assert!(columns[0].primary_key);
        assert!(!columns[0].data_type.is_nullable);
        assert_eq!(columns[0].extra, "auto_increment");
        assert_eq!(columns[0].data_type.raw_type, DataTypeRaw::UInt64);
        assert_eq!(
            columns[1].default,
            Some(DataDefinition::FunctionCall(Function::Now))
        );
        assert_eq!(columns[1].comment, "creation time");
        assert!(!columns[1].data_type.is_nullable);
        assert!(columns[2].data_type.is_nullable);
        assert_eq!(
            columns[3].default,
            Some(DataDefinition::Const(DataInstance::from(0u64)))
        );
        assert_eq!(
            statement.indexes,
            vec![
                IndexDefinition::primary(&["id"]),
                IndexDefinition::new("email", true, &["email"]),
            ]
        );
    }

    #[test]
    fn table_level_constraints() {
        let statement = parse(
            "CREATE TABLE child (
                id INT NOT NULL,
                parent_a INT,
                parent_b INT,
                label VARCHAR(64),
                PRIMARY KEY (id),
                UNIQUE KEY uq_label (label(10)),
                KEY idx_parents (parent_a, parent_b),
                CONSTRAINT fk_parent FOREIGN KEY (parent_a, parent_b) REFERENCES parent (a, b) ON DELETE CASCADE,
                FOREIGN KEY (parent_a) REFERENCES other.p (x),
                CHECK (parent_a > 0) NOT ENFORCED
            )",
        );
        assert!(statement.table.columns[0].primary_key);
        assert_eq!(statement.indexes.len(), 3);
        assert_eq!(statement.indexes[1].id, "uq_label");
        assert_eq!(statement.indexes[1].prefix_lengths, vec![Some(10)]);
        assert!(!statement.indexes[2].unique);
        assert_eq!(
            statement.foreign_keys[0],
            ForeignKeyDefinition {
                name: "fk_parent".to_string(),
                columns: vec!["parent_a".to_string(), "parent_b".to_string()],
                parent_database: String::new(),
                parent_table: "parent".to_string(),
                parent_columns: vec!["a".to_string(), "b".to_string()],
                on_update: ReferentialAction::Default,
                on_delete: ReferentialAction::Cascade,
            }
        );
        assert_eq!(statement.foreign_keys[1].name, "child_ibfk_2");
        assert_eq!(statement.foreign_keys[1].parent_database, "other");
        assert_eq!(
            statement.checks,
            vec![CheckDefinition {
                name: "child_chk_1".to_string(),
                expression: "parent_a > 0".to_string(),
                enforced: false,
            }]
        );
    }

    #[test]
    fn null_primary_key_is_rejected() {
        let source = "CREATE TABLE t (id INT NULL PRIMARY KEY)";
        let tokens = tokenize_statement(source);
        assert_eq!(
            expect_create_table(&tokens[2..], source),
            Err(SyntaxError(
                "Column `id` cannot be both NULL and PRIMARY KEY.".to_string()
            ))
        );
    }
}
