use std::fmt::{self, Debug};
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Delimiter {
    Comma,
    Period,
    Semicolon,
    Equals,
    Asterisk,
    At,
    ParenthesisOpening,
    ParenthesisClosing,
}

impl Delimiter {
    /// Delimiting characters that affect statement meaning. Each one is a Delimiter variant.
    const MEANINGFUL_CHARS: &'static [char] = &[',', '.', ';', '=', '*', '@', '(', ')'];
    const STRING_MARKERS: &'static [char] = &['\'', '"'];
    const IDENTIFIER_MARKER: char = '`';
    const ESCAPE_CHARACTER: char = '\\';
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Comma => "comma `,`",
                Self::Period => "period `.`",
                Self::Semicolon => "semicolon `;`",
                Self::Equals => "equals sign `=`",
                Self::Asterisk => "asterisk `*`",
                Self::At => "at sign `@`",
                Self::ParenthesisOpening => "opening parenthesis `(`",
                Self::ParenthesisClosing => "closing parenthesis `)`",
            }
        )
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(candidate: &str) -> std::result::Result<Self, Self::Err> {
        match candidate {
            "," => Ok(Self::Comma),
            "." => Ok(Self::Period),
            ";" => Ok(Self::Semicolon),
            "=" => Ok(Self::Equals),
            "*" => Ok(Self::Asterisk),
            "@" => Ok(Self::At),
            "(" => Ok(Self::ParenthesisOpening),
            ")" => Ok(Self::ParenthesisClosing),
            _ => Err(format!(
                "`{}` does not refer to a meaningful delimiter",
                candidate
            )),
        }
    }
}

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy)]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),*
                }
            }
        }

        impl FromStr for Keyword {
            type Err = String;

            fn from_str(candidate: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if candidate.eq_ignore_ascii_case($text) {
                        return Ok(Keyword::$variant);
                    }
                )*
                Err(format!("`{}` does not refer to a const token", candidate))
            }
        }
    };
}

keywords! {
    Action => "ACTION",
    After => "AFTER",
    Algorithm => "ALGORITHM",
    Analyze => "ANALYZE",
    And => "AND",
    As => "AS",
    AutoIncrement => "AUTO_INCREMENT",
    Before => "BEFORE",
    Cascade => "CASCADE",
    Cascaded => "CASCADED",
    Check => "CHECK",
    Comment => "COMMENT",
    Constraint => "CONSTRAINT",
    Create => "CREATE",
    Default => "DEFAULT",
    Definer => "DEFINER",
    Delete => "DELETE",
    Deterministic => "DETERMINISTIC",
    Drop => "DROP",
    Each => "EACH",
    Enforced => "ENFORCED",
    Exists => "EXISTS",
    Follows => "FOLLOWS",
    For => "FOR",
    Foreign => "FOREIGN",
    From => "FROM",
    If => "IF",
    In => "IN",
    Index => "INDEX",
    Inout => "INOUT",
    Insert => "INSERT",
    Into => "INTO",
    Invoker => "INVOKER",
    Key => "KEY",
    Local => "LOCAL",
    No => "NO",
    Not => "NOT",
    Null => "NULL",
    On => "ON",
    Option => "OPTION",
    Or => "OR",
    Out => "OUT",
    Precedes => "PRECEDES",
    Primary => "PRIMARY",
    Procedure => "PROCEDURE",
    References => "REFERENCES",
    Replace => "REPLACE",
    Restrict => "RESTRICT",
    Row => "ROW",
    Security => "SECURITY",
    Select => "SELECT",
    Set => "SET",
    Sql => "SQL",
    Table => "TABLE",
    Trigger => "TRIGGER",
    Unique => "UNIQUE",
    Unsigned => "UNSIGNED",
    Update => "UPDATE",
    Using => "USING",
    Values => "VALUES",
    View => "VIEW",
    Where => "WHERE",
    With => "WITH",
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keyword `{}`", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenValue {
    Delimiting(Delimiter),
    Const(Keyword),
    String(String),
    /// Bare word (identifier, number, function name) or backtick-quoted identifier.
    Arbitrary(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delimiting(value) => fmt::Display::fmt(&value, f),
            Self::Const(value) => fmt::Display::fmt(&value, f),
            Self::String(value) => write!(f, "string `\"{}\"`", value),
            Self::Arbitrary(value) => write!(f, "arbitrary `{}`", value),
        }
    }
}

impl FromStr for TokenValue {
    type Err = ();

    fn from_str(candidate: &str) -> std::result::Result<Self, Self::Err> {
        if let Ok(delimiter) = Delimiter::from_str(candidate) {
            Ok(Self::Delimiting(delimiter))
        } else if let Ok(keyword) = Keyword::from_str(candidate) {
            Ok(Self::Const(keyword))
        } else {
            Ok(Self::Arbitrary(candidate.to_string()))
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub value: TokenValue,
    pub line_number: usize,
    /// Byte offset of the token's first character in the statement text.
    pub offset: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.value, self.line_number)
    }
}

/// Word being accumulated, with the position where it started.
struct Candidate {
    text: String,
    line_number: usize,
    offset: usize,
}

impl Candidate {
    fn is_integer(&self) -> bool {
        let digits = self.text.strip_prefix('-').unwrap_or(&self.text);
        !digits.is_empty() && digits.chars().all(|character| character.is_ascii_digit())
    }
}

fn flush(current: &mut Option<Candidate>, tokens: &mut Vec<Token>) {
    if let Some(candidate) = current.take() {
        tokens.push(Token {
            // TokenValue::from_str is infallible
            value: TokenValue::from_str(&candidate.text)
                .unwrap_or(TokenValue::Arbitrary(candidate.text)),
            line_number: candidate.line_number,
            offset: candidate.offset,
        });
    }
}

pub fn tokenize_statement(input: &str) -> Vec<Token> {
    let mut tokens = Vec::<Token>::new();
    let mut current: Option<Candidate> = None;
    let mut line_number = 1;
    let mut characters = input.char_indices().peekable();
    while let Some((offset, character)) = characters.next() {
        // Quoted strings and identifiers are consumed whole, escapes included
        if Delimiter::STRING_MARKERS.contains(&character)
            || character == Delimiter::IDENTIFIER_MARKER
        {
            flush(&mut current, &mut tokens);
            let start_line_number = line_number;
            let mut content = String::new();
            let mut is_current_character_escaped = false;
            for (_, inner_character) in characters.by_ref() {
                if inner_character == '\n' {
                    line_number += 1;
                }
                if is_current_character_escaped {
                    content.push(inner_character);
                    is_current_character_escaped = false;
                } else if inner_character == Delimiter::ESCAPE_CHARACTER
                    && character != Delimiter::IDENTIFIER_MARKER
                {
                    is_current_character_escaped = true;
                } else if inner_character == character {
                    break;
                } else {
                    content.push(inner_character);
                }
            }
            tokens.push(Token {
                value: if character == Delimiter::IDENTIFIER_MARKER {
                    TokenValue::Arbitrary(content)
                } else {
                    TokenValue::String(content)
                },
                line_number: start_line_number,
                offset,
            });
            continue;
        }
        // A period inside a number is part of the number, not a qualifier
        if character == '.'
            && current.as_ref().map_or(false, Candidate::is_integer)
            && matches!(characters.peek(), Some((_, next)) if next.is_ascii_digit())
        {
            if let Some(candidate) = current.as_mut() {
                candidate.text.push(character);
            }
            continue;
        }
        // Recognize delimiters early, as they don't have to be separated by whitespace from other tokens
        if Delimiter::MEANINGFUL_CHARS.contains(&character) {
            flush(&mut current, &mut tokens);
            tokens.push(Token {
                value: TokenValue::from_str(&character.to_string())
                    .unwrap_or(TokenValue::Arbitrary(character.to_string())),
                line_number,
                offset,
            });
            continue;
        }
        // Break up non-delimiter tokens on whitespace
        if character.is_whitespace() {
            flush(&mut current, &mut tokens);
            if character == '\n' {
                line_number += 1;
            }
            continue;
        }
        // The default case for a character is just being appended to the working token candidate
        match current.as_mut() {
            Some(candidate) => candidate.text.push(character),
            None => {
                current = Some(Candidate {
                    text: character.to_string(),
                    line_number,
                    offset,
                })
            }
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(tokens: &[Token]) -> Vec<&TokenValue> {
        tokens.iter().map(|token| &token.value).collect()
    }

    #[test]
    fn tokenization_works_with_create_table() {
        let statement = "CREATE TABLE IF NOT EXISTS test (
            id BIGINT UNSIGNED PRIMARY KEY,
            name varchar(36) NOT NULL
        );";

        let detected_tokens = tokenize_statement(statement);

        assert_eq!(
            values(&detected_tokens),
            vec![
                &TokenValue::Const(Keyword::Create),
                &TokenValue::Const(Keyword::Table),
                &TokenValue::Const(Keyword::If),
                &TokenValue::Const(Keyword::Not),
                &TokenValue::Const(Keyword::Exists),
                &TokenValue::Arbitrary("test".to_string()),
                &TokenValue::Delimiting(Delimiter::ParenthesisOpening),
                &TokenValue::Arbitrary("id".to_string()),
                &TokenValue::Arbitrary("BIGINT".to_string()),
                &TokenValue::Const(Keyword::Unsigned),
                &TokenValue::Const(Keyword::Primary),
                &TokenValue::Const(Keyword::Key),
                &TokenValue::Delimiting(Delimiter::Comma),
                &TokenValue::Arbitrary("name".to_string()),
                &TokenValue::Arbitrary("varchar".to_string()),
                &TokenValue::Delimiting(Delimiter::ParenthesisOpening),
                &TokenValue::Arbitrary("36".to_string()),
                &TokenValue::Delimiting(Delimiter::ParenthesisClosing),
                &TokenValue::Const(Keyword::Not),
                &TokenValue::Const(Keyword::Null),
                &TokenValue::Delimiting(Delimiter::ParenthesisClosing),
                &TokenValue::Delimiting(Delimiter::Semicolon),
            ]
        );
        assert_eq!(detected_tokens[7].line_number, 2);
        assert_eq!(detected_tokens[13].line_number, 3);
        assert_eq!(detected_tokens[20].line_number, 4);
    }

    #[test]
    fn tokens_carry_byte_offsets() {
        let statement = "SELECT * FROM db.t";
        let detected_tokens = tokenize_statement(statement);
        let offsets: Vec<usize> = detected_tokens.iter().map(|token| token.offset).collect();
        assert_eq!(offsets, vec![0, 7, 9, 14, 16, 17]);
        assert_eq!(
            detected_tokens[4].value,
            TokenValue::Delimiting(Delimiter::Period)
        );
    }

    #[test]
    fn tokenization_supports_various_strings() {
        let statement = "INSERT INTO test VALUES ('123', '   x ', 'The \\'Moon\\'', `select`, 1.5)";

        let detected_tokens = tokenize_statement(statement);

        assert_eq!(
            values(&detected_tokens[4..]),
            vec![
                &TokenValue::Delimiting(Delimiter::ParenthesisOpening),
                &TokenValue::String("123".to_string()),
                &TokenValue::Delimiting(Delimiter::Comma),
                &TokenValue::String("   x ".to_string()),
                &TokenValue::Delimiting(Delimiter::Comma),
                &TokenValue::String("The 'Moon'".to_string()),
                &TokenValue::Delimiting(Delimiter::Comma),
                &TokenValue::Arbitrary("select".to_string()),
                &TokenValue::Delimiting(Delimiter::Comma),
                &TokenValue::Arbitrary("1.5".to_string()),
                &TokenValue::Delimiting(Delimiter::ParenthesisClosing),
            ]
        );
    }

    #[test]
    fn tokenization_is_case_insensitive_for_keywords_only() {
        let detected_tokens = tokenize_statement("create Trigger TRG");
        assert_eq!(
            values(&detected_tokens),
            vec![
                &TokenValue::Const(Keyword::Create),
                &TokenValue::Const(Keyword::Trigger),
                &TokenValue::Arbitrary("TRG".to_string()),
            ]
        );
    }
}
