mod errors;
mod expects;
mod parser;
mod tokenizer;

pub use errors::{SyntaxError, ValidationError};
pub use parser::{parse_statement, Statement};
