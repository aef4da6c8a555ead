use std::{fmt, str::FromStr};

use time::OffsetDateTime;
use ulid::Ulid;
use uuid::Uuid;

use super::components::DataInstanceRaw;

/// Functions allowed as column defaults.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Function {
    Now,
    Uuid,
    Ulid,
}

impl Function {
    pub fn call(&self) -> DataInstanceRaw {
        match self {
            Self::Now => DataInstanceRaw::Timestamp(OffsetDateTime::now_utc()),
            Self::Uuid => DataInstanceRaw::Uuid(Uuid::new_v4()),
            Self::Ulid => DataInstanceRaw::Uuid(Uuid::from(Ulid::new())),
        }
    }

    /// Canonical expression text, as reported in `COLUMNS.COLUMN_DEFAULT`.
    pub fn expression(&self) -> &'static str {
        match self {
            Self::Now => "CURRENT_TIMESTAMP",
            Self::Uuid => "uuid()",
            Self::Ulid => "ulid()",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "function `{}`",
            match self {
                Self::Now => "NOW",
                Self::Uuid => "UUID",
                Self::Ulid => "ULID",
            }
        )
    }
}

impl FromStr for Function {
    type Err = String;

    fn from_str(candidate: &str) -> std::result::Result<Self, Self::Err> {
        match candidate.to_lowercase().as_str() {
            "now" | "current_timestamp" => Ok(Self::Now),
            "uuid" => Ok(Self::Uuid),
            "ulid" => Ok(Self::Ulid),
            _ => Err(format!(
                "`{}` does not refer to a supported function",
                candidate
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn now_is_reported_as_current_timestamp() {
        assert_eq!(Function::from_str("NOW"), Ok(Function::Now));
        assert_eq!(Function::from_str("current_timestamp"), Ok(Function::Now));
        assert_eq!(Function::Now.expression(), "CURRENT_TIMESTAMP");
    }

    #[test]
    fn ulid_produces_uuid() {
        assert!(matches!(Function::Ulid.call(), DataInstanceRaw::Uuid(_)));
    }
}
