use serde::Serialize;
use std::{collections::HashSet, fmt, str::FromStr};
use time::{macros::format_description, OffsetDateTime};
use uuid::Uuid;

use crate::sql::ValidationError;

use super::functions::Function;

/// MySQL-shaped column types.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataTypeRaw {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int24,
    UInt24,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Decimal { precision: u8, scale: u8 },
    Bit(u8),
    Boolean,
    Char(u32),
    VarChar(u32),
    Text,
    Blob,
    Json,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
}

/// Bytes per character of the default character set (utf8mb4).
const MAX_BYTES_PER_CHARACTER: u64 = 4;

impl DataTypeRaw {
    /// Full type as shown in `COLUMNS.COLUMN_TYPE`, e.g. `varchar(255)` or `bigint unsigned`.
    pub fn column_type(&self) -> String {
        match self {
            Self::Int8 => "tinyint".into(),
            Self::UInt8 => "tinyint unsigned".into(),
            Self::Int16 => "smallint".into(),
            Self::UInt16 => "smallint unsigned".into(),
            Self::Int24 => "mediumint".into(),
            Self::UInt24 => "mediumint unsigned".into(),
            Self::Int32 => "int".into(),
            Self::UInt32 => "int unsigned".into(),
            Self::Int64 => "bigint".into(),
            Self::UInt64 => "bigint unsigned".into(),
            Self::Float32 => "float".into(),
            Self::Float64 => "double".into(),
            Self::Decimal { precision, scale } => format!("decimal({},{})", precision, scale),
            Self::Bit(bits) => format!("bit({})", bits),
            Self::Boolean => "tinyint(1)".into(),
            Self::Char(length) => format!("char({})", length),
            Self::VarChar(length) => format!("varchar({})", length),
            Self::Text => "text".into(),
            Self::Blob => "blob".into(),
            Self::Json => "json".into(),
            Self::Date => "date".into(),
            Self::DateTime => "datetime".into(),
            Self::Timestamp => "timestamp".into(),
            Self::Time => "time".into(),
            Self::Year => "year".into(),
        }
    }

    /// Bare type name as shown in `COLUMNS.DATA_TYPE`, without length or attributes.
    pub fn data_type(&self) -> String {
        let column_type = self.column_type();
        let without_length = column_type.split('(').next().unwrap_or_default();
        without_length
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Char(_) | Self::VarChar(_) | Self::Text)
    }

    pub fn is_time(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::DateTime | Self::Timestamp | Self::Time
        )
    }

    /// Whether values of this type can be turned into a numeric histogram key.
    pub fn is_numeric_convertible(&self) -> bool {
        !matches!(
            self,
            Self::Char(_) | Self::VarChar(_) | Self::Text | Self::Blob | Self::Json
        )
    }

    pub fn character_maximum_length(&self) -> Option<u64> {
        match self {
            Self::Char(length) | Self::VarChar(length) => Some(u64::from(*length)),
            Self::Text | Self::Blob => Some(65_535),
            _ => None,
        }
    }

    pub fn character_octet_length(&self) -> Option<u64> {
        match self {
            Self::Char(length) | Self::VarChar(length) => {
                Some(u64::from(*length) * MAX_BYTES_PER_CHARACTER)
            }
            Self::Text | Self::Blob => Some(65_535),
            _ => None,
        }
    }

    pub fn numeric_precision(&self) -> Option<u64> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Boolean => Some(3),
            Self::Int16 | Self::UInt16 => Some(5),
            Self::Int24 | Self::UInt24 => Some(7),
            Self::Int32 | Self::UInt32 => Some(10),
            Self::Int64 => Some(19),
            Self::UInt64 => Some(20),
            Self::Float32 => Some(12),
            Self::Float64 => Some(22),
            Self::Decimal { precision, .. } => Some(u64::from(*precision)),
            Self::Bit(bits) => Some(u64::from(*bits)),
            _ => None,
        }
    }

    pub fn numeric_scale(&self) -> Option<u64> {
        match self {
            Self::Int8
            | Self::UInt8
            | Self::Boolean
            | Self::Int16
            | Self::UInt16
            | Self::Int24
            | Self::UInt24
            | Self::Int32
            | Self::UInt32
            | Self::Int64
            | Self::UInt64 => Some(0),
            Self::Decimal { scale, .. } => Some(u64::from(*scale)),
            _ => None,
        }
    }

    pub fn datetime_precision(&self) -> Option<u64> {
        match self {
            Self::DateTime | Self::Timestamp | Self::Time => Some(0),
            _ => None,
        }
    }

    /// Apply the parenthesized parameters that followed the type name, e.g. `(255)` or `(10,2)`.
    pub fn with_parameters(self, parameters: &[u32]) -> Result<Self, String> {
        match (self, parameters) {
            (_, []) => Ok(self),
            (Self::Char(_), [length]) => Ok(Self::Char(*length)),
            (Self::VarChar(_), [length]) => Ok(Self::VarChar(*length)),
            (Self::Bit(_), [bits]) if *bits >= 1 && *bits <= 64 => Ok(Self::Bit(*bits as u8)),
            (Self::Decimal { .. }, [precision]) if *precision <= 65 => Ok(Self::Decimal {
                precision: *precision as u8,
                scale: 0,
            }),
            (Self::Decimal { .. }, [precision, scale])
                if *precision <= 65 && scale <= precision =>
            {
                Ok(Self::Decimal {
                    precision: *precision as u8,
                    scale: *scale as u8,
                })
            }
            // Display widths of integer types are accepted and ignored, except for the TINYINT(1) alias
            (Self::Int8, [1]) => Ok(Self::Boolean),
            (
                Self::Int8
                | Self::Int16
                | Self::Int24
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt24
                | Self::UInt32
                | Self::UInt64,
                [_],
            ) => Ok(self),
            (Self::DateTime | Self::Timestamp | Self::Time, [_]) => Ok(self),
            _ => Err(format!(
                "Parameters {:?} are not valid for type `{}`",
                parameters,
                self.column_type()
            )),
        }
    }

    pub fn with_unsigned(self) -> Result<Self, String> {
        match self {
            Self::Int8 | Self::UInt8 => Ok(Self::UInt8),
            Self::Int16 | Self::UInt16 => Ok(Self::UInt16),
            Self::Int24 | Self::UInt24 => Ok(Self::UInt24),
            Self::Int32 | Self::UInt32 => Ok(Self::UInt32),
            Self::Int64 | Self::UInt64 => Ok(Self::UInt64),
            _ => Err(format!(
                "Type `{}` cannot be UNSIGNED",
                self.column_type()
            )),
        }
    }
}

impl fmt::Display for DataTypeRaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type `{}`", self.column_type().to_uppercase())
    }
}

impl FromStr for DataTypeRaw {
    type Err = String;

    fn from_str(candidate: &str) -> std::result::Result<Self, Self::Err> {
        match candidate.to_lowercase().as_str() {
            "tinyint" => Ok(Self::Int8),
            "smallint" => Ok(Self::Int16),
            "mediumint" => Ok(Self::Int24),
            "int" | "integer" => Ok(Self::Int32),
            "bigint" => Ok(Self::Int64),
            "float" => Ok(Self::Float32),
            "double" | "real" => Ok(Self::Float64),
            "decimal" | "numeric" => Ok(Self::Decimal {
                precision: 10,
                scale: 0,
            }),
            "bit" => Ok(Self::Bit(1)),
            "bool" | "boolean" => Ok(Self::Boolean),
            "char" => Ok(Self::Char(1)),
            "varchar" => Ok(Self::VarChar(255)),
            "text" | "longtext" => Ok(Self::Text),
            "blob" | "longblob" => Ok(Self::Blob),
            "json" => Ok(Self::Json),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            "timestamp" => Ok(Self::Timestamp),
            "time" => Ok(Self::Time),
            "year" => Ok(Self::Year),
            _ => Err(format!(
                "`{}` does not refer to a supported type",
                candidate
            )),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataType {
    pub raw_type: DataTypeRaw,
    pub is_nullable: bool,
}

impl DataType {
    pub fn new(raw_type: DataTypeRaw) -> Self {
        DataType {
            raw_type,
            is_nullable: false,
        }
    }

    pub fn nullable(raw_type: DataTypeRaw) -> Self {
        DataType {
            raw_type,
            is_nullable: true,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum DataInstanceRaw {
    UInt64(u64),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    Uuid(Uuid),
    String(String),
    Json(serde_json::Value),
}

impl DataInstanceRaw {
    /// Numeric key used to place this value in a histogram. `None` for values without a numeric order.
    pub fn to_stats_key(&self) -> Option<f64> {
        let key = match self {
            Self::UInt64(value) => *value as f64,
            Self::Int64(value) => *value as f64,
            Self::Float64(value) => *value,
            Self::Bool(value) => f64::from(u8::from(*value)),
            Self::Timestamp(value) => {
                value.unix_timestamp() as f64 + f64::from(value.nanosecond()) / 1e9
            }
            Self::Uuid(_) | Self::String(_) | Self::Json(_) => return None,
        };
        if key.is_nan() {
            None
        } else if key == 0.0 {
            // Fold -0.0 into 0.0 so both land in one bucket
            Some(0.0)
        } else {
            Some(key)
        }
    }
}

impl fmt::Display for DataInstanceRaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt64(value) => write!(f, "{}", value),
            Self::Int64(value) => write!(f, "{}", value),
            Self::Float64(value) => write!(f, "{}", value),
            Self::Bool(value) => write!(f, "{}", u8::from(*value)),
            Self::Timestamp(value) => {
                let formatted = value
                    .format(format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second]"
                    ))
                    .map_err(|_| fmt::Error)?;
                write!(f, "{}", formatted)
            }
            Self::Uuid(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "{}", value),
            Self::Json(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum DataInstance {
    Direct(DataInstanceRaw),
    Null,
}

impl DataInstance {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_raw(&self) -> Option<&DataInstanceRaw> {
        match self {
            Self::Direct(raw) => Some(raw),
            Self::Null => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Direct(DataInstanceRaw::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Read this value as a non-negative integer, accepting integral floats and numeric strings.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Direct(DataInstanceRaw::UInt64(value)) => Some(*value),
            Self::Direct(DataInstanceRaw::Int64(value)) => u64::try_from(*value).ok(),
            Self::Direct(DataInstanceRaw::Float64(value))
                if *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64 =>
            {
                Some(*value as u64)
            }
            Self::Direct(DataInstanceRaw::String(value)) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Loose equality used by `WHERE column = value` filters.
    pub fn matches(&self, other: &DataInstance) -> bool {
        match (self, other) {
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Direct(DataInstanceRaw::String(left)), Self::Direct(DataInstanceRaw::String(right))) => {
                left.eq_ignore_ascii_case(right)
            }
            (Self::Direct(left), Self::Direct(right)) => {
                match (left.to_stats_key(), right.to_stats_key()) {
                    (Some(left_key), Some(right_key)) => left_key == right_key,
                    _ => left.to_string() == right.to_string(),
                }
            }
        }
    }
}

impl fmt::Display for DataInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(raw) => fmt::Display::fmt(raw, f),
            Self::Null => write!(f, "NULL"),
        }
    }
}

macro_rules! data_instance_from_impl {
    ($($t:ty => $variant:ident as $cast:ty),*) => ($(
        impl From<$t> for DataInstance {
            fn from(value: $t) -> Self {
                DataInstance::Direct(DataInstanceRaw::$variant(<$cast>::from(value)))
            }
        }
    )*)
}

data_instance_from_impl! {
    u8 => UInt64 as u64,
    u16 => UInt64 as u64,
    u32 => UInt64 as u64,
    u64 => UInt64 as u64,
    i32 => Int64 as i64,
    i64 => Int64 as i64,
    f64 => Float64 as f64,
    bool => Bool as bool,
    String => String as String,
    OffsetDateTime => Timestamp as OffsetDateTime,
    Uuid => Uuid as Uuid,
    serde_json::Value => Json as serde_json::Value
}

impl From<usize> for DataInstance {
    fn from(value: usize) -> Self {
        DataInstance::Direct(DataInstanceRaw::UInt64(value as u64))
    }
}

impl From<&str> for DataInstance {
    fn from(value: &str) -> Self {
        DataInstance::Direct(DataInstanceRaw::String(value.to_string()))
    }
}

impl<T: Into<DataInstance>> From<Option<T>> for DataInstance {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => DataInstance::Null,
        }
    }
}

/// How a column obtains its default value.
#[derive(Debug, PartialEq, Clone)]
pub enum DataDefinition {
    Const(DataInstance),
    FunctionCall(Function),
}

impl DataDefinition {
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Const(_))
    }
}

pub trait Validatable {
    /// Make sure that this definition (self) actually makes sense.
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, PartialEq, Clone)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub primary_key: bool,
    pub default: Option<DataDefinition>,
    /// Free-form attribute text, e.g. `auto_increment`.
    pub extra: String,
    pub comment: String,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        ColumnDefinition {
            name: name.to_string(),
            data_type,
            primary_key: false,
            default: None,
            extra: String::new(),
            comment: String::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_default(mut self, default: DataDefinition) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_extra(mut self, extra: &str) -> Self {
        self.extra = extra.to_string();
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }
}

impl Validatable for ColumnDefinition {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError("A column must have a name".into()));
        }
        if self.primary_key && self.data_type.is_nullable {
            return Err(ValidationError(format!(
                "PRIMARY KEY column `{}` cannot be nullable",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered columns of a table. A column's ordinal position is its 1-based index here.
pub type Schema = Vec<ColumnDefinition>;

#[derive(Debug, PartialEq, Clone)]
pub struct TableDefinition {
    // Table name.
    pub name: String,
    // Column definitions.
    pub columns: Schema,
}

impl TableDefinition {
    pub fn new(name: String, columns: Schema) -> Self {
        TableDefinition { name, columns }
    }

    pub fn get_primary_key(&self) -> Vec<&ColumnDefinition> {
        self.columns
            .iter()
            .filter(|column| column.primary_key)
            .collect()
    }
}

impl Validatable for TableDefinition {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError("A table must have a name".into()));
        }
        if self.columns.is_empty() {
            return Err(ValidationError(
                "A table must have at least one column".into(),
            ));
        }
        let mut column_names: HashSet<String> = HashSet::new();
        for (column_index, column) in self.columns.iter().enumerate() {
            if !column_names.insert(column.name.to_lowercase()) {
                return Err(ValidationError(format!(
                    "There is more than one column with name `{}` in table definition",
                    column.name
                )));
            }
            if let Err(column_error) = column.validate() {
                return Err(ValidationError(format!(
                    "Problem at column {}: {}",
                    column_index + 1,
                    column_error
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn column_and_data_type_names() {
        assert_eq!(DataTypeRaw::VarChar(20).column_type(), "varchar(20)");
        assert_eq!(DataTypeRaw::VarChar(20).data_type(), "varchar");
        assert_eq!(DataTypeRaw::UInt64.column_type(), "bigint unsigned");
        assert_eq!(DataTypeRaw::UInt64.data_type(), "bigint");
        assert_eq!(
            DataTypeRaw::Decimal {
                precision: 10,
                scale: 2
            }
            .data_type(),
            "decimal"
        );
    }

    #[test]
    fn parameters_and_unsigned() {
        assert_eq!(
            DataTypeRaw::from_str("VARCHAR")
                .unwrap()
                .with_parameters(&[36]),
            Ok(DataTypeRaw::VarChar(36))
        );
        assert_eq!(
            DataTypeRaw::Int8.with_parameters(&[1]),
            Ok(DataTypeRaw::Boolean)
        );
        assert_eq!(DataTypeRaw::Int32.with_unsigned(), Ok(DataTypeRaw::UInt32));
        assert!(DataTypeRaw::Text.with_unsigned().is_err());
        assert!(DataTypeRaw::Decimal {
            precision: 10,
            scale: 0
        }
        .with_parameters(&[4, 6])
        .is_err());
    }

    #[test]
    fn stats_keys() {
        assert_eq!(DataInstanceRaw::Int64(-3).to_stats_key(), Some(-3.0));
        assert_eq!(DataInstanceRaw::Bool(true).to_stats_key(), Some(1.0));
        assert_eq!(DataInstanceRaw::Float64(-0.0).to_stats_key(), Some(0.0));
        assert_eq!(DataInstanceRaw::Float64(f64::NAN).to_stats_key(), None);
        assert_eq!(DataInstanceRaw::String("1".into()).to_stats_key(), None);
    }

    #[test]
    fn loose_matching() {
        assert!(DataInstance::from("MyDb").matches(&DataInstance::from("mydb")));
        assert!(DataInstance::from(3u64).matches(&DataInstance::from(3i64)));
        assert!(!DataInstance::Null.matches(&DataInstance::Null));
    }

    #[test]
    fn duplicate_columns_are_invalid() {
        let table = TableDefinition::new(
            "t".into(),
            vec![
                ColumnDefinition::new("a", DataType::new(DataTypeRaw::Int32)),
                ColumnDefinition::new("A", DataType::new(DataTypeRaw::Int32)),
            ],
        );
        assert_eq!(
            table.validate(),
            Err(ValidationError(
                "There is more than one column with name `A` in table definition".into()
            ))
        );
    }
}
