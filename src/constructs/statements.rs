use std::fmt;

use super::components::*;
use super::constraints::*;
use crate::sql::ValidationError;

#[derive(Debug, PartialEq, Clone)]
pub struct CreateTableStatement {
    pub table: TableDefinition,
    pub if_not_exists: bool,
    pub indexes: Vec<IndexDefinition>,
    pub foreign_keys: Vec<ForeignKeyDefinition>,
    pub checks: Vec<CheckDefinition>,
}

impl Validatable for CreateTableStatement {
    fn validate(&self) -> Result<(), ValidationError> {
        self.table.validate()?;
        let has_column_name = |name: &String| {
            self.table
                .columns
                .iter()
                .any(|column| column.name.eq_ignore_ascii_case(name))
        };
        for index in &self.indexes {
            if let Some(missing) = index.columns.iter().find(|name| !has_column_name(*name)) {
                return Err(ValidationError(format!(
                    "Index `{}` refers to unknown column `{}`",
                    index.id, missing
                )));
            }
        }
        if self.indexes.iter().filter(|index| index.is_primary()).count() > 1 {
            return Err(ValidationError(
                "A table can only have one PRIMARY KEY".into(),
            ));
        }
        for foreign_key in &self.foreign_keys {
            if foreign_key.columns.len() != foreign_key.parent_columns.len() {
                return Err(ValidationError(format!(
                    "Foreign key `{}` has {} columns but references {}",
                    foreign_key.name,
                    foreign_key.columns.len(),
                    foreign_key.parent_columns.len()
                )));
            }
            if let Some(missing) = foreign_key.columns.iter().find(|name| !has_column_name(*name)) {
                return Err(ValidationError(format!(
                    "Foreign key `{}` refers to unknown column `{}`",
                    foreign_key.name, missing
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct InsertStatement {
    pub table_name: String,
    /// Empty means every column in schema order.
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<DataInstance>>,
}

/// Possibly database-qualified table name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TableReference {
    pub database: Option<String>,
    pub table: String,
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.database {
            Some(database) => write!(f, "{}.{}", database, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

/// `column = value`, used both as a filter and as an assignment.
#[derive(Debug, PartialEq, Clone)]
pub struct ColumnValue {
    pub column: String,
    pub value: DataInstance,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SelectStatement {
    pub table: TableReference,
    pub conditions: Vec<ColumnValue>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UpdateStatement {
    pub table: TableReference,
    pub assignments: Vec<ColumnValue>,
    pub conditions: Vec<ColumnValue>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AnalyzeTableStatement {
    pub tables: Vec<TableReference>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TriggerTiming {
    Before,
    After,
}

impl fmt::Display for TriggerTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Before => "BEFORE",
                Self::After => "AFTER",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Insert => "INSERT",
                Self::Update => "UPDATE",
                Self::Delete => "DELETE",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TriggerOrder {
    Follows(String),
    Precedes(String),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CreateTriggerStatement {
    pub name: String,
    pub definer: Option<String>,
    pub timing: TriggerTiming,
    pub event: TriggerEvent,
    pub table: String,
    pub order: Option<TriggerOrder>,
    pub body: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SqlSecurity {
    Definer,
    Invoker,
}

impl fmt::Display for SqlSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Definer => "DEFINER",
                Self::Invoker => "INVOKER",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CheckOption {
    None,
    Cascaded,
    Local,
}

impl fmt::Display for CheckOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::None => "NONE",
                Self::Cascaded => "CASCADED",
                Self::Local => "LOCAL",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CreateViewStatement {
    pub name: String,
    pub or_replace: bool,
    pub algorithm: Option<String>,
    pub definer: Option<String>,
    pub security: Option<SqlSecurity>,
    pub columns: Vec<String>,
    /// The SELECT text following AS, verbatim.
    pub definition: String,
    pub check_option: CheckOption,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParameterMode {
    In,
    Out,
    InOut,
}

impl fmt::Display for ParameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::In => "IN",
                Self::Out => "OUT",
                Self::InOut => "INOUT",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProcedureParameter {
    pub mode: ParameterMode,
    pub name: String,
    pub data_type: DataTypeRaw,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CreateProcedureStatement {
    pub name: String,
    pub definer: Option<String>,
    pub parameters: Vec<ProcedureParameter>,
    pub comment: String,
    pub deterministic: bool,
    pub body: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DropKind {
    Trigger,
    View,
    Procedure,
}

impl fmt::Display for DropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Trigger => "trigger",
                Self::View => "view",
                Self::Procedure => "procedure",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DropStatement {
    pub kind: DropKind,
    pub name: String,
    pub if_exists: bool,
}
