use std::fmt;

/// Index identifier reserved for the primary key.
pub const PRIMARY_INDEX_ID: &str = "PRIMARY";

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IndexDefinition {
    pub id: String,
    pub unique: bool,
    /// Indexed columns, in index order.
    pub columns: Vec<String>,
    /// Prefix length per column position, if the index only covers a prefix of that column.
    pub prefix_lengths: Vec<Option<u16>>,
    pub comment: String,
    pub index_type: String,
}

impl IndexDefinition {
    pub fn new(id: &str, unique: bool, columns: &[&str]) -> Self {
        IndexDefinition {
            id: id.to_string(),
            unique: unique || id.eq_ignore_ascii_case(PRIMARY_INDEX_ID),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            prefix_lengths: Vec::new(),
            comment: String::new(),
            index_type: "BTREE".to_string(),
        }
    }

    pub fn primary(columns: &[&str]) -> Self {
        Self::new(PRIMARY_INDEX_ID, true, columns)
    }

    pub fn is_primary(&self) -> bool {
        self.id.eq_ignore_ascii_case(PRIMARY_INDEX_ID)
    }

    pub fn prefix_length(&self, position: usize) -> Option<u16> {
        self.prefix_lengths.get(position).copied().flatten()
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CheckDefinition {
    pub name: String,
    pub expression: String,
    pub enforced: bool,
}

/// Foreign key actions. `Default` means nothing was declared; it renders the same as `NO ACTION`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReferentialAction {
    Default,
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Default | Self::NoAction => "NO ACTION",
                Self::Restrict => "RESTRICT",
                Self::Cascade => "CASCADE",
                Self::SetNull => "SET NULL",
                Self::SetDefault => "SET DEFAULT",
            }
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ForeignKeyDefinition {
    pub name: String,
    pub columns: Vec<String>,
    /// Empty means the database of the declaring table.
    pub parent_database: String,
    pub parent_table: String,
    pub parent_columns: Vec<String>,
    pub on_update: ReferentialAction,
    pub on_delete: ReferentialAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn primary_index_is_always_unique() {
        let index = IndexDefinition::new("primary", false, &["id"]);
        assert!(index.is_primary());
        assert!(index.unique);
    }

    #[test]
    fn default_action_renders_as_no_action() {
        assert_eq!(ReferentialAction::Default.to_string(), "NO ACTION");
        assert_eq!(
            ReferentialAction::Default.to_string(),
            ReferentialAction::NoAction.to_string()
        );
    }
}
