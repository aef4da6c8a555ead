use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use super::capabilities::{Database, Table};
use crate::errors::Result;
use crate::session::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrivilegeType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    References,
    Index,
    Alter,
    CreateView,
    ShowView,
    CreateRoutine,
    AlterRoutine,
    Execute,
    Trigger,
}

impl PrivilegeType {
    pub const ALL: [Self; 15] = [
        Self::Select,
        Self::Insert,
        Self::Update,
        Self::Delete,
        Self::Create,
        Self::Drop,
        Self::References,
        Self::Index,
        Self::Alter,
        Self::CreateView,
        Self::ShowView,
        Self::CreateRoutine,
        Self::AlterRoutine,
        Self::Execute,
        Self::Trigger,
    ];
}

impl fmt::Display for PrivilegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Select => "SELECT",
                Self::Insert => "INSERT",
                Self::Update => "UPDATE",
                Self::Delete => "DELETE",
                Self::Create => "CREATE",
                Self::Drop => "DROP",
                Self::References => "REFERENCES",
                Self::Index => "INDEX",
                Self::Alter => "ALTER",
                Self::CreateView => "CREATE VIEW",
                Self::ShowView => "SHOW VIEW",
                Self::CreateRoutine => "CREATE ROUTINE",
                Self::AlterRoutine => "ALTER ROUTINE",
                Self::Execute => "EXECUTE",
                Self::Trigger => "TRIGGER",
            }
        )
    }
}

/// Grants held by one account, at global, database and table scope.
/// Database and table names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegeSet {
    global: BTreeSet<PrivilegeType>,
    databases: BTreeMap<String, BTreeSet<PrivilegeType>>,
    tables: BTreeMap<(String, String), BTreeSet<PrivilegeType>>,
}

impl PrivilegeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every privilege on every object.
    pub fn all() -> Self {
        let mut set = Self::new();
        for privilege in PrivilegeType::ALL {
            set.grant_global(privilege);
        }
        set
    }

    pub fn grant_global(&mut self, privilege: PrivilegeType) -> &mut Self {
        self.global.insert(privilege);
        self
    }

    pub fn grant_database(&mut self, database: &str, privilege: PrivilegeType) -> &mut Self {
        self.databases
            .entry(database.to_lowercase())
            .or_default()
            .insert(privilege);
        self
    }

    pub fn grant_table(
        &mut self,
        database: &str,
        table: &str,
        privilege: PrivilegeType,
    ) -> &mut Self {
        self.tables
            .entry((database.to_lowercase(), table.to_lowercase()))
            .or_default()
            .insert(privilege);
        self
    }

    pub fn has_global(&self, privilege: PrivilegeType) -> bool {
        self.global.contains(&privilege)
    }

    pub fn has_database(&self, database: &str, privilege: PrivilegeType) -> bool {
        self.has_global(privilege)
            || self
                .databases
                .get(&database.to_lowercase())
                .map_or(false, |privileges| privileges.contains(&privilege))
    }

    /// Checks the global scope first, then the database, then the table.
    pub fn has_table(&self, database: &str, table: &str, privilege: PrivilegeType) -> bool {
        self.has_database(database, privilege)
            || self
                .tables
                .get(&(database.to_lowercase(), table.to_lowercase()))
                .map_or(false, |privileges| privileges.contains(&privilege))
    }

    /// Whether any privilege at all reaches into the database.
    pub fn can_see_database(&self, database: &str) -> bool {
        let database = database.to_lowercase();
        !self.global.is_empty()
            || self
                .databases
                .get(&database)
                .map_or(false, |privileges| !privileges.is_empty())
            || self
                .tables
                .iter()
                .any(|((table_database, _), privileges)| {
                    table_database == &database && !privileges.is_empty()
                })
    }

    pub fn can_see_table(&self, database: &str, table: &str) -> bool {
        PrivilegeType::ALL
            .iter()
            .any(|privilege| self.has_table(database, table, *privilege))
    }

    pub fn global_privileges(&self) -> impl Iterator<Item = &PrivilegeType> {
        self.global.iter()
    }

    pub fn database_privileges(&self) -> impl Iterator<Item = (&str, &PrivilegeType)> {
        self.databases.iter().flat_map(|(database, privileges)| {
            privileges
                .iter()
                .map(move |privilege| (database.as_str(), privilege))
        })
    }

    pub fn table_privileges(&self) -> impl Iterator<Item = (&str, &str, &PrivilegeType)> {
        self.tables.iter().flat_map(|((database, table), privileges)| {
            privileges
                .iter()
                .map(move |privilege| (database.as_str(), table.as_str(), privilege))
        })
    }
}

/// Hides the tables a session has no privileges on. Capability probes are not forwarded,
/// callers reach the wrapped database through `unwrap_database`.
pub struct PrivilegedDatabase {
    inner: Arc<dyn Database>,
    privileges: Arc<PrivilegeSet>,
}

impl PrivilegedDatabase {
    pub fn new(inner: Arc<dyn Database>, privileges: Arc<PrivilegeSet>) -> Self {
        PrivilegedDatabase { inner, privileges }
    }
}

impl Database for PrivilegedDatabase {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn table_names(&self, ctx: &Context) -> Result<Vec<String>> {
        Ok(self
            .inner
            .table_names(ctx)?
            .into_iter()
            .filter(|table| self.privileges.can_see_table(self.inner.name(), table))
            .collect())
    }

    fn table_insensitive(&self, ctx: &Context, name: &str) -> Result<Option<Arc<dyn Table>>> {
        if !self.privileges.can_see_table(self.inner.name(), name) {
            return Ok(None);
        }
        self.inner.table_insensitive(ctx, name)
    }

    fn wrapped(&self) -> Option<Arc<dyn Database>> {
        Some(self.inner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_check_falls_back_through_scopes() {
        let mut privileges = PrivilegeSet::new();
        privileges.grant_table("mydb", "t", PrivilegeType::ShowView);
        assert!(privileges.has_table("MyDb", "T", PrivilegeType::ShowView));
        assert!(!privileges.has_table("mydb", "u", PrivilegeType::ShowView));
        assert!(!privileges.has_database("mydb", PrivilegeType::ShowView));

        privileges.grant_database("mydb", PrivilegeType::ShowView);
        assert!(privileges.has_table("mydb", "u", PrivilegeType::ShowView));
        assert!(!privileges.has_table("other", "u", PrivilegeType::ShowView));

        privileges.grant_global(PrivilegeType::ShowView);
        assert!(privileges.has_table("other", "u", PrivilegeType::ShowView));
    }

    #[test]
    fn visibility_follows_any_grant() {
        let mut privileges = PrivilegeSet::new();
        privileges.grant_table("mydb", "t", PrivilegeType::Select);
        assert!(privileges.can_see_database("mydb"));
        assert!(!privileges.can_see_database("other"));
        assert!(privileges.can_see_table("mydb", "t"));
        assert!(!privileges.can_see_table("mydb", "u"));
        assert_eq!(
            privileges.table_privileges().collect::<Vec<_>>(),
            vec![("mydb", "t", &PrivilegeType::Select)]
        );
    }
}
