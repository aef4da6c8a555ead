//! The session's own grants. Nothing here looks at other accounts.

use super::CATALOG_NAME;
use crate::catalog::Catalog;
use crate::constructs::rows::Row;
use crate::errors::Result;
use crate::row;
use crate::session::Context;

const NOT_GRANTABLE: &str = "NO";

fn grantee(ctx: &Context) -> String {
    format!("'{}'@'{}'", ctx.user, ctx.host)
}

pub fn read_user_privileges(ctx: &Context, _catalog: &Catalog) -> Result<Vec<Row>> {
    let grantee = grantee(ctx);
    Ok(ctx
        .privileges
        .global_privileges()
        .map(|privilege| {
            row![
                grantee.as_str(),
                CATALOG_NAME,
                privilege.to_string(),
                NOT_GRANTABLE
            ]
        })
        .collect())
}

pub fn read_schema_privileges(ctx: &Context, _catalog: &Catalog) -> Result<Vec<Row>> {
    let grantee = grantee(ctx);
    Ok(ctx
        .privileges
        .database_privileges()
        .map(|(database, privilege)| {
            row![
                grantee.as_str(),
                CATALOG_NAME,
                database,
                privilege.to_string(),
                NOT_GRANTABLE
            ]
        })
        .collect())
}

pub fn read_table_privileges(ctx: &Context, _catalog: &Catalog) -> Result<Vec<Row>> {
    let grantee = grantee(ctx);
    Ok(ctx
        .privileges
        .table_privileges()
        .map(|(database, table, privilege)| {
            row![
                grantee.as_str(),
                CATALOG_NAME,
                database,
                table,
                privilege.to_string(),
                NOT_GRANTABLE
            ]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::read_view;
    use super::*;
    use crate::catalog::privileges::{PrivilegeSet, PrivilegeType};
    use pretty_assertions::assert_eq;

    fn guest() -> Context {
        let mut privileges = PrivilegeSet::new();
        privileges
            .grant_global(PrivilegeType::Select)
            .grant_database("Reports", PrivilegeType::ShowView)
            .grant_table("reports", "daily", PrivilegeType::Insert)
            .grant_table("reports", "daily", PrivilegeType::Update);
        Context::default().with_user("guest", "10.0.0.%", privileges)
    }

    #[test]
    fn each_scope_lands_in_its_own_view() {
        let catalog = Catalog::new();
        let ctx = guest();
        assert_eq!(
            read_view(&catalog, &ctx, "USER_PRIVILEGES"),
            vec![row!["'guest'@'10.0.0.%'", "def", "SELECT", "NO"]]
        );
        assert_eq!(
            read_view(&catalog, &ctx, "SCHEMA_PRIVILEGES"),
            vec![row!["'guest'@'10.0.0.%'", "def", "reports", "SHOW VIEW", "NO"]]
        );
        assert_eq!(
            read_view(&catalog, &ctx, "TABLE_PRIVILEGES"),
            vec![
                row!["'guest'@'10.0.0.%'", "def", "reports", "daily", "INSERT", "NO"],
                row!["'guest'@'10.0.0.%'", "def", "reports", "daily", "UPDATE", "NO"],
            ]
        );
    }

    #[test]
    fn root_holds_every_global_privilege() {
        let rows = read_view(&Catalog::new(), &Context::default(), "USER_PRIVILEGES");
        assert_eq!(rows.len(), PrivilegeType::ALL.len());
        assert_eq!(rows[0], row!["'root'@'localhost'", "def", "SELECT", "NO"]);
    }
}
