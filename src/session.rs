use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::catalog::definitions::ViewDefinition;
use crate::catalog::privileges::PrivilegeSet;
use crate::errors::{Error, Result};

pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_ANALYZE_PROGRESS_INTERVAL: usize = 4096;

/// Views created in a session against databases that cannot store views themselves.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    // Keyed by lowercase database name
    views: RwLock<HashMap<String, Vec<ViewDefinition>>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, database: &str, view: ViewDefinition, or_replace: bool) -> Result<()> {
        let mut views = self.views.write();
        let database_views = views.entry(database.to_lowercase()).or_default();
        match database_views
            .iter()
            .position(|existing| existing.name.eq_ignore_ascii_case(&view.name))
        {
            Some(position) if or_replace => database_views[position] = view,
            Some(_) => return Err(Error::AlreadyExists("view", view.name)),
            None => database_views.push(view),
        }
        Ok(())
    }

    /// Whether a view was actually removed.
    pub fn remove(&self, database: &str, name: &str) -> bool {
        let mut views = self.views.write();
        match views.get_mut(&database.to_lowercase()) {
            Some(database_views) => {
                let count_before = database_views.len();
                database_views.retain(|view| !view.name.eq_ignore_ascii_case(name));
                database_views.len() != count_before
            }
            None => false,
        }
    }

    pub fn views_in_database(&self, database: &str) -> Vec<ViewDefinition> {
        self.views
            .read()
            .get(&database.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// Per-query state: who is asking, against which database, and whether they gave up.
#[derive(Debug, Clone)]
pub struct Context {
    pub current_database: Option<String>,
    pub user: String,
    pub host: String,
    pub privileges: Arc<PrivilegeSet>,
    pub views: Arc<ViewRegistry>,
    /// Rows between cancellation checks during long scans.
    pub analyze_progress_interval: usize,
    variables: HashMap<String, String>,
    cancelled: Arc<AtomicBool>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(ViewRegistry::new()))
    }
}

impl Context {
    pub fn new(views: Arc<ViewRegistry>) -> Self {
        let variables = [
            ("character_set_client", "utf8mb4"),
            ("character_set_connection", "utf8mb4"),
            ("collation_connection", "utf8mb4_0900_bin"),
            ("collation_server", "utf8mb4_0900_bin"),
            (
                "sql_mode",
                "STRICT_TRANS_TABLES,NO_ENGINE_SUBSTITUTION,ONLY_FULL_GROUP_BY",
            ),
        ]
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
        Context {
            current_database: None,
            user: DEFAULT_USER.to_string(),
            host: DEFAULT_HOST.to_string(),
            privileges: Arc::new(PrivilegeSet::all()),
            views,
            analyze_progress_interval: DEFAULT_ANALYZE_PROGRESS_INTERVAL,
            variables,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.current_database = Some(database.to_string());
        self
    }

    pub fn with_user(mut self, user: &str, host: &str, privileges: PrivilegeSet) -> Self {
        self.user = user.to_string();
        self.host = host.to_string();
        self.privileges = Arc::new(privileges);
        self
    }

    pub fn current_database(&self) -> Result<&str> {
        self.current_database
            .as_deref()
            .ok_or(Error::NoDatabaseSelected)
    }

    /// `user@host`, the form definers are stored in.
    pub fn definer(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    pub fn session_variable(&self, name: &str) -> Option<&str> {
        self.variables
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    pub fn set_session_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_lowercase(), value.to_string());
    }

    /// Flag this query as cancelled. Visible to every clone of the context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
