mod read;
mod write;

use anyhow::anyhow;
use serde::{ser::SerializeSeq, Serialize, Serializer};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::*;

use crate::catalog::Catalog;
use crate::config;
use crate::constructs::components::DataInstance;
use crate::constructs::rows::{NamedRow, Row};
use crate::constructs::Validatable;
use crate::errors::{Error, Result};
use crate::memory;
use crate::session::{Context, ViewRegistry};
use crate::sql::{parse_statement, Statement};

const MAX_IN_FLIGHT_REQUESTS: usize = 100;

/// A parsed statement along with the text it came from, which stored definitions keep.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub statement: Statement,
}

impl Query {
    pub fn parse(text: &str) -> Result<Self> {
        let statement = parse_statement(text)?;
        statement.validate()?;
        Ok(Query {
            text: text.to_string(),
            statement,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct QueryResult {
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Outcome of a statement that changes things instead of reading them.
    pub fn affected(count: u64) -> Self {
        QueryResult {
            column_names: vec!["affected_rows".to_string()],
            rows: vec![Row(vec![DataInstance::from(count)])],
        }
    }

    /// Values of one column across all rows, for tests and logging.
    pub fn column(&self, name: &str) -> Vec<&DataInstance> {
        match self
            .column_names
            .iter()
            .position(|column_name| column_name.eq_ignore_ascii_case(name))
        {
            Some(position) => self.rows.iter().map(|row| row.get(position)).collect(),
            None => Vec::new(),
        }
    }
}

impl Serialize for QueryResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&NamedRow(&self.column_names, &row.0))?;
        }
        seq.end()
    }
}

/// Payload with a query, the session it runs in, and a sender to return the result to.
pub type ExecutorPayload = (Query, Context, oneshot::Sender<Result<QueryResult>>);

/// Cloneable front of a running executor.
#[derive(Clone)]
pub struct ExecutorHandle {
    tx: mpsc::Sender<ExecutorPayload>,
    views: Arc<ViewRegistry>,
    default_database: String,
    analyze_progress_interval: usize,
}

impl ExecutorHandle {
    /// Fresh session state sharing the executor's view registry.
    pub fn context(&self, database: Option<&str>) -> Context {
        let mut ctx = Context::new(self.views.clone())
            .with_database(database.unwrap_or(&self.default_database));
        ctx.analyze_progress_interval = self.analyze_progress_interval;
        ctx
    }

    pub async fn execute(&self, query: Query, ctx: Context) -> Result<QueryResult> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send((query, ctx, resp_tx))
            .await
            .map_err(|_| Error::ExecutorUnavailable)?;
        resp_rx.await.map_err(|_| Error::ExecutorUnavailable)?
    }
}

pub struct Executor {
    config: config::Config,
    catalog: Arc<Catalog>,
    views: Arc<ViewRegistry>,
    rx: Option<mpsc::Receiver<ExecutorPayload>>,
}

impl Executor {
    pub fn new(config: &config::Config, catalog: Arc<Catalog>) -> Self {
        Executor {
            config: config.clone(),
            catalog,
            views: Arc::new(ViewRegistry::new()),
            rx: None,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn prepare_channel(&mut self) -> ExecutorHandle {
        let (tx, rx) = mpsc::channel(MAX_IN_FLIGHT_REQUESTS);
        self.rx = Some(rx);
        ExecutorHandle {
            tx,
            views: self.views.clone(),
            default_database: self.config.default_database.clone(),
            analyze_progress_interval: self.config.analyze_progress_interval,
        }
    }

    /// Make sure the default database exists.
    pub fn bootstrap(&self) -> Result<()> {
        if self.catalog.database(&self.config.default_database).is_err() {
            self.catalog
                .add_database(Arc::new(memory::Database::new(&self.config.default_database)))?;
            debug!(
                "🆕 Initialized default database `{}`",
                self.config.default_database
            );
        }
        Ok(())
    }

    pub async fn start(&mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow!("`prepare_channel` must be ran before `start`"))?;
        debug!("🔢 Bootstraping the executor...");
        self.bootstrap()?;
        debug!("🗡 Executor engaged");
        while let Some((query, ctx, tx)) = rx.recv().await {
            let result = self.execute(&query, &ctx);
            if tx.send(result).is_err() {
                warn!("‼️ Requester went away before its result was ready");
            }
        }
        debug!("💤 Executor disengaged");
        Ok(())
    }

    /// Run one query to completion on the calling thread.
    pub fn execute(&self, query: &Query, ctx: &Context) -> Result<QueryResult> {
        let timer = Instant::now();
        debug!("➡️ Executing statement: {:?}", query.statement);
        let result = match &query.statement {
            Statement::Select(select) => read::select(&self.catalog, ctx, select),
            Statement::AnalyzeTable(analyze) => read::analyze(&self.catalog, ctx, analyze),
            Statement::CreateTable(create_table) => {
                write::create_table(&self.catalog, ctx, create_table)
            }
            Statement::Insert(insert) => write::insert(&self.catalog, ctx, insert),
            Statement::Update(update) => write::update(&self.catalog, ctx, update),
            Statement::CreateTrigger(_) => write::create_trigger(&self.catalog, ctx, &query.text),
            Statement::CreateView(create_view) => {
                write::create_view(&self.catalog, ctx, create_view, &query.text)
            }
            Statement::CreateProcedure(_) => {
                write::create_procedure(&self.catalog, ctx, &query.text)
            }
            Statement::Drop(drop) => write::drop(&self.catalog, ctx, drop),
        };
        match &result {
            Ok(_) => trace!(
                "⏹ Statement finished in {} µs",
                timer.elapsed().as_micros()
            ),
            Err(error) => debug!("‼️ Statement failed: {}", error),
        }
        result
    }
}
