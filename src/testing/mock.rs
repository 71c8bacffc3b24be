use crate::*;
use serde_json::json;
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

/// In-memory [`QueryBackend`] answering canned responses by exact SQL text.
///
/// Every query is recorded, answered or not. Unknown queries fail.
#[derive(Debug, Default)]
pub struct MockBackend {
    responses: HashMap<String, QueryResponse>,
    failures: HashSet<String>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, sql: impl Into<String>, response: QueryResponse) -> Self {
        self.responses.insert(sql.into(), response);
        self
    }

    /// Answer `DESCRIBE TABLES LIKE <table>` with the given (name, type) rows.
    pub fn with_table(self, table: &str, columns: &[(&str, &str)]) -> Self {
        let response = QueryResponse::new([
            ResponseField::new("TABLE_NAME", columns.iter().map(|_| json!(table))),
            ResponseField::new("COLUMN_NAME", columns.iter().map(|(name, _)| json!(name))),
            ResponseField::new("TYPE_NAME", columns.iter().map(|(_, t)| json!(t))),
        ]);
        self.with_response(describe_query(table), response)
    }

    /// Answer the distinct-values query for `column` of `table`.
    pub fn with_values(
        self,
        table: &str,
        column: &str,
        limit: usize,
        values: Vec<serde_json::Value>,
    ) -> Self {
        let response = QueryResponse::new([ResponseField::new(column, values)]);
        self.with_response(values_query(column, table, limit), response)
    }

    pub fn with_failure(mut self, sql: impl Into<String>) -> Self {
        self.failures.insert(sql.into());
        self
    }

    /// Sleep before answering every query.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries received so far, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock poisoned").clone()
    }
}

impl QueryBackend for MockBackend {
    async fn query(&self, sql: String) -> Result<QueryResponse> {
        self.queries
            .lock()
            .expect("queries lock poisoned")
            .push(sql.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failures.contains(&sql) {
            return Err(Error::Backend(format!("injected failure for '{sql}'")));
        }
        self.responses
            .get(&sql)
            .cloned()
            .ok_or_else(|| Error::Backend(format!("no canned response for '{sql}'")))
    }
}
