use crate::*;
use futures::future::try_join_all;
use std::time::Duration;

/// Knobs of the schema resolution stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub suggest_values: bool,
    pub values_limit: usize,
    pub request_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            suggest_values: true,
            values_limit: 10,
            request_timeout: Duration::from_millis(5000),
        }
    }
}

impl From<&Config> for ResolverSettings {
    fn from(config: &Config) -> Self {
        Self {
            suggest_values: config.suggest_values,
            values_limit: config.values_limit,
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }
}

/// Backtick-quote names the backend would not read as one identifier.
fn quote_identifier(name: &str) -> String {
    if name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
    {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

pub fn describe_query(table: &str) -> String {
    format!("DESCRIBE TABLES LIKE {}", quote_identifier(table))
}

pub fn values_query(column: &str, table: &str, limit: usize) -> String {
    format!(
        "SELECT DISTINCT {} FROM {} LIMIT {limit}",
        quote_identifier(column),
        quote_identifier(table)
    )
}

/// Render a sampled value the way it would be typed into the query.
fn value_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::Null => None,
        Value::String(text) => Some(format!("'{}'", text.replace('\'', "''"))),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// Resolves table, column and value intents against a [`QueryBackend`].
#[derive(Debug, Clone)]
pub struct SchemaResolver<B> {
    backend: B,
    settings: ResolverSettings,
}

impl<B: QueryBackend> SchemaResolver<B> {
    pub fn new(backend: B, settings: ResolverSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Turn the intents of `base` into suggestions: column fields, values,
    /// column aliases, then keywords.
    ///
    /// Each batch of backend queries runs concurrently and fails as a whole
    /// when any of its queries fails.
    pub async fn resolve(
        &self,
        base: &AutocompleteResultBase,
        symbols: &SymbolTable,
    ) -> Result<Suggestions> {
        let mut suggestions = Suggestions::new();

        let tables = base.column_tables();
        if !tables.is_empty() {
            let described =
                try_join_all(tables.iter().map(|table| self.describe(table))).await?;
            for table in &described {
                suggestions.extend(table.ordered_columns().map(|column| {
                    Suggestion::field(&column.name, Some(column.data_type.clone()))
                }));
            }

            match base.values_column() {
                Some(column) if self.settings.suggest_values => {
                    let values = try_join_all(
                        described.iter().map(|table| self.values(table, column)),
                    )
                    .await?;
                    suggestions.extend(values.into_iter().flatten());
                }
                Some(column) => debug!("Value suggestions disabled, skipping '{column}'"),
                None => {}
            }
        }

        for alias in base.suggest_column_aliases.iter().flatten() {
            suggestions.push(Suggestion::field(&alias.name, None));
        }

        suggestions.extend(
            base.suggest_keywords
                .iter()
                .map(|keyword| Suggestion::new(&keyword.value, symbols.classify(&keyword.value))),
        );

        if base.suggest_views_or_tables.is_some()
            || base.suggest_aggregate_functions.is_some()
            || base.suggest_scalar_functions.is_some()
        {
            trace!(
                "Table and function intents have no suggestion source: tables {:?}, aggregate {:?}, scalar {:?}",
                base.suggest_views_or_tables,
                base.suggest_aggregate_functions,
                base.suggest_scalar_functions
            );
        }
        Ok(suggestions)
    }

    async fn query(&self, sql: String) -> Result<QueryResponse> {
        trace!("Backend query: {sql}");
        let timeout = self.settings.request_timeout;
        tokio::time::timeout(timeout, self.backend.query(sql))
            .await
            .map_err(|_| Error::Timeout(timeout))?
    }

    async fn describe(&self, table: &str) -> Result<Table> {
        let response = self.query(describe_query(table)).await?;
        Table::from_describe(table, &response)
    }

    /// Distinct values of `column` in `table`. Boolean columns answer without
    /// a query.
    async fn values(&self, table: &Table, column: &str) -> Result<Suggestions> {
        if table
            .column(column)
            .is_some_and(|column| column.data_type.is_boolean())
        {
            return Ok(vec![Suggestion::value("true"), Suggestion::value("false")]);
        }
        let response = self
            .query(values_query(column, &table.name, self.settings.values_limit))
            .await?;
        Ok(response
            .fields()
            .first()
            .map(|field| {
                field
                    .values
                    .iter()
                    .filter_map(value_text)
                    .map(Suggestion::value)
                    .collect()
            })
            .unwrap_or_default())
    }
}
