use crate::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSuggestion {
    pub value: String,
}

impl KeywordSuggestion {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReference {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSuggestion {
    pub tables: Vec<TableReference>,
}

impl ColumnSuggestion {
    pub fn new(tables: impl IntoIterator<Item = String>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|name| TableReference { name })
                .collect(),
        }
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|table| table.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAlias {
    pub name: String,
}

/// Position of the cursor inside a `column <op> value` or `column IN (…)`
/// predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnValuePredicate {
    #[display("column")]
    Column,
    #[display("operator")]
    Operator,
    #[display("value")]
    Value,
    #[display("lparen")]
    Lparen,
    #[display("end_in_term")]
    EndInTerm,
}

/// Intents gathered for one request before any schema lookup.
///
/// `None` fields were not reached by the grammar at the cursor and do not
/// apply; `Some(false)` never appears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteResultBase {
    pub errors: Vec<ParseError>,
    pub suggest_keywords: Vec<KeywordSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_columns: Option<ColumnSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_values_for_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_scalar_functions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_aggregate_functions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_views_or_tables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_column_aliases: Option<Vec<ColumnAlias>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggest_column_value_predicate: Option<ColumnValuePredicate>,
}

impl AutocompleteResultBase {
    pub fn new(errors: Vec<ParseError>) -> Self {
        Self {
            errors,
            ..Default::default()
        }
    }

    /// Tables whose columns should be described, in query order.
    pub fn column_tables(&self) -> Vec<&str> {
        self.suggest_columns
            .as_ref()
            .map(|columns| columns.table_names().collect())
            .unwrap_or_default()
    }

    /// Column to fetch sample values for, when one applies.
    pub fn values_column(&self) -> Option<&str> {
        self.suggest_values_for_column
            .as_deref()
            .filter(|column| !column.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_only_reached_intents() {
        let mut base = AutocompleteResultBase::new(Vec::new());
        base.suggest_keywords.push(KeywordSuggestion::new("FROM"));
        base.suggest_columns = Some(ColumnSuggestion::new(["orders".to_string()]));
        base.suggest_column_value_predicate = Some(ColumnValuePredicate::EndInTerm);

        let json = serde_json::to_value(&base).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "errors": [],
                "suggestKeywords": [{"value": "FROM"}],
                "suggestColumns": {"tables": [{"name": "orders"}]},
                "suggestColumnValuePredicate": "END_IN_TERM",
            })
        );
    }

    #[test]
    fn blank_values_column_does_not_apply() {
        let mut base = AutocompleteResultBase::default();
        assert_eq!(base.values_column(), None);
        base.suggest_values_for_column = Some("  ".into());
        assert_eq!(base.values_column(), None);
        base.suggest_values_for_column = Some("status".into());
        assert_eq!(base.values_column(), Some("status"));
    }

    #[test]
    fn column_tables_keep_order() {
        let base = AutocompleteResultBase {
            suggest_columns: Some(ColumnSuggestion::new(["b".to_string(), "a".to_string()])),
            ..Default::default()
        };
        assert_eq!(base.column_tables(), ["b", "a"]);
    }
}
