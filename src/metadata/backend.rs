use crate::*;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Runs SQL against the search backend.
pub trait QueryBackend: Send + Sync {
    fn query(&self, sql: String) -> impl Future<Output = Result<QueryResponse>> + Send;
}

/// Body of a backend query: `{"query": {"qs": …, "format": "jdbc"}, "df": null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub query: QueryString,
    pub df: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryString {
    pub qs: String,
    pub format: String,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            query: QueryString {
                qs: sql.into(),
                format: "jdbc".to_string(),
            },
            df: None,
        }
    }
}

/// `{"body": {"fields": [{"name": …, "values": […]}]}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub body: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub fields: Vec<ResponseField>,
}

/// One result column and its values, row order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseField {
    pub name: String,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

impl ResponseField {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }
}

impl QueryResponse {
    pub fn new(fields: impl IntoIterator<Item = ResponseField>) -> Self {
        Self {
            body: ResponseBody {
                fields: fields.into_iter().collect(),
            },
        }
    }

    pub fn fields(&self) -> &[ResponseField] {
        &self.body.fields
    }

    pub fn field(&self, name: &str) -> Option<&ResponseField> {
        self.body.fields.iter().find(|field| field.name == name)
    }
}
