use crate::*;
use std::time::Duration;

/// [`QueryBackend`] posting JSON to the backend's SQL search endpoint.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            url: config.backend_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QueryBackend for HttpBackend {
    async fn query(&self, sql: String) -> Result<QueryResponse> {
        let response = self
            .client
            .post(&self.url)
            .header("osd-xsrf", "true")
            .json(&QueryRequest::new(sql))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend answered {status}: {body}");
            return Err(Error::Backend(format!("{status}: {body}")));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    #[test_context(BackendServer)]
    #[tokio::test]
    async fn posts_query_and_reads_fields(ctx: &mut BackendServer) -> Result {
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .and(header("osd-xsrf", "true"))
            .and(body_json(json!({
                "query": {"qs": "DESCRIBE TABLES LIKE orders", "format": "jdbc"},
                "df": null
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "body": {"fields": [
                    {"name": "COLUMN_NAME", "values": ["status"]},
                    {"name": "TYPE_NAME", "values": ["keyword"]}
                ]}
            })))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let response = ctx.backend.query("DESCRIBE TABLES LIKE orders".into()).await?;
        let table = Table::from_describe("orders", &response)?;
        assert_eq!(table.column("status").map(|c| &c.data_type), Some(&DataType::Keyword));
        Ok(())
    }

    #[test_context(BackendServer)]
    #[tokio::test]
    async fn error_status_is_a_backend_error(ctx: &mut BackendServer) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("index not found"))
            .mount(&ctx.server)
            .await;

        let result = ctx.backend.query("SELECT 1".into()).await;
        assert!(
            matches!(&result, Err(Error::Backend(message)) if message.contains("index not found")),
            "{result:?}"
        );
    }

    #[test_context(BackendServer)]
    #[tokio::test]
    async fn malformed_body_is_an_http_error(ctx: &mut BackendServer) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&ctx.server)
            .await;

        assert!(matches!(
            ctx.backend.query("SELECT 1".into()).await,
            Err(Error::Http(_))
        ));
    }
}
