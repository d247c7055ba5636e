//! Read-only proxy over a Notion database of accounts.
//!
//! Pages are fetched through the database query endpoint, following `next_cursor` until
//! `has_more` is false, and reshaped into [`AccountRow`]s.

use std::{future::Future, pin::Pin};

use log::{debug, warn};
use platform_host::AccountRow;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::config::{NotionColumns, NotionConfig};

/// Placeholder for missing text and date cells.
const MISSING: &str = "-";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct UpstreamError {
    pub message: String,
    /// Upstream error code, e.g. `object_not_found`.
    pub code: Option<String>,
}

impl UpstreamError {
    fn new(message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

pub type AccountsFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<AccountRow>, UpstreamError>> + Send + 'a>>;

/// Source of account rows for `GET /skt`.
pub trait AccountSource: Send + Sync {
    fn fetch_accounts(&self) -> AccountsFuture<'_>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_base: String,
    version: String,
    secret: String,
    database_id: String,
    columns: NotionColumns,
}

impl NotionClient {
    /// Builds a client when both the secret and the database id are configured.
    pub fn from_config(config: &NotionConfig) -> Option<Self> {
        let (secret, database_id) = config.credentials()?;
        Some(Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            version: config.version.clone(),
            secret: secret.to_string(),
            database_id: database_id.to_string(),
            columns: config.columns.clone(),
        })
    }

    fn query_body(&self, cursor: Option<&str>) -> Value {
        let mut body = json!({
            "sorts": [{ "property": self.columns.name, "direction": "ascending" }],
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = Value::String(cursor.to_string());
        }
        body
    }

    async fn query_page(&self, cursor: Option<&str>) -> Result<QueryResponse, UpstreamError> {
        let url = format!("{}/databases/{}/query", self.api_base, self.database_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret)
            .header("Notion-Version", &self.version)
            .json(&self.query_body(cursor))
            .send()
            .await
            .map_err(|err| UpstreamError::new(err.to_string(), Some("request_failed".into())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<NotionErrorBody>().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| format!("Notion responded with {status}"));
            return Err(UpstreamError::new(message, body.and_then(|b| b.code)));
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|err| UpstreamError::new(err.to_string(), Some("invalid_response".into())))
    }

    async fn fetch_all(&self) -> Result<Vec<AccountRow>, UpstreamError> {
        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.query_page(cursor.as_deref()).await?;
            debug!("notion query returned {} results", page.results.len());
            rows.extend(
                page.results
                    .iter()
                    .filter_map(|page| reshape_page(page, &self.columns)),
            );
            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }
        Ok(rows)
    }
}

impl AccountSource for NotionClient {
    fn fetch_accounts(&self) -> AccountsFuture<'_> {
        Box::pin(self.fetch_all())
    }
}

fn text_of(props: &Map<String, Value>, column: &str) -> String {
    let Some(prop) = props.get(column) else {
        warn!("notion property not found: {column}");
        return MISSING.to_string();
    };
    let fragments = prop
        .get("rich_text")
        .or_else(|| prop.get("title"))
        .and_then(Value::as_array);
    let text: String = fragments
        .into_iter()
        .flatten()
        .filter_map(|fragment| fragment.get("plain_text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        MISSING.to_string()
    } else {
        text
    }
}

fn date_of(props: &Map<String, Value>, column: &str) -> String {
    props
        .get(column)
        .and_then(|prop| prop.get("date"))
        .and_then(|date| date.get("start"))
        .and_then(Value::as_str)
        .filter(|start| !start.is_empty())
        .map(|start| start.replace('-', "/"))
        .unwrap_or_else(|| MISSING.to_string())
}

fn number_of(props: &Map<String, Value>, column: &str) -> f64 {
    props
        .get(column)
        .and_then(|prop| prop.get("number"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Maps one database page to an account row. Pages without properties are skipped.
pub fn reshape_page(page: &Value, columns: &NotionColumns) -> Option<AccountRow> {
    let props = page.get("properties")?.as_object()?;
    Some(AccountRow {
        id: page
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        name: text_of(props, &columns.name),
        enroll_date: date_of(props, &columns.enroll_date),
        account: text_of(props, &columns.account),
        pw: text_of(props, &columns.password),
        years: number_of(props, &columns.years),
        last_activation_date: date_of(props, &columns.last_activation_date),
        contract_end_date: date_of(props, &columns.contract_end_date),
        memo: text_of(props, &columns.memo),
    })
}
