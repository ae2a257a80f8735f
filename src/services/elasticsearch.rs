// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::engine::{EngineHit, EngineSearchResponse, SearchScope};
use crate::services::engine::{EngineError, SearchEngine, DEFAULT_DOC_TYPE};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use url::Url;

/// Configuration for the Elasticsearch connection
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    pub url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl ElasticsearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let url = env::var("ELASTICSEARCH_URL").context("ELASTICSEARCH_URL must be set")?;

        Ok(Self {
            url: Self::parse_url(&url)?,
            username: env::var("ELASTICSEARCH_USERNAME").ok(),
            password: env::var("ELASTICSEARCH_PASSWORD").ok(),
            timeout_secs: env::var("ELASTICSEARCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("ELASTICSEARCH_TIMEOUT_SECS must be a valid number")?,
        })
    }

    /// Accepts both full URLs and bare `host:port`
    pub fn parse_url(raw: &str) -> anyhow::Result<Url> {
        let raw = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("http://{}", raw)
        };
        Url::parse(&raw).with_context(|| format!("Invalid Elasticsearch URL: {}", raw))
    }
}

// ---------------------------------------------------------------------------
// Raw REST responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    hits: RawSearchHits,
}

#[derive(Debug, Deserialize)]
struct RawSearchHits {
    total: Option<RawHitsTotal>,
    #[serde(default)]
    hits: Vec<RawSearchHit>,
}

/// Older nodes report a bare number, newer ones `{ "value": n, "relation": "eq" }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHitsTotal {
    Count(u64),
    Object { value: u64 },
}

impl RawHitsTotal {
    fn value(&self) -> u64 {
        match self {
            RawHitsTotal::Count(value) | RawHitsTotal::Object { value } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSearchHit {
    #[serde(rename = "_id")]
    id: Option<String>,

    #[serde(rename = "_source")]
    source: Option<Map<String, Value>>,

    highlight: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct RawWriteResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawAcknowledgedResponse {
    #[serde(default)]
    acknowledged: bool,
}

#[derive(Debug, Deserialize)]
struct RawGetResponse {
    #[serde(default)]
    found: bool,

    #[serde(rename = "_source")]
    source: Option<Box<RawValue>>,
}

fn parse_get_response(body: &[u8]) -> Result<Option<String>, EngineError> {
    let raw: RawGetResponse = serde_json::from_slice(body)?;
    Ok(raw
        .source
        .filter(|_| raw.found)
        .map(|source| source.get().to_string()))
}

fn parse_search_response(status: u16, body: &[u8]) -> Result<EngineSearchResponse, EngineError> {
    let raw: RawSearchResponse = serde_json::from_slice(body)?;

    Ok(EngineSearchResponse {
        status,
        total_hits: raw.hits.total.as_ref().map_or(0, RawHitsTotal::value),
        hits: raw
            .hits
            .hits
            .into_iter()
            .map(|hit| EngineHit {
                id: hit.id.unwrap_or_default(),
                source: hit.source.unwrap_or_default(),
                highlight: hit.highlight.unwrap_or_default(),
            })
            .collect(),
    })
}

fn is_already_exists_error(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["type"].as_str().map(str::to_string))
        .is_some_and(|t| t == "resource_already_exists_exception")
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Elasticsearch REST client
pub struct ElasticsearchClient {
    http: reqwest::Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
}

impl ElasticsearchClient {
    pub fn new(config: ElasticsearchConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        tracing::info!(url = %config.url, "Elasticsearch client configured");

        Ok(Self {
            http,
            base_url: config.url,
            username: config.username,
            password: config.password,
        })
    }

    /// Base URL with the given path segments appended (each one escaped)
    fn endpoint(&self, segments: &[&str]) -> Result<Url, EngineError> {
        build_endpoint(&self.base_url, segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.username {
            Some(username) => builder.basic_auth(username, self.password.as_deref()),
            None => builder,
        }
    }

    async fn unexpected(response: Response) -> EngineError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        EngineError::UnexpectedStatus { status, body }
    }

    async fn acknowledged(response: Response) -> Result<bool, EngineError> {
        let bytes = response.bytes().await?;
        let raw: RawAcknowledgedResponse = serde_json::from_slice(&bytes)?;
        Ok(raw.acknowledged)
    }
}

fn build_endpoint(base: &Url, segments: &[&str]) -> Result<Url, EngineError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            EngineError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Typeless `/{index}/_update/{id}` for the default type, which is the only
/// form newer nodes accept. Explicit types keep the legacy typed path.
fn update_endpoint(
    base: &Url,
    index: &str,
    doc_type: &str,
    id: &str,
) -> Result<Url, EngineError> {
    if doc_type == DEFAULT_DOC_TYPE {
        build_endpoint(base, &[index, "_update", id])
    } else {
        build_endpoint(base, &[index, doc_type, id, "_update"])
    }
}

fn search_endpoint(
    base: &Url,
    scope: &SearchScope,
    query_then_fetch: bool,
) -> Result<Url, EngineError> {
    let indexes = scope.indexes.join(",");
    let types = scope.types.join(",");

    let mut url = if types.is_empty() {
        build_endpoint(base, &[indexes.as_str(), "_search"])?
    } else {
        build_endpoint(base, &[indexes.as_str(), types.as_str(), "_search"])?
    };

    if query_then_fetch {
        url.query_pairs_mut()
            .append_pair("search_type", "query_then_fetch");
    }

    Ok(url)
}

#[async_trait]
impl SearchEngine for ElasticsearchClient {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        let url = self.endpoint(&[index])?;
        let response = self.request(Method::HEAD, url).send().await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_index(&self, index: &str) -> Result<bool, EngineError> {
        let url = self.endpoint(&[index])?;
        let response = self.request(Method::PUT, url).send().await?;

        if response.status().is_success() {
            return Self::acknowledged(response).await;
        }

        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.text().await?;
            if is_already_exists_error(&body) {
                tracing::info!(index, "Index already exists, creation not acknowledged");
                return Ok(false);
            }
            return Err(EngineError::UnexpectedStatus { status: 400, body });
        }

        Err(Self::unexpected(response).await)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_index(&self, index: &str) -> Result<bool, EngineError> {
        let url = self.endpoint(&[index])?;
        let response = self.request(Method::DELETE, url).send().await?;

        match response.status() {
            s if s.is_success() => Self::acknowledged(response).await,
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[tracing::instrument(level = "debug", skip(self, source))]
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        source: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let (method, url) = match id {
            Some(id) => (Method::PUT, self.endpoint(&[index, doc_type, id])?),
            None => (Method::POST, self.endpoint(&[index, doc_type])?),
        };

        let response = self.request(method, url).json(source).send().await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let bytes = response.bytes().await?;
        let raw: RawWriteResponse = serde_json::from_slice(&bytes)?;
        Ok(raw.id)
    }

    #[tracing::instrument(level = "debug", skip(self, partial))]
    async fn update_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        partial: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let url = update_endpoint(&self.base_url, index, doc_type, id)?;
        let response = self
            .request(Method::POST, url)
            .json(&json!({ "doc": partial }))
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => {
                let bytes = response.bytes().await?;
                let raw: RawWriteResponse = serde_json::from_slice(&bytes)?;
                Ok(raw.id)
            }
            StatusCode::NOT_FOUND => Err(EngineError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            }),
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<String, EngineError> {
        let url = self.endpoint(&[index, doc_type, id])?;
        let response = self.request(Method::DELETE, url).send().await?;

        match response.status() {
            s if s.is_success() || s == StatusCode::NOT_FOUND => Ok(id.to_string()),
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<Option<String>, EngineError> {
        let url = self.endpoint(&[index, doc_type, id])?;
        let response = self.request(Method::GET, url).send().await?;

        match response.status() {
            s if s.is_success() => parse_get_response(&response.bytes().await?),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Self::unexpected(response).await),
        }
    }

    #[tracing::instrument(level = "debug", skip(self, body))]
    async fn search(
        &self,
        scope: &SearchScope,
        body: &Value,
        query_then_fetch: bool,
    ) -> Result<EngineSearchResponse, EngineError> {
        let url = search_endpoint(&self.base_url, scope, query_then_fetch)?;
        let response = self.request(Method::POST, url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %text, "Search rejected by engine");
            return Ok(EngineSearchResponse::failed(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        parse_search_response(status.as_u16(), &bytes)
    }
}
