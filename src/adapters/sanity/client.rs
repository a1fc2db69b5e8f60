//! Minimal Sanity HTTP API client.
//!
//! Queries go to `GET {data_url}/query/{dataset}` with each parameter passed
//! as a JSON-encoded `$name` query argument. Writes go to
//! `POST {data_url}/mutate/{dataset}`.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::CmsConfig;
use crate::ports::StoreError;

/// GROQ parameters, keyed without the leading `$`.
pub type QueryParams = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
}

/// Authenticated client for one project dataset.
#[derive(Clone)]
pub struct SanityClient {
    http: Client,
    data_url: String,
    dataset: String,
    token: SecretString,
}

impl SanityClient {
    pub fn new(config: &CmsConfig) -> Self {
        Self {
            http: Client::new(),
            data_url: config.data_url(),
            dataset: config.dataset.clone(),
            token: SecretString::new(config.api_token.clone()),
        }
    }

    /// Points the client at another API host (for testing).
    pub fn with_data_url(mut self, data_url: impl Into<String>) -> Self {
        self.data_url = data_url.into();
        self
    }

    /// Runs a GROQ query and decodes `result`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &QueryParams,
    ) -> Result<T, StoreError> {
        let url = format!("{}/query/{}", self.data_url, self.dataset);
        let args = query_args(query, params)?;

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .query(&args)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Sanity query failed");
            return Err(StoreError::Request(format!(
                "query returned {}",
                status.as_u16()
            )));
        }

        let decoded: QueryResponse<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(decoded.result)
    }

    /// Creates a document, returning its id.
    pub async fn create(&self, document: Value) -> Result<String, StoreError> {
        let ids = self.mutate(vec![json!({ "create": document })]).await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("create returned no document id".to_string()))
    }

    /// Sets and unsets fields on one document.
    pub async fn patch(&self, id: &str, set: Value, unset: &[&str]) -> Result<(), StoreError> {
        self.mutate(vec![patch_mutation(id, set, unset)]).await?;
        Ok(())
    }

    async fn mutate(&self, mutations: Vec<Value>) -> Result<Vec<String>, StoreError> {
        let url = format!(
            "{}/mutate/{}?returnIds=true",
            self.data_url, self.dataset
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&json!({ "mutations": mutations }))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Sanity mutation failed");
            return Err(StoreError::Request(format!(
                "mutation returned {}",
                status.as_u16()
            )));
        }

        let decoded: MutateResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(decoded.results.into_iter().map(|r| r.id).collect())
    }
}

/// Encodes the query string arguments: `query` plus one `$name` per param.
fn query_args(query: &str, params: &QueryParams) -> Result<Vec<(String, String)>, StoreError> {
    let mut args = Vec::with_capacity(params.len() + 1);
    args.push(("query".to_string(), query.to_string()));
    for (name, value) in params {
        let encoded =
            serde_json::to_string(value).map_err(|e| StoreError::Decode(e.to_string()))?;
        args.push((format!("${}", name), encoded));
    }
    Ok(args)
}

fn patch_mutation(id: &str, set: Value, unset: &[&str]) -> Value {
    let mut patch = Map::new();
    patch.insert("id".to_string(), json!(id));
    if !set.is_null() {
        patch.insert("set".to_string(), set);
    }
    if !unset.is_empty() {
        patch.insert("unset".to_string(), json!(unset));
    }
    json!({ "patch": patch })
}
