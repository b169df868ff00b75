//! REST client for the hosted entity service

use super::types::{Predicate, SortSpec, User};
use super::EntityService;
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Client for the hosted entity API
///
/// Routes: `GET /entities/{type}`, `POST /entities/{type}/filter`,
/// `POST /entities/{type}`, `PATCH /entities/{type}/{id}`, `GET /auth/me`.
pub struct RestEntityClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestEntityClient {
    /// Create a client from backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.resolve_token(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn fetch_list(&self, req: reqwest::RequestBuilder, entity_type: &str) -> Result<Vec<Value>> {
        let response = self.authorized(req).send().await?.error_for_status()?;
        let records: Vec<Value> = response.json().await?;
        tracing::debug!("fetched {} {} record(s)", records.len(), entity_type);
        Ok(records)
    }

    /// Probe backend reachability (used by `sentinelle doctor`)
    pub async fn ping(&self) -> Result<()> {
        self.authorized(self.http.get(self.url("health")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl EntityService for RestEntityClient {
    async fn list(
        &self,
        entity_type: &str,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let mut req = self.http.get(self.url(&format!("entities/{}", entity_type)));
        if let Some(sort) = sort {
            req = req.query(&[("sort", sort.to_query())]);
        }
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit.to_string())]);
        }
        self.fetch_list(req, entity_type).await
    }

    async fn filter(
        &self,
        entity_type: &str,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let body = serde_json::json!({
            "query": predicate,
            "sort": sort.map(SortSpec::to_query),
            "limit": limit,
        });
        let req = self
            .http
            .post(self.url(&format!("entities/{}/filter", entity_type)))
            .json(&body);
        self.fetch_list(req, entity_type).await
    }

    async fn create(&self, entity_type: &str, fields: Value) -> Result<Value> {
        let req = self
            .http
            .post(self.url(&format!("entities/{}", entity_type)))
            .json(&fields);
        let response = self.authorized(req).send().await?.error_for_status()?;
        let created: Value = response.json().await?;
        tracing::info!("created {} record", entity_type);
        Ok(created)
    }

    async fn update(&self, entity_type: &str, id: &str, fields: Value) -> Result<Value> {
        let req = self
            .http
            .patch(self.url(&format!("entities/{}/{}", entity_type, id)))
            .json(&fields);
        let response = self.authorized(req).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn current_user(&self) -> Result<User> {
        let req = self.http.get(self.url("auth/me"));
        let response = self.authorized(req).send().await?.error_for_status()?;
        response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("malformed current-user response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let config = BackendConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        let client = RestEntityClient::new(&config).unwrap();
        assert_eq!(client.url("auth/me"), "http://localhost:9000/auth/me");
    }

    #[test]
    fn test_entity_urls() {
        let config = BackendConfig {
            base_url: "https://api.example.com/v1".to_string(),
            ..Default::default()
        };
        let client = RestEntityClient::new(&config).unwrap();
        assert_eq!(
            client.url("entities/Brief/filter"),
            "https://api.example.com/v1/entities/Brief/filter"
        );
    }
}
