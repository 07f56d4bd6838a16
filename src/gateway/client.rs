//! HTTP client relaying validated requests to the backend

use axum::http::{HeaderValue, Method, Uri, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::GatewayError;
use crate::api::extract::SHARER_USER_HEADER;

const USER_AGENT: &str = concat!("shareit-gateway/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send the request to the same path and query on the backend and relay
    /// its status, content type and body unchanged.
    pub async fn forward(
        &self,
        method: Method,
        uri: &Uri,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> Result<Response, GatewayError> {
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        let url = format!("{}{}", self.base_url, path);

        tracing::info!("Forwarding {} {} (user {:?})", method, url, user_id);

        let mut request = self.client.request(method, &url);
        if let Some(id) = user_id {
            request = request.header(SHARER_USER_HEADER, id.to_string());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let upstream = request.send().await?;
        let status = upstream.status();
        let content_type = upstream
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        let bytes = upstream.bytes().await?;

        tracing::debug!("Backend answered {} for {}", status, url);

        let mut response = (status, bytes).into_response();
        response.headers_mut().insert(CONTENT_TYPE, content_type);
        Ok(response)
    }
}
