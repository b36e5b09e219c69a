//! HTTP transport over reqwest
//!
//! Authenticates every call with the API key pair (HTTP basic auth) and sends
//! JSON to `{base_url}/{path}`.

use crate::client::{Client, Request, Response, Transport};
use crate::error::{Dome9Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.dome9.com/v2/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the Dome9 API
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub access_id: String,
    pub secret_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    access_id: String,
    secret_key: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self> {
        if config.access_id.is_empty() || config.secret_key.is_empty() {
            return Err(Dome9Error::InvalidConfig(
                "access id and secret key are required".to_string(),
            ));
        }
        if config.base_url.is_empty() {
            return Err(Dome9Error::InvalidConfig("base url is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dome9-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            access_id: config.access_id,
            secret_key: config.secret_key,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path))
            .basic_auth(&self.access_id, Some(&self.secret_key))
            .header(reqwest::header::ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(Response { status, body })
    }
}

impl Client {
    /// Client talking to the real API over HTTPS
    pub fn from_config(config: HttpConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }
}
