//! Request/response model and the transport seam
//!
//! Services build a [`Request`], hand it to the [`Client`] and get either a
//! decoded body or a [`Dome9Error`]. The [`Transport`] underneath only moves
//! bytes: it returns every HTTP status as `Ok` and reserves `Err` for the case
//! where no response was received at all.

use crate::error::{Dome9Error, ErrorResponse, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// A single API call, relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query parameters taken from the fields of a serializable struct
    ///
    /// Field names (after serde renames) become parameter names; `None` fields
    /// are skipped.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        let value = serde_json::to_value(params)?;
        let serde_json::Value::Object(fields) = value else {
            return Err(Dome9Error::InvalidRequest(
                "query parameters must serialize to an object".to_string(),
            ));
        };

        for (key, value) in fields {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => self.query.push((key, s)),
                other => self.query.push((key, other.to_string())),
            }
        }
        Ok(self)
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Raw response as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Moves a [`Request`] to the API and brings back the [`Response`]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Response>;
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Dome9 API client shared by all services
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request and fail on any non-2xx status
    pub async fn execute(&self, request: Request) -> Result<Response> {
        tracing::debug!("{} {}", request.method, request.path);
        let response = self.transport.send(&request).await?;

        if !response.is_success() {
            return Err(Dome9Error::Api(error_response(&request, &response)));
        }
        Ok(response)
    }

    /// Send a request and decode the response body into `T`
    pub async fn send_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.execute(request).await?;
        response.json()
    }
}

fn error_response(request: &Request, response: &Response) -> ErrorResponse {
    let message = serde_json::from_str::<ApiErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| response.body.trim().to_string());

    ErrorResponse {
        method: request.method.to_string(),
        path: request.path.clone(),
        status: response.status,
        message,
    }
}
