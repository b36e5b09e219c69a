//! Dome9 / CloudGuard API client SDK
//!
//! Typed services over the Dome9 REST API, used by the provider's resource
//! handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  services (iplist, integrations, users, ...) │
//! └───────────────┬──────────────────────────────┘
//!                 │ Request / decoded T
//! ┌───────────────▼──────────────────────────────┐
//! │  Client  (status -> Dome9Error, retry)       │
//! └───────────────┬──────────────────────────────┘
//!                 │ trait Transport
//! ┌───────────────▼───────────┐  ┌───────────────┐
//! │  HttpTransport (reqwest)  │  │ MockTransport │
//! └───────────────────────────┘  └───────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dome9_sdk::{Client, HttpConfig};
//!
//! let client = Client::from_config(HttpConfig::new("access-id", "secret"))?;
//! let list = client.ip_lists().get(42).await?;
//! ```

pub mod client;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod retry;
pub mod services;

pub use client::{Client, Request, Response, Transport};
pub use error::{Dome9Error, ErrorResponse, Result};
pub use http::{HttpConfig, HttpTransport};
pub use retry::{Backoff, RetryPolicy};
