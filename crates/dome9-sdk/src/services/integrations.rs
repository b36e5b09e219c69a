//! Integration service (`integration`)
//!
//! Get and delete go through the integration retry policy: the API sometimes
//! answers with a 5xx shortly after an integration was written.

use crate::client::{Client, Request};
use crate::error::{Dome9Error, Result};
use crate::retry::{RetryPolicy, retry, retry_on_server_error};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

const INTEGRATION_RESOURCE_PATH: &str = "integration";

/// Kind of external system an integration talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationType {
    #[serde(rename = "SNS")]
    Sns,
    Email,
    PagerDuty,
    AwsSecurityHub,
    AzureDefender,
    GcpSecurityCommandCenter,
    Webhook,
    ServiceNow,
    Splunk,
    Jira,
    SumoLogic,
    QRadar,
    Slack,
    Teams,
}

impl IntegrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationType::Sns => "SNS",
            IntegrationType::Email => "Email",
            IntegrationType::PagerDuty => "PagerDuty",
            IntegrationType::AwsSecurityHub => "AwsSecurityHub",
            IntegrationType::AzureDefender => "AzureDefender",
            IntegrationType::GcpSecurityCommandCenter => "GcpSecurityCommandCenter",
            IntegrationType::Webhook => "Webhook",
            IntegrationType::ServiceNow => "ServiceNow",
            IntegrationType::Splunk => "Splunk",
            IntegrationType::Jira => "Jira",
            IntegrationType::SumoLogic => "SumoLogic",
            IntegrationType::QRadar => "QRadar",
            IntegrationType::Slack => "Slack",
            IntegrationType::Teams => "Teams",
        }
    }
}

impl std::fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IntegrationType {
    type Err = Dome9Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| Dome9Error::InvalidRequest(format!("unknown integration type: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationPostRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub configuration: Box<RawValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationUpdateRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub configuration: Box<RawValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationView {
    pub id: String,
    pub name: String,
    /// Kept as text so types added by the API later still decode
    #[serde(rename = "type")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub integration_type: String,
    #[serde(default)]
    #[serde(deserialize_with = "super::null_as_default")]
    pub created_at: String,
    pub configuration: Box<RawValue>,
}

pub struct IntegrationService<'a> {
    client: &'a Client,
}

impl<'a> IntegrationService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, body: &IntegrationPostRequest) -> Result<IntegrationView> {
        let request = Request::post(INTEGRATION_RESOURCE_PATH).with_json(body)?;
        self.client.send_json(request).await
    }

    pub async fn get_all(&self) -> Result<Vec<IntegrationView>> {
        self.client
            .send_json(Request::get(INTEGRATION_RESOURCE_PATH))
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<IntegrationView> {
        if id.is_empty() {
            return Err(Dome9Error::MissingParameter("id"));
        }

        let client = self.client;
        let path = format!("{}/{}", INTEGRATION_RESOURCE_PATH, id);
        retry(
            "get integration",
            &RetryPolicy::INTEGRATION,
            || client.send_json(Request::get(path.clone())),
            retry_on_server_error,
        )
        .await
    }

    pub async fn get_by_type(&self, integration_type: &str) -> Result<Vec<IntegrationView>> {
        if integration_type.is_empty() {
            return Err(Dome9Error::MissingParameter("integrationType"));
        }

        let request = Request::get(INTEGRATION_RESOURCE_PATH)
            .with_query(&TypeQuery { integration_type })?;
        self.client.send_json(request).await
    }

    pub async fn update(&self, body: &IntegrationUpdateRequest) -> Result<IntegrationView> {
        if body.id.is_empty() {
            return Err(Dome9Error::MissingParameter("id"));
        }

        let request = Request::put(INTEGRATION_RESOURCE_PATH).with_json(body)?;
        self.client.send_json(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Dome9Error::MissingParameter("id"));
        }

        let client = self.client;
        let path = format!("{}/{}", INTEGRATION_RESOURCE_PATH, id);
        retry(
            "delete integration",
            &RetryPolicy::INTEGRATION,
            || client.execute(Request::delete(path.clone())),
            retry_on_server_error,
        )
        .await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct TypeQuery<'a> {
    #[serde(rename = "type")]
    integration_type: &'a str,
}
