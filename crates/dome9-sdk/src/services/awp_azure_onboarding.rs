//! Agentless workload protection (AWP) onboarding for Azure subscriptions
//!
//! Enabling AWP right after the subscription was onboarded to Dome9 commonly
//! returns 404 until the cloud account becomes visible to the workload
//! service, so creation is retried on 404.

use crate::client::{Client, Request};
use crate::error::{Dome9Error, Result};
use crate::retry::{RetryPolicy, retry, retry_on_not_found};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const AWP_AZURE_ONBOARDING_DATA_PATH: &str = "workload/agentless/azure/terraform";
const AZURE_ONBOARDING_RESOURCE_PATH: &str = "workload/agentless/azure/accounts";
const CLOUD_ACCOUNTS_PATH: &str = "AzureCloudAccount";

/// Where the agentless scanners run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanMode {
    #[default]
    InAccount,
    Saas,
    InAccountHub,
    InAccountSub,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::InAccount => "inAccount",
            ScanMode::Saas => "saas",
            ScanMode::InAccountHub => "inAccountHub",
            ScanMode::InAccountSub => "inAccountSub",
        }
    }

    /// Enable endpoint suffix for this scan mode
    fn enable_action(&self) -> &'static str {
        match self {
            ScanMode::InAccountSub => "enableSubAccount",
            ScanMode::InAccountHub => "enableCentralizedAccount",
            _ => "enable",
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScanMode {
    type Err = Dome9Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| Dome9Error::InvalidRequest(format!("unknown scan mode: {}", s)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentlessAccountSettings {
    #[serde(deserialize_with = "super::null_as_default")]
    pub disabled_regions: Vec<String>,
    pub scan_machine_interval_in_hours: i64,
    pub max_concurrence_scans_per_region: i64,
    pub skip_function_apps_scan: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub custom_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAwpOnboardingRequest {
    pub centralized_cloud_account_id: String,
    pub scan_mode: ScanMode,
    pub is_terraform: bool,
    pub agentless_account_settings: Option<AgentlessAccountSettings>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOptions {
    #[serde(rename = "shouldCreatePolicy")]
    pub should_create_policy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountIssues {
    #[serde(default)]
    #[serde(deserialize_with = "super::null_as_default")]
    pub regions: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub account: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAwpOnboardingResponse {
    pub agentless_account_settings: Option<AgentlessAccountSettings>,
    pub missing_awp_private_network_regions: Option<Vec<String>>,
    pub account_issues: Option<AccountIssues>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub cloud_account_id: String,
    pub agentless_protection_enabled: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub scan_mode: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub provider: String,
    pub should_update: bool,
    pub is_org_onboarding: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub centralized_cloud_account_id: String,
}

/// Values the onboarding template needs to grant AWP access
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OnboardingDataResponse {
    #[serde(deserialize_with = "super::null_as_default")]
    pub region: String,
    #[serde(rename = "appClientId")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub app_client_id: String,
    #[serde(rename = "CloudAccountId")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub cloud_account_id: String,
    #[serde(rename = "CentralizedCloudAccountId")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub centralized_cloud_account_id: String,
}

#[derive(Serialize)]
struct OnboardingDataQuery<'a> {
    #[serde(rename = "centralizedId")]
    centralized_id: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudAccountResponse {
    pub id: String,
    pub vendor: String,
    pub name: String,
    pub external_account_number: String,
    pub creation_date: String,
    pub organizational_unit_path: String,
    pub organizational_unit_name: String,
}

pub struct AwpAzureOnboardingService<'a> {
    client: &'a Client,
}

impl<'a> AwpAzureOnboardingService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Enable AWP for the cloud account `id`
    pub async fn create_awp_onboarding(
        &self,
        id: &str,
        req: &CreateAwpOnboardingRequest,
        options: &CreateOptions,
    ) -> Result<()> {
        let path = format!(
            "{}/{}/{}",
            AZURE_ONBOARDING_RESOURCE_PATH,
            id,
            req.scan_mode.enable_action()
        );
        let request = Request::post(path).with_query(options)?.with_json(req)?;

        let client = self.client;
        retry(
            "create AWP Onboarding",
            &RetryPolicy::ONBOARDING_CREATE,
            || client.execute(request.clone()),
            retry_on_not_found,
        )
        .await?;
        Ok(())
    }

    pub async fn get_awp_onboarding(
        &self,
        cloud_provider: &str,
        id: &str,
    ) -> Result<GetAwpOnboardingResponse> {
        let path = format!("workload/agentless/{}/accounts/{}", cloud_provider, id);
        self.client.send_json(Request::get(path)).await
    }

    pub async fn delete_awp_onboarding(&self, id: &str) -> Result<()> {
        let path = format!("{}/{}", AZURE_ONBOARDING_RESOURCE_PATH, id);
        self.client.execute(Request::delete(path)).await?;
        Ok(())
    }

    pub async fn get_onboarding_data(
        &self,
        id: &str,
        centralized_id: &str,
    ) -> Result<OnboardingDataResponse> {
        let path = format!("{}/{}/onboarding", AWP_AZURE_ONBOARDING_DATA_PATH, id);
        let request = Request::get(path).with_query(&OnboardingDataQuery { centralized_id })?;
        self.client.send_json(request).await
    }

    /// Resolve a subscription id to the Dome9 cloud account id
    pub async fn get_cloud_account_id(&self, external_account_id: &str) -> Result<String> {
        let path = format!("{}/{}", CLOUD_ACCOUNTS_PATH, external_account_id);
        tracing::debug!("GetCloudAccountId path: {}", path);
        let account: CloudAccountResponse = self.client.send_json(Request::get(path)).await?;
        Ok(account.id)
    }

    pub async fn update_settings(
        &self,
        cloud_provider: &str,
        id: &str,
        settings: &AgentlessAccountSettings,
    ) -> Result<()> {
        let path = format!(
            "workload/agentless/{}/accounts/{}/settings",
            cloud_provider, id
        );
        self.client
            .execute(Request::patch(path).with_json(settings)?)
            .await?;
        Ok(())
    }
}
