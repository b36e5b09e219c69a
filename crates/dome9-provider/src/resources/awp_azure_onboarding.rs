//! `dome9_awp_azure_onboarding` resource
//!
//! Enables agentless workload protection on an Azure subscription that is
//! already onboarded to Dome9. The resource id is the Dome9 cloud account id.

use crate::error::{ProviderError, Result};
use crate::resource::{Resource, ResourceData, deleted_or_gone, found_or_drop, require_id};
use async_trait::async_trait;
use dome9_sdk::Client;
use dome9_sdk::services::awp_azure_onboarding::{
    AgentlessAccountSettings, CreateAwpOnboardingRequest, CreateOptions,
    GetAwpOnboardingResponse, ScanMode,
};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

pub const TYPE_NAME: &str = "dome9_awp_azure_onboarding";

const CLOUD_PROVIDER: &str = "azure";
const DEFAULT_SCAN_INTERVAL_HOURS: i64 = 24;
const DEFAULT_MAX_CONCURRENT_SCANS: i64 = 20;

pub struct AwpAzureOnboardingResource;

#[async_trait]
impl Resource for AwpAzureOnboardingResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn create(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let service = client.awp_azure_onboarding();

        let configured: String = d.require("cloud_account_id")?;
        let cloud_account_id = service.get_cloud_account_id(&configured).await?;

        let mut req = expand_create_request(d)?;
        if !req.centralized_cloud_account_id.is_empty() {
            req.centralized_cloud_account_id = service
                .get_cloud_account_id(&req.centralized_cloud_account_id)
                .await?;
        }
        let options = CreateOptions {
            should_create_policy: d.get_as("should_create_policy")?.unwrap_or(true),
        };

        tracing::info!(
            "Creating AWP Azure onboarding for {} in {} mode",
            cloud_account_id,
            req.scan_mode
        );
        service
            .create_awp_onboarding(&cloud_account_id, &req, &options)
            .await?;

        tracing::info!("Created AWP Azure onboarding. ID: {}", cloud_account_id);
        d.set_id(cloud_account_id);
        self.read(client, d).await
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        let result = client
            .awp_azure_onboarding()
            .get_awp_onboarding(CLOUD_PROVIDER, &id)
            .await;
        let Some(resp) = found_or_drop(d, TYPE_NAME, result)? else {
            return Ok(());
        };

        d.set_all(flatten_awp_onboarding(&resp));
        Ok(())
    }

    async fn update(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;

        if d.has_change("agentless_account_settings") {
            tracing::info!("Updating agentless settings of cloud account {}", id);
            let settings = expand_agentless_account_settings(d)?.unwrap_or_default();
            client
                .awp_azure_onboarding()
                .update_settings(CLOUD_PROVIDER, &id, &settings)
                .await?;
        }

        self.read(client, d).await
    }

    async fn delete(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        tracing::info!("Deleting AWP Azure onboarding of cloud account {}", id);
        let result = client.awp_azure_onboarding().delete_awp_onboarding(&id).await;
        deleted_or_gone(d, TYPE_NAME, result)
    }
}

pub fn expand_create_request(d: &ResourceData) -> Result<CreateAwpOnboardingRequest> {
    let scan_mode = match d.get_as::<String>("scan_mode")? {
        Some(mode) => mode
            .parse::<ScanMode>()
            .map_err(|e| ProviderError::invalid_attribute("scan_mode", e))?,
        None => ScanMode::default(),
    };

    Ok(CreateAwpOnboardingRequest {
        centralized_cloud_account_id: d
            .get_as("centralized_cloud_account_id")?
            .unwrap_or_default(),
        scan_mode,
        is_terraform: true,
        agentless_account_settings: expand_agentless_account_settings(d)?,
    })
}

/// The single nested `agentless_account_settings` block, if configured
pub fn expand_agentless_account_settings(
    d: &ResourceData,
) -> Result<Option<AgentlessAccountSettings>> {
    let Some(block) = d.get_list("agentless_account_settings")?.into_iter().next() else {
        return Ok(None);
    };
    let Value::Object(block) = block else {
        return Err(ProviderError::invalid_attribute(
            "agentless_account_settings",
            "expected a single object",
        ));
    };

    let block = ResourceData::from_attributes(block);
    let custom_tags: BTreeMap<String, String> = block
        .get_as("custom_tags")
        .map_err(|e| nested("custom_tags", e))?
        .unwrap_or_default();

    Ok(Some(AgentlessAccountSettings {
        disabled_regions: block
            .get_as("disabled_regions")
            .map_err(|e| nested("disabled_regions", e))?
            .unwrap_or_default(),
        scan_machine_interval_in_hours: block
            .get_as("scan_machine_interval_in_hours")
            .map_err(|e| nested("scan_machine_interval_in_hours", e))?
            .unwrap_or(DEFAULT_SCAN_INTERVAL_HOURS),
        max_concurrence_scans_per_region: block
            .get_as("max_concurrent_scans_per_region")
            .map_err(|e| nested("max_concurrent_scans_per_region", e))?
            .unwrap_or(DEFAULT_MAX_CONCURRENT_SCANS),
        skip_function_apps_scan: block
            .get_as("skip_function_apps_scan")
            .map_err(|e| nested("skip_function_apps_scan", e))?
            .unwrap_or(false),
        custom_tags,
    }))
}

fn nested(key: &str, err: ProviderError) -> ProviderError {
    match err {
        ProviderError::InvalidAttribute { reason, .. } => ProviderError::InvalidAttribute {
            name: format!("agentless_account_settings.{key}"),
            reason,
        },
        other => other,
    }
}

pub fn flatten_awp_onboarding(resp: &GetAwpOnboardingResponse) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("cloud_account_id".into(), json!(resp.cloud_account_id));
    m.insert(
        "centralized_cloud_account_id".into(),
        json!(resp.centralized_cloud_account_id),
    );
    m.insert("scan_mode".into(), json!(resp.scan_mode));
    m.insert(
        "agentless_account_settings".into(),
        resp.agentless_account_settings
            .as_ref()
            .map(flatten_agentless_account_settings)
            .unwrap_or_else(|| json!([])),
    );
    m.insert(
        "agentless_protection_enabled".into(),
        json!(resp.agentless_protection_enabled),
    );
    m.insert("cloud_provider".into(), json!(resp.provider));
    m.insert("should_update".into(), json!(resp.should_update));
    m.insert("is_org_onboarding".into(), json!(resp.is_org_onboarding));
    m.insert(
        "missing_awp_private_network_regions".into(),
        json!(resp.missing_awp_private_network_regions.clone().unwrap_or_default()),
    );
    m
}

fn flatten_agentless_account_settings(settings: &AgentlessAccountSettings) -> Value {
    json!([{
        "disabled_regions": settings.disabled_regions,
        "scan_machine_interval_in_hours": settings.scan_machine_interval_in_hours,
        "max_concurrent_scans_per_region": settings.max_concurrence_scans_per_region,
        "skip_function_apps_scan": settings.skip_function_apps_scan,
        "custom_tags": settings.custom_tags,
    }])
}
