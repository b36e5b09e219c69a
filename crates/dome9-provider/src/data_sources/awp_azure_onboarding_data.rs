//! `dome9_awp_azure_onboarding_data` data source
//!
//! Values an Azure template needs before AWP can be enabled: the scanner
//! application's client id and the region the scanners run in.

use crate::error::Result;
use crate::resource::{DataSource, ResourceData};
use async_trait::async_trait;
use dome9_sdk::Client;
use dome9_sdk::services::awp_azure_onboarding::OnboardingDataResponse;
use serde_json::{Map, Value, json};

pub const TYPE_NAME: &str = "dome9_awp_azure_onboarding_data";

pub struct AwpAzureOnboardingDataSource;

#[async_trait]
impl DataSource for AwpAzureOnboardingDataSource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let cloud_account_id: String = d.require("cloud_account_id")?;
        let centralized_id: String = d
            .get_as("centralized_cloud_account_id")?
            .unwrap_or_default();

        tracing::info!(
            "Getting AWP Azure onboarding data for cloud account {}",
            cloud_account_id
        );
        let resp = client
            .awp_azure_onboarding()
            .get_onboarding_data(&cloud_account_id, &centralized_id)
            .await?;

        d.set_id(resp.cloud_account_id.clone());
        d.set_all(flatten_onboarding_data(&resp));
        Ok(())
    }
}

pub fn flatten_onboarding_data(resp: &OnboardingDataResponse) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("region".into(), json!(resp.region));
    m.insert("app_client_id".into(), json!(resp.app_client_id));
    m.insert("cloud_account_id".into(), json!(resp.cloud_account_id));
    m.insert(
        "centralized_cloud_account_id".into(),
        json!(resp.centralized_cloud_account_id),
    );
    m
}
