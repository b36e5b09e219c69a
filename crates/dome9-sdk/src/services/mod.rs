//! Typed Dome9 API services

pub mod awp_azure_onboarding;
pub mod cloudaccount_k8s;
pub mod integrations;
pub mod iplist;
pub mod users;

use crate::client::Client;
use serde::{Deserialize, Deserializer};
use awp_azure_onboarding::AwpAzureOnboardingService;
use cloudaccount_k8s::CloudAccountK8sService;
use integrations::IntegrationService;
use iplist::IpListService;
use users::UserService;

impl Client {
    pub fn ip_lists(&self) -> IpListService<'_> {
        IpListService::new(self)
    }

    pub fn integrations(&self) -> IntegrationService<'_> {
        IntegrationService::new(self)
    }

    pub fn awp_azure_onboarding(&self) -> AwpAzureOnboardingService<'_> {
        AwpAzureOnboardingService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn cloud_accounts_k8s(&self) -> CloudAccountK8sService<'_> {
        CloudAccountK8sService::new(self)
    }
}

/// The API sends `null` for empty lists, maps and strings
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
