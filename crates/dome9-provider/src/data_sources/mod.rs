//! Read-only data sources

pub mod awp_azure_onboarding_data;
pub mod cloudaccount_k8s;
pub mod ip_list;

pub use awp_azure_onboarding_data::AwpAzureOnboardingDataSource;
pub use cloudaccount_k8s::CloudAccountK8sDataSource;
pub use ip_list::IpListDataSource;

use crate::error::Result;
use crate::resource::ResourceData;

/// Lookup key of a data source: the `id` attribute, or the record id
pub(crate) fn lookup_id(d: &ResourceData) -> Result<String> {
    match d.get_as::<String>("id")? {
        Some(id) if !id.is_empty() => Ok(id),
        _ => crate::resource::require_id(d),
    }
}
