//! Managed resource types

pub mod awp_azure_onboarding;
pub mod integration;
pub mod ip_list;
pub mod user;

pub use awp_azure_onboarding::AwpAzureOnboardingResource;
pub use integration::IntegrationResource;
pub use ip_list::IpListResource;
pub use user::UserResource;
