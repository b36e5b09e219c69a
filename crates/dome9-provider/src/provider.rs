//! Provider: handler registry and dispatch by type name

use crate::data_sources::{
    AwpAzureOnboardingDataSource, CloudAccountK8sDataSource, IpListDataSource,
};
use crate::error::{ProviderError, Result};
use crate::resource::{DataSource, Resource, ResourceData};
use crate::resources::{
    AwpAzureOnboardingResource, IntegrationResource, IpListResource, UserResource,
};
use dome9_sdk::Client;
use std::collections::BTreeMap;

/// CRUD operation requested by the configuration engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

pub struct Dome9Provider {
    client: Client,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
    data_sources: BTreeMap<&'static str, Box<dyn DataSource>>,
}

impl Dome9Provider {
    /// Provider with every built-in resource and data source registered
    pub fn new(client: Client) -> Self {
        let mut provider = Self {
            client,
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        };

        provider.register_resource(Box::new(UserResource));
        provider.register_resource(Box::new(IpListResource));
        provider.register_resource(Box::new(IntegrationResource));
        provider.register_resource(Box::new(AwpAzureOnboardingResource));

        provider.register_data_source(Box::new(CloudAccountK8sDataSource));
        provider.register_data_source(Box::new(AwpAzureOnboardingDataSource));
        provider.register_data_source(Box::new(IpListDataSource));

        provider
    }

    pub fn register_resource(&mut self, resource: Box<dyn Resource>) {
        self.resources.insert(resource.type_name(), resource);
    }

    pub fn register_data_source(&mut self, data_source: Box<dyn DataSource>) {
        self.data_sources.insert(data_source.type_name(), data_source);
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    /// Registered data source type names, sorted
    pub fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        self.resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownResourceType(type_name.to_string()))
    }

    /// Run one CRUD operation of a resource type against `d`
    pub async fn apply(
        &self,
        type_name: &str,
        operation: Operation,
        d: &mut ResourceData,
    ) -> Result<()> {
        let resource = self.resource(type_name)?;
        tracing::debug!("{} {} (id: {:?})", operation, type_name, d.id());

        match operation {
            Operation::Create => resource.create(&self.client, d).await,
            Operation::Read => resource.read(&self.client, d).await,
            Operation::Update => resource.update(&self.client, d).await,
            Operation::Delete => resource.delete(&self.client, d).await,
        }
    }

    pub async fn create(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(type_name, Operation::Create, d).await
    }

    pub async fn read(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(type_name, Operation::Read, d).await
    }

    pub async fn update(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(type_name, Operation::Update, d).await
    }

    pub async fn delete(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(type_name, Operation::Delete, d).await
    }

    pub async fn read_data_source(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        let data_source = self
            .data_sources
            .get(type_name)
            .ok_or_else(|| ProviderError::UnknownDataSource(type_name.to_string()))?;
        tracing::debug!("read data source {}", type_name);
        data_source.read(&self.client, d).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dome9_sdk::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn provider(transport: &Arc<MockTransport>) -> Dome9Provider {
        Dome9Provider::new(Client::new(transport.clone()))
    }

    #[test]
    fn test_registered_types() {
        let provider = provider(&Arc::new(MockTransport::new()));

        assert_eq!(
            provider.resource_types(),
            vec![
                "dome9_awp_azure_onboarding",
                "dome9_integration",
                "dome9_ip_list",
                "dome9_users"
            ]
        );
        assert_eq!(
            provider.data_source_types(),
            vec![
                "dome9_awp_azure_onboarding_data",
                "dome9_cloudaccount_kubernetes",
                "dome9_ip_list"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_types() {
        let transport = Arc::new(MockTransport::new());
        let provider = provider(&transport);
        let mut d = ResourceData::new();

        assert!(matches!(
            provider.read("dome9_nothing", &mut d).await,
            Err(ProviderError::UnknownResourceType(ref t)) if t == "dome9_nothing"
        ));
        assert!(matches!(
            provider.read_data_source("dome9_users", &mut d).await,
            Err(ProviderError::UnknownDataSource(_))
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatches_to_handler() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(200, json!({"id": 42, "name": "office"}));
        let provider = provider(&transport);

        let mut d = ResourceData::new().with_id("42");
        provider.read("dome9_ip_list", &mut d).await.unwrap();

        assert_eq!(d.get("name"), Some(&json!("office")));
        assert_eq!(transport.requests()[0].path, "iplist/42");
    }
}
