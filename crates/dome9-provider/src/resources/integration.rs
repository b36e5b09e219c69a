//! `dome9_integration` resource
//!
//! `configuration` is carried as JSON text and passed to the API untouched, so
//! every integration type shares one schema.

use crate::error::{ProviderError, Result};
use crate::resource::{Resource, ResourceData, deleted_or_gone, found_or_drop, require_id};
use async_trait::async_trait;
use dome9_sdk::Client;
use dome9_sdk::services::integrations::{
    IntegrationPostRequest, IntegrationType, IntegrationUpdateRequest, IntegrationView,
};
use serde_json::value::RawValue;
use serde_json::{Map, Value, json};

pub const TYPE_NAME: &str = "dome9_integration";

pub struct IntegrationResource;

#[async_trait]
impl Resource for IntegrationResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn create(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let req = expand_integration_request(d)?;
        tracing::info!(
            "Creating integration {} of type {}",
            req.name,
            req.integration_type
        );
        let resp = client.integrations().create(&req).await?;

        tracing::info!("Created integration. ID: {}", resp.id);
        d.set_id(resp.id.clone());
        d.set_all(flatten_integration(&resp));
        Ok(())
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        let result = client.integrations().get_by_id(&id).await;
        let Some(resp) = found_or_drop(d, TYPE_NAME, result)? else {
            return Ok(());
        };

        d.set_all(flatten_integration(&resp));
        Ok(())
    }

    async fn update(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        tracing::info!("Updating integration ID: {}", id);

        let req = expand_integration_request(d)?;
        let body = IntegrationUpdateRequest {
            id,
            name: req.name,
            integration_type: req.integration_type,
            configuration: req.configuration,
        };
        let resp = client.integrations().update(&body).await?;
        d.set_all(flatten_integration(&resp));
        Ok(())
    }

    async fn delete(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        tracing::info!("Deleting integration ID: {}", id);
        let result = client.integrations().delete(&id).await;
        deleted_or_gone(d, TYPE_NAME, result)
    }
}

pub fn expand_integration_request(d: &ResourceData) -> Result<IntegrationPostRequest> {
    let integration_type: String = d.require("type")?;
    let integration_type: IntegrationType = integration_type
        .parse()
        .map_err(|e| ProviderError::invalid_attribute("type", e))?;

    let configuration: String = d.require("configuration")?;
    let configuration = RawValue::from_string(configuration)
        .map_err(|e| ProviderError::invalid_attribute("configuration", e))?;

    Ok(IntegrationPostRequest {
        name: d.require("name")?,
        integration_type,
        configuration,
    })
}

pub fn flatten_integration(view: &IntegrationView) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("name".into(), json!(view.name));
    m.insert("type".into(), json!(view.integration_type));
    m.insert("configuration".into(), json!(view.configuration.get()));
    m.insert("created_at".into(), json!(view.created_at));
    m
}
