//! `dome9_ip_list` resource

use crate::error::{ProviderError, Result};
use crate::resource::{
    Resource, ResourceData, deleted_or_gone, found_or_drop, numeric_id,
};
use async_trait::async_trait;
use dome9_sdk::Client;
use dome9_sdk::services::iplist::{IpList, Item};
use serde_json::{Map, Value, json};

pub const TYPE_NAME: &str = "dome9_ip_list";

pub struct IpListResource;

#[async_trait]
impl Resource for IpListResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn create(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let req = expand_ip_list(d)?;
        tracing::info!("Creating IP list {:?}", req);
        let resp = client.ip_lists().create(&req).await?;

        tracing::info!("Created IP list. ID: {}", resp.id);
        d.set_id(resp.id.to_string());
        self.read(client, d).await
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = numeric_id(d)?;
        let result = client.ip_lists().get(id).await;
        let Some(resp) = found_or_drop(d, TYPE_NAME, result)? else {
            return Ok(());
        };

        tracing::debug!("Reading IP list {}", resp.id);
        d.set_all(flatten_ip_list(&resp));
        Ok(())
    }

    async fn update(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = numeric_id(d)?;
        tracing::info!("Updating IP list ID: {}", id);
        let req = expand_ip_list(d)?;
        client.ip_lists().update(id, &req).await?;
        self.read(client, d).await
    }

    async fn delete(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = numeric_id(d)?;
        tracing::info!("Deleting IP list ID: {}", id);
        let result = client.ip_lists().delete(id).await;
        deleted_or_gone(d, TYPE_NAME, result)
    }
}

pub fn expand_ip_list(d: &ResourceData) -> Result<IpList> {
    Ok(IpList {
        name: d.require("name")?,
        description: d.get_as("description")?.unwrap_or_default(),
        items: expand_items(&d.get_list("items")?)?,
        ..Default::default()
    })
}

fn expand_items(items: &[Value]) -> Result<Vec<Item>> {
    items
        .iter()
        .map(|item| {
            let field = |key: &str| -> Result<String> {
                match item.get(key) {
                    None | Some(Value::Null) => Ok(String::new()),
                    Some(Value::String(s)) => Ok(s.clone()),
                    Some(other) => Err(ProviderError::invalid_attribute(
                        format!("items.{key}"),
                        format!("expected a string, got {other}"),
                    )),
                }
            };
            Ok(Item {
                ip: field("ip")?,
                comment: field("comment")?,
            })
        })
        .collect()
}

pub fn flatten_ip_list(list: &IpList) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("name".into(), json!(list.name));
    m.insert("description".into(), json!(list.description));
    m.insert(
        "items".into(),
        list.items
            .iter()
            .map(|item| json!({"ip": item.ip, "comment": item.comment}))
            .collect(),
    );
    m
}
