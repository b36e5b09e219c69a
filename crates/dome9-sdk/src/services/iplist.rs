//! IP list service (`iplist`)

use crate::client::{Client, Request};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const IP_LIST_RESOURCE_PATH: &str = "iplist";

/// A named, ordered set of IP addresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpList {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub items: Vec<Item>,
}

/// One IP list entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub ip: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "super::null_as_default")]
    pub comment: String,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

pub struct IpListService<'a> {
    client: &'a Client,
}

impl<'a> IpListService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, ip_list_id: i64) -> Result<IpList> {
        let path = format!("{}/{}", IP_LIST_RESOURCE_PATH, ip_list_id);
        self.client.send_json(Request::get(path)).await
    }

    pub async fn get_all(&self) -> Result<Vec<IpList>> {
        self.client
            .send_json(Request::get(IP_LIST_RESOURCE_PATH))
            .await
    }

    pub async fn create(&self, ip_list: &IpList) -> Result<IpList> {
        let request = Request::post(IP_LIST_RESOURCE_PATH).with_json(ip_list)?;
        self.client.send_json(request).await
    }

    pub async fn update(&self, ip_list_id: i64, ip_list: &IpList) -> Result<()> {
        let path = format!("{}/{}", IP_LIST_RESOURCE_PATH, ip_list_id);
        self.client
            .execute(Request::put(path).with_json(ip_list)?)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, ip_list_id: i64) -> Result<()> {
        let path = format!("{}/{}", IP_LIST_RESOURCE_PATH, ip_list_id);
        self.client.execute(Request::delete(path)).await?;
        Ok(())
    }
}
