//! Kubernetes cloud account service (`KubernetesAccount`)

use crate::client::{Client, Request};
use crate::error::{Dome9Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const K8S_RESOURCE_PATH: &str = "KubernetesAccount";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudAccountK8sResponse {
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub vendor: String,
    pub organizational_unit_id: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub organizational_unit_path: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub organizational_unit_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub cluster_version: String,
}

pub struct CloudAccountK8sService<'a> {
    client: &'a Client,
}

impl<'a> CloudAccountK8sService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<CloudAccountK8sResponse> {
        if id.is_empty() {
            return Err(Dome9Error::MissingParameter("id"));
        }

        let path = format!("{}/{}", K8S_RESOURCE_PATH, id);
        self.client.send_json(Request::get(path)).await
    }
}
