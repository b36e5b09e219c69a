//! `dome9_cloudaccount_kubernetes` data source

use super::lookup_id;
use crate::error::Result;
use crate::resource::{DataSource, ResourceData, format_timestamp};
use async_trait::async_trait;
use dome9_sdk::Client;
use dome9_sdk::services::cloudaccount_k8s::CloudAccountK8sResponse;
use serde_json::{Map, Value, json};

pub const TYPE_NAME: &str = "dome9_cloudaccount_kubernetes";

const VENDOR: &str = "kubernetes";

pub struct CloudAccountK8sDataSource;

#[async_trait]
impl DataSource for CloudAccountK8sDataSource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = lookup_id(d)?;
        tracing::info!("Getting data for cloud account {} with id {}", VENDOR, id);

        let resp = client.cloud_accounts_k8s().get(&id).await?;
        d.set_id(resp.id.clone());
        d.set_all(flatten_cloud_account_k8s(&resp));
        Ok(())
    }
}

pub fn flatten_cloud_account_k8s(resp: &CloudAccountK8sResponse) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("id".into(), json!(resp.id));
    m.insert("name".into(), json!(resp.name));
    m.insert(
        "creation_date".into(),
        json!(format_timestamp(resp.creation_date.as_ref())),
    );
    m.insert("vendor".into(), json!(resp.vendor));
    m.insert(
        "organizational_unit_id".into(),
        json!(resp.organizational_unit_id.clone().unwrap_or_default()),
    );
    m.insert(
        "organizational_unit_path".into(),
        json!(resp.organizational_unit_path),
    );
    m.insert(
        "organizational_unit_name".into(),
        json!(resp.organizational_unit_name),
    );
    m.insert("cluster_version".into(), json!(resp.cluster_version));
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use dome9_sdk::mock::MockTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_read_formats_creation_date() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(
            200,
            json!({
                "id": "k8s-1",
                "name": "prod-cluster",
                "creationDate": "2022-11-30T23:59:01Z",
                "vendor": "kubernetes",
                "organizationalUnitId": null,
                "organizationalUnitPath": "",
                "organizationalUnitName": "",
                "clusterVersion": "1.27"
            }),
        );
        let client = Client::new(transport.clone());

        let mut d = ResourceData::from_attributes(
            json!({"id": "k8s-1"}).as_object().cloned().unwrap(),
        );
        CloudAccountK8sDataSource.read(&client, &mut d).await.unwrap();

        assert_eq!(d.id(), "k8s-1");
        assert_eq!(d.get("creation_date"), Some(&json!("2022-11-30 23:59:01")));
        assert_eq!(d.get("cluster_version"), Some(&json!("1.27")));
        assert_eq!(d.get("organizational_unit_id"), Some(&json!("")));
        assert_eq!(transport.requests()[0].path, "KubernetesAccount/k8s-1");
    }

    #[tokio::test]
    async fn test_missing_account_is_an_error() {
        let transport = Arc::new(MockTransport::new());
        transport.push_status(404);
        let client = Client::new(transport);

        let mut d = ResourceData::new().with_id("k8s-404");
        let err = CloudAccountK8sDataSource.read(&client, &mut d).await.unwrap_err();
        assert!(err.is_object_not_found());
    }
}
