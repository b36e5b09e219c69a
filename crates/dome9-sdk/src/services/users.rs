//! User service (`user`)

use crate::client::{Client, Request};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const USER_RESOURCE_PATH: &str = "user";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub sso_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserResponse {
    pub id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub last_name: String,
    pub sso_enabled: bool,
    pub is_suspended: bool,
    pub is_owner: bool,
    pub is_super_user: bool,
    pub is_auditor: bool,
    pub has_api_key: bool,
    pub has_api_key_v1: bool,
    pub has_api_key_v2: bool,
    pub is_mfa_enabled: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub role_ids: Vec<i64>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub iam_safe: IamSafe,
    pub can_switch_role: bool,
    pub is_locked: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub is_mobile_device_paired: bool,
}

/// IAM Safe protection state of a user
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamSafe {
    #[serde(deserialize_with = "super::null_as_default")]
    pub cloud_accounts: Vec<IamSafeCloudAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamSafeCloudAccount {
    #[serde(deserialize_with = "super::null_as_default")]
    pub cloud_account_id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub external_account_number: String,
    pub last_lease_time: Option<DateTime<Utc>>,
    pub state: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub iam_entities: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub iam_entities_last_lease_time: Vec<IamEntityLastLeaseTime>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub cloud_account_state: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub iam_entity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamEntityLastLeaseTime {
    #[serde(deserialize_with = "super::null_as_default")]
    pub iam_entity: String,
    pub last_lease_time: Option<DateTime<Utc>>,
}

/// Role assignment update; the API rejects a partial permissions object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub role_ids: Vec<i64>,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub access: Vec<String>,
    pub manage: Vec<String>,
    pub rulesets: Vec<String>,
    pub notifications: Vec<String>,
    pub policies: Vec<String>,
    pub alert_actions: Vec<String>,
    pub create: Vec<String>,
    pub view: Vec<String>,
    pub cross_account_access: Vec<String>,
}

pub struct UserService<'a> {
    client: &'a Client,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, body: &UserRequest) -> Result<UserResponse> {
        let request = Request::post(USER_RESOURCE_PATH).with_json(body)?;
        self.client.send_json(request).await
    }

    pub async fn get(&self, id: &str) -> Result<UserResponse> {
        let path = format!("{}/{}", USER_RESOURCE_PATH, id);
        self.client.send_json(Request::get(path)).await
    }

    pub async fn update(&self, id: &str, body: &UserUpdate) -> Result<()> {
        let path = format!("{}/{}", USER_RESOURCE_PATH, id);
        self.client
            .execute(Request::put(path).with_json(body)?)
            .await?;
        Ok(())
    }

    /// Transfer account ownership to the user `id`
    pub async fn set_user_as_owner(&self, id: &str) -> Result<()> {
        let path = format!("{}/ownership/{}", USER_RESOURCE_PATH, id);
        self.client.execute(Request::put(path)).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("{}/{}", USER_RESOURCE_PATH, id);
        self.client.execute(Request::delete(path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_update_serializes_every_permission_category() {
        let update = UserUpdate {
            role_ids: vec![1, 2],
            permissions: Permissions::default(),
        };
        let value = serde_json::to_value(&update).unwrap();
        let permissions = value["permissions"].as_object().unwrap();

        assert_eq!(value["roleIds"], json!([1, 2]));
        assert_eq!(permissions.len(), 9);
        assert!(permissions.values().all(|v| v == &json!([])));
        assert!(permissions.contains_key("crossAccountAccess"));
        assert!(permissions.contains_key("alertActions"));
    }

    #[tokio::test]
    async fn test_get_decodes_iam_safe() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(
            200,
            json!({
                "id": 12,
                "email": "jane@example.com",
                "hasApiKeyV1": true,
                "roleIds": [3],
                "lastLogin": "2021-03-04T10:00:00Z",
                "iamSafe": {
                    "cloudAccounts": [{
                        "cloudAccountId": "aws-1",
                        "name": "prod",
                        "lastLeaseTime": "2021-03-04T10:00:00Z",
                        "state": true,
                        "iamEntitiesLastLeaseTime": [
                            {
                                "iamEntity": "arn:aws:iam::1:role/admin",
                                "lastLeaseTime": "2021-03-04T10:00:00Z"
                            }
                        ]
                    }]
                }
            }),
        );
        let client = Client::new(transport.clone());

        let user = UserService::new(&client).get("12").await.unwrap();
        assert_eq!(user.id, 12);
        assert!(user.has_api_key_v1);
        assert_eq!(user.role_ids, vec![3]);
        let account = &user.iam_safe.cloud_accounts[0];
        assert_eq!(account.cloud_account_id, "aws-1");
        assert_eq!(account.iam_entities_last_lease_time.len(), 1);
        assert_eq!(transport.requests()[0].path, "user/12");
    }

    #[tokio::test]
    async fn test_get_tolerates_null_fields() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(
            200,
            json!({
                "id": 12,
                "email": "jane@example.com",
                "firstName": null,
                "roleIds": null,
                "lastLogin": null,
                "iamSafe": null
            }),
        );
        transport.push_json(
            200,
            json!({
                "id": 13,
                "iamSafe": {
                    "cloudAccounts": [{
                        "cloudAccountId": "aws-1",
                        "name": null,
                        "iamEntities": null,
                        "iamEntitiesLastLeaseTime": null
                    }]
                }
            }),
        );
        let client = Client::new(transport);
        let service = UserService::new(&client);

        let user = service.get("12").await.unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.first_name, "");
        assert!(user.role_ids.is_empty());
        assert!(user.last_login.is_none());
        assert!(user.iam_safe.cloud_accounts.is_empty());

        let user = service.get("13").await.unwrap();
        let account = &user.iam_safe.cloud_accounts[0];
        assert_eq!(account.cloud_account_id, "aws-1");
        assert_eq!(account.name, "");
        assert!(account.iam_entities.is_empty());
        assert!(account.iam_entities_last_lease_time.is_empty());
    }

    #[tokio::test]
    async fn test_set_user_as_owner_path() {
        let transport = Arc::new(MockTransport::new());
        transport.push_status(204);
        let client = Client::new(transport.clone());

        UserService::new(&client).set_user_as_owner("12").await.unwrap();
        let request = &transport.requests()[0];
        assert_eq!(request.method, reqwest::Method::PUT);
        assert_eq!(request.path, "user/ownership/12");
        assert!(request.body.is_none());
    }
}
