//! `dome9_users` resource

use crate::error::{ProviderError, Result};
use crate::resource::{
    Resource, ResourceData, deleted_or_gone, format_timestamp, found_or_drop, require_id,
};
use async_trait::async_trait;
use dome9_sdk::Client;
use dome9_sdk::services::users::{
    IamEntityLastLeaseTime, IamSafe, IamSafeCloudAccount, Permissions, UserRequest,
    UserResponse, UserUpdate,
};
use serde_json::{Map, Value, json};

pub const TYPE_NAME: &str = "dome9_users";

pub struct UserResource;

#[async_trait]
impl Resource for UserResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn create(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let req = expand_user_request(d)?;
        tracing::info!("Creating user with request {:?}", req);
        let resp = client.users().create(&req).await?;

        tracing::info!("Created user. ID: {}", resp.id);
        d.set_id(resp.id.to_string());

        let update = expand_update_request(d)?;
        if !update.role_ids.is_empty() {
            client.users().update(d.id(), &update).await?;
        }

        self.read(client, d).await
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        let result = client.users().get(&id).await;
        let Some(resp) = found_or_drop(d, TYPE_NAME, result)? else {
            return Ok(());
        };

        tracing::debug!("Reading user {}", resp.id);
        d.set_id(resp.id.to_string());
        d.set_all(flatten_user(&resp));
        Ok(())
    }

    async fn update(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        tracing::info!("Updating user with ID: {}", id);

        if d.has_change("role_ids") {
            tracing::info!("Roles of user {} have changed", id);
            let req = expand_update_request(d)?;
            client.users().update(&id, &req).await?;
        }

        if d.has_change("is_owner") {
            let wants_owner = d.get_as::<bool>("is_owner")?.unwrap_or(false);
            let was_owner = d.prior_as::<bool>("is_owner")?.unwrap_or(false);

            if wants_owner {
                client.users().set_user_as_owner(&id).await?;
                tracing::info!("User with ID {} now is owner", id);
            } else if was_owner {
                // ownership can only be handed to another user, so the owner stays owner
                d.set("is_owner", true)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = require_id(d)?;
        tracing::info!("Deleting user ID: {}", id);
        let result = client.users().delete(&id).await;
        deleted_or_gone(d, TYPE_NAME, result)
    }
}

pub fn expand_user_request(d: &ResourceData) -> Result<UserRequest> {
    Ok(UserRequest {
        email: d.require("email")?,
        first_name: d.require("first_name")?,
        last_name: d.require("last_name")?,
        sso_enabled: d.require("is_sso_enabled")?,
    })
}

/// Role update; every permission category is sent, empty
pub fn expand_update_request(d: &ResourceData) -> Result<UserUpdate> {
    Ok(UserUpdate {
        role_ids: expand_roles(&d.get_list("role_ids")?)?,
        permissions: Permissions::default(),
    })
}

pub fn expand_roles(roles: &[Value]) -> Result<Vec<i64>> {
    roles
        .iter()
        .map(|role| {
            role.as_i64().ok_or_else(|| {
                ProviderError::invalid_attribute("role_ids", format!("{} is not an integer", role))
            })
        })
        .collect()
}

pub fn flatten_user(resp: &UserResponse) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("email".into(), json!(resp.email));
    if !resp.first_name.is_empty() {
        m.insert("first_name".into(), json!(resp.first_name));
    }
    if !resp.last_name.is_empty() {
        m.insert("last_name".into(), json!(resp.last_name));
    }
    m.insert("is_sso_enabled".into(), json!(resp.sso_enabled));
    m.insert("is_suspended".into(), json!(resp.is_suspended));
    m.insert("is_owner".into(), json!(resp.is_owner));
    m.insert("is_super_user".into(), json!(resp.is_super_user));
    m.insert("is_auditor".into(), json!(resp.is_auditor));
    m.insert("has_api_key".into(), json!(resp.has_api_key));
    m.insert("has_api_key_v1".into(), json!(resp.has_api_key_v1));
    m.insert("has_api_key_v2".into(), json!(resp.has_api_key_v2));
    m.insert("is_mfa_enabled".into(), json!(resp.is_mfa_enabled));
    m.insert("role_ids".into(), json!(resp.role_ids));
    m.insert("iam_safe".into(), flatten_iam_safe(&resp.iam_safe));
    m.insert("can_switch_role".into(), json!(resp.can_switch_role));
    m.insert("is_locked".into(), json!(resp.is_locked));
    m.insert(
        "last_login".into(),
        json!(format_timestamp(resp.last_login.as_ref())),
    );
    m.insert(
        "is_mobile_device_paired".into(),
        json!(resp.is_mobile_device_paired),
    );
    m
}

pub fn flatten_iam_safe(iam_safe: &IamSafe) -> Value {
    json!([{
        "cloud_accounts": flatten_iam_safe_cloud_accounts(&iam_safe.cloud_accounts),
    }])
}

fn flatten_iam_safe_cloud_accounts(accounts: &[IamSafeCloudAccount]) -> Vec<Value> {
    accounts
        .iter()
        .map(|account| {
            json!({
                "cloud_account_id": account.cloud_account_id,
                "name": account.name,
                "external_account_number": account.external_account_number,
                "last_lease_time": format_timestamp(account.last_lease_time.as_ref()),
                "state": account.state,
                "iam_entities": account.iam_entities,
                "iam_entities_last_lease_time":
                    flatten_iam_entities_last_lease_time(&account.iam_entities_last_lease_time),
                "cloud_account_state": account.cloud_account_state,
                "iam_entity": account.iam_entity,
            })
        })
        .collect()
}

fn flatten_iam_entities_last_lease_time(entities: &[IamEntityLastLeaseTime]) -> Vec<Value> {
    entities
        .iter()
        .map(|entity| {
            json!({
                "iam_entity": entity.iam_entity,
                "last_lease_time": format_timestamp(entity.last_lease_time.as_ref()),
            })
        })
        .collect()
}
