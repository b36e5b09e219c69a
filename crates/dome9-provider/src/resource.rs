//! Flat attribute record and the handler traits
//!
//! The configuration engine hands every handler a [`ResourceData`]: the
//! resource identifier, the planned attribute values and (on update) the prior
//! state used for change detection. Handlers mutate it in place; an empty
//! identifier means the resource is absent.

use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dome9_sdk::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Textual layout for every timestamp exposed as an attribute
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a remote timestamp the way attributes carry it (empty when unset)
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|t| t.format(TIME_LAYOUT).to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Remote identifier; empty while the resource is absent
    #[serde(default)]
    id: String,

    /// Planned (before a call) or current (after a call) attribute values
    #[serde(default)]
    attributes: Map<String, Value>,

    /// Last known state, compared against `attributes` by [`Self::has_change`]
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    prior: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            attributes,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the prior state an update is diffed against
    pub fn with_prior(mut self, prior: Map<String, Value>) -> Self {
        self.prior = prior;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the resource absent
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_present(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }

    /// Raw attribute value; `null` counts as unset
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Decode an optional attribute
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|v| {
                serde_json::from_value(v.clone())
                    .map_err(|e| ProviderError::invalid_attribute(key, e))
            })
            .transpose()
    }

    /// Decode an attribute of the prior state
    pub fn prior_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.prior
            .get(key)
            .filter(|v| !v.is_null())
            .map(|v| {
                serde_json::from_value(v.clone())
                    .map_err(|e| ProviderError::invalid_attribute(key, e))
            })
            .transpose()
    }

    /// Decode a required attribute
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.get_as(key)?
            .ok_or_else(|| ProviderError::MissingAttribute(key.to_string()))
    }

    /// List attribute; unset reads as empty
    pub fn get_list(&self, key: &str) -> Result<Vec<Value>> {
        Ok(self.get_as(key)?.unwrap_or_default())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<()> {
        self.attributes
            .insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Overwrite every attribute present in `values`
    pub fn set_all(&mut self, values: Map<String, Value>) {
        self.attributes.extend(values);
    }

    /// Whether the planned value differs from the prior state
    pub fn has_change(&self, key: &str) -> bool {
        let prior = self.prior.get(key).filter(|v| !v.is_null());
        self.get(key) != prior
    }
}

/// Create/Read/Update/Delete handler for one resource type
#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource type name (e.g. "dome9_ip_list")
    fn type_name(&self) -> &'static str;

    /// Create the remote object and assign the identifier
    async fn create(&self, client: &Client, d: &mut ResourceData) -> Result<()>;

    /// Refresh attributes; clears the identifier when the object is gone
    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()>;

    /// Apply changed attributes to the remote object
    async fn update(&self, client: &Client, d: &mut ResourceData) -> Result<()>;

    /// Delete the remote object; already gone counts as success
    async fn delete(&self, client: &Client, d: &mut ResourceData) -> Result<()>;
}

/// Read-only lookup
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()>;
}

/// Turn "object not found" on read into a dropped resource
///
/// Returns `Ok(None)` after clearing the identifier, so the caller can stop.
pub(crate) fn found_or_drop<T>(
    d: &mut ResourceData,
    type_name: &str,
    result: dome9_sdk::Result<T>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_object_not_found() => {
            tracing::warn!(
                "Removing {} {} from state because it no longer exists in Dome9",
                type_name,
                d.id()
            );
            d.clear_id();
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Treat "object not found" on delete as already deleted
pub(crate) fn deleted_or_gone(
    d: &mut ResourceData,
    type_name: &str,
    result: dome9_sdk::Result<()>,
) -> Result<()> {
    match result {
        Ok(()) => {}
        Err(e) if e.is_object_not_found() => {
            tracing::info!("{} {} was already deleted", type_name, d.id());
        }
        Err(e) => return Err(e.into()),
    }
    d.clear_id();
    Ok(())
}

/// The identifier of a present resource, or a validation error
pub(crate) fn require_id(d: &ResourceData) -> Result<String> {
    if d.is_present() {
        Ok(d.id().to_string())
    } else {
        Err(ProviderError::Api(dome9_sdk::Dome9Error::MissingParameter("id")))
    }
}

/// Numeric identifier (stringified in state)
pub(crate) fn numeric_id(d: &ResourceData) -> Result<i64> {
    let id = require_id(d)?;
    id.parse().map_err(|e: std::num::ParseIntError| ProviderError::InvalidId {
        reason: e.to_string(),
        id,
    })
}
