//! `dome9_ip_list` data source

use super::lookup_id;
use crate::error::{ProviderError, Result};
use crate::resource::{DataSource, ResourceData};
use crate::resources::ip_list::flatten_ip_list;
use async_trait::async_trait;
use dome9_sdk::Client;

pub const TYPE_NAME: &str = "dome9_ip_list";

pub struct IpListDataSource;

#[async_trait]
impl DataSource for IpListDataSource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn read(&self, client: &Client, d: &mut ResourceData) -> Result<()> {
        let id = lookup_id(d)?;
        let numeric: i64 = id.parse().map_err(|e: std::num::ParseIntError| {
            ProviderError::InvalidId {
                reason: e.to_string(),
                id: id.clone(),
            }
        })?;

        tracing::info!("Getting data for IP list with id {}", numeric);
        let resp = client.ip_lists().get(numeric).await?;
        d.set_id(resp.id.to_string());
        d.set_all(flatten_ip_list(&resp));
        Ok(())
    }
}
