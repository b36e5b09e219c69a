//! Dome9 resource and data source handlers
//!
//! Each handler turns a flat [`ResourceData`] record into calls against the
//! Dome9 API through [`dome9_sdk::Client`], and maps the responses back onto
//! the record.
//!
//! - `expand_*` functions build request structs from attributes
//! - `flatten_*` functions turn responses into attribute maps
//! - "Object not found" on read clears the id; on delete it counts as success
//!
//! # Example
//!
//! ```ignore
//! use dome9_provider::{Dome9Provider, ResourceData};
//!
//! let provider = Dome9Provider::new(client);
//! let mut d = ResourceData::new().with_id("42");
//! provider.read("dome9_ip_list", &mut d).await?;
//! ```

pub mod data_sources;
pub mod error;
pub mod provider;
pub mod resource;
pub mod resources;

pub use error::{ProviderError, Result};
pub use provider::{Dome9Provider, Operation};
pub use resource::{DataSource, Resource, ResourceData, TIME_LAYOUT, format_timestamp};
