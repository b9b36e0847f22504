//! Asynchronous HTTP client for the Apache Ignite REST API.
//!
//! The client binds to one reachable node of the cluster and exposes typed
//! cache proxies, paged SQL queries, and script-based compute on top of the
//! node's REST endpoint.
//!
//! # Quickstart
//!
//! ```no_run
//! use ignite_rest_client::{ClientConfig, IgniteClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .address("127.0.0.1:8000..9000")
//!         .build()?;
//!     let client = IgniteClient::connect(config).await?;
//!
//!     let cache = client.get_or_create_cache::<String, String>("my-cache").await?;
//!     cache.put(&"key".to_string(), &"value".to_string()).await?;
//!     println!("{:?}", cache.get(&"key".to_string()).await?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod cache;
mod client;
pub mod cluster;
pub mod compute;
pub mod config;
pub mod connection;
pub mod query;

pub use cache::{Cache, CacheEntry};
pub use client::IgniteClient;
pub use cluster::ClusterNode;
pub use compute::{Compute, ScriptJob};
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use query::{Query, QueryCursor, QueryKind};

pub use ignite_rest_core as core;
pub use ignite_rest_core::{IgniteError, Result};
