//! The top-level client facade.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use ignite_rest_core::command::{
    CMD_DESTROY_CACHE, CMD_GET_OR_CREATE_CACHE, CMD_NAME, CMD_VERSION,
};
use ignite_rest_core::{Command, IgniteError, Result};

use crate::cache::Cache;
use crate::cluster::{self, ClusterNode};
use crate::compute::Compute;
use crate::config::ClientConfig;
use crate::connection::{self, RestConnection};

/// A client bound to one reachable node of the cluster.
///
/// Created by [`connect`](Self::connect), which races a probe against every
/// configured endpoint and binds to the first that answers. The client is
/// cheap to share: cache and compute proxies hold a reference to the same
/// underlying connection.
#[derive(Debug, Clone)]
pub struct IgniteClient {
    connection: Arc<RestConnection>,
}

impl IgniteClient {
    /// Connects to the first reachable node among the configured addresses.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let connection = connection::bootstrap(&config).await?;
        info!(endpoint = %connection.endpoint(), "client connected");
        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Returns a proxy for the named cache without touching the server.
    pub fn cache<K, V>(&self, name: &str) -> Cache<K, V>
    where
        K: Serialize + DeserializeOwned + Send + Sync,
        V: Serialize + DeserializeOwned + Send + Sync,
    {
        Cache::new(name.to_string(), Arc::clone(&self.connection))
    }

    /// Ensures the named cache exists on the server and returns a proxy for
    /// it.
    pub async fn get_or_create_cache<K, V>(&self, name: &str) -> Result<Cache<K, V>>
    where
        K: Serialize + DeserializeOwned + Send + Sync,
        V: Serialize + DeserializeOwned + Send + Sync,
    {
        let command = Command::new(CMD_GET_OR_CREATE_CACHE).param("cacheName", name);
        self.connection.execute(&command).await?;
        Ok(self.cache(name))
    }

    /// Destroys the named cache on the server.
    pub async fn destroy_cache(&self, name: &str) -> Result<()> {
        let command = Command::new(CMD_DESTROY_CACHE).param("cacheName", name);
        self.connection.execute(&command).await?;
        Ok(())
    }

    /// Returns a compute proxy for the connected node.
    pub fn compute(&self) -> Compute {
        Compute::new(Arc::clone(&self.connection))
    }

    /// Returns the server version string.
    pub async fn version(&self) -> Result<String> {
        let payload = self.connection.execute(&Command::new(CMD_VERSION)).await?;
        payload
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| IgniteError::Protocol(format!("expected version string, got {payload}")))
    }

    /// Returns the grid name, or `None` when the grid is unnamed.
    pub async fn name(&self) -> Result<Option<String>> {
        let payload = self.connection.execute(&Command::new(CMD_NAME)).await?;
        match payload.as_str() {
            Some(name) if !name.is_empty() => Ok(Some(name.to_string())),
            _ => Ok(None),
        }
    }

    /// Returns a snapshot of the cluster topology.
    pub async fn cluster(&self) -> Result<Vec<ClusterNode>> {
        cluster::fetch_topology(&self.connection).await
    }

    /// Returns the endpoint this client is bound to, as `host:port`.
    pub fn endpoint(&self) -> String {
        self.connection.endpoint().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IgniteClient>();
    }
}
