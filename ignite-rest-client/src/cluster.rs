//! Cluster topology types.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use ignite_rest_core::command::CMD_TOPOLOGY;
use ignite_rest_core::{Command, IgniteError, Result};

use crate::connection::RestConnection;

/// An immutable snapshot of one cluster member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNode {
    node_id: Uuid,
    #[serde(default)]
    attributes: HashMap<String, Value>,
}

impl ClusterNode {
    /// Returns the node identifier.
    pub fn node_id(&self) -> Uuid {
        self.node_id
    }

    /// Returns all node attributes.
    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Returns one attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Fetches the current topology snapshot with node attributes.
pub(crate) async fn fetch_topology(connection: &RestConnection) -> Result<Vec<ClusterNode>> {
    let command = Command::new(CMD_TOPOLOGY)
        .param("attr", "true")
        .param("mtr", "false");

    let payload = connection.execute(&command).await?;
    let nodes: Vec<ClusterNode> = serde_json::from_value(payload)
        .map_err(|e| IgniteError::Protocol(format!("malformed topology payload: {e}")))?;

    if nodes.is_empty() {
        return Err(IgniteError::Protocol("empty cluster topology".to_string()));
    }

    Ok(nodes)
}
