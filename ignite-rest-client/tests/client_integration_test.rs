//! Node-level client operations. Skipped when no node is reachable.

mod common;

use ignite_rest_client::IgniteClient;

#[tokio::test]
async fn test_version_is_non_empty() {
    if common::skip_if_no_cluster() {
        return;
    }
    let client = IgniteClient::connect(common::default_config()).await.unwrap();
    let version = client.version().await.unwrap();
    assert!(!version.is_empty());
}

#[tokio::test]
async fn test_grid_name() {
    if common::skip_if_no_cluster() {
        return;
    }
    let client = IgniteClient::connect(common::default_config()).await.unwrap();
    // Either named or unnamed is valid; the call must succeed.
    client.name().await.unwrap();
}

#[tokio::test]
async fn test_topology_has_at_least_one_node() {
    if common::skip_if_no_cluster() {
        return;
    }
    let client = IgniteClient::connect(common::default_config()).await.unwrap();
    let nodes = client.cluster().await.unwrap();
    assert!(!nodes.is_empty());
    for node in &nodes {
        assert!(!node.node_id().is_nil());
    }
}
