//! Shared helpers for integration tests.
//!
//! Cluster tests need a node with the REST endpoint listening on
//! `127.0.0.1:8080`; they skip themselves when none is reachable.

use std::net::TcpStream;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use ignite_rest_client::ClientConfig;

pub const DEFAULT_NODE_ADDRESS: &str = "127.0.0.1:8080";

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Generates a cache name unique across concurrently running test binaries.
pub fn unique_name(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, std::process::id(), n)
}

pub fn default_config() -> ClientConfig {
    ClientConfig::builder()
        .address(DEFAULT_NODE_ADDRESS)
        .build()
        .unwrap()
}

/// Returns true (and prints a notice) when no local node is reachable.
pub fn skip_if_no_cluster() -> bool {
    let reachable = DEFAULT_NODE_ADDRESS
        .parse()
        .ok()
        .and_then(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(500)).ok())
        .is_some();
    if !reachable {
        eprintln!("skipping: no node at {DEFAULT_NODE_ADDRESS}");
    }
    !reachable
}
