//! Compute proxy: script execution and map/reduce over the cluster.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use ignite_rest_core::command::{
    CMD_AFFINITY_CALL, CMD_AFFINITY_RUN, CMD_MAP_REDUCE, CMD_RUN_SCRIPT,
};
use ignite_rest_core::{Command, Result};

use crate::cluster::{self, ClusterNode};
use crate::connection::RestConnection;

/// One scripted job targeted at a cluster node, produced by a mapper.
#[derive(Debug, Clone)]
pub struct ScriptJob {
    func: String,
    args: Vec<Value>,
}

impl ScriptJob {
    /// Creates a job running `func` with no arguments.
    pub fn new(func: impl Into<String>) -> Self {
        Self {
            func: func.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

#[derive(Serialize)]
struct ArgBody<'a> {
    arg: &'a [Value],
}

#[derive(Serialize)]
struct SingleArgBody<'a> {
    arg: &'a Value,
}

/// A proxy for the compute facilities of the connected node.
#[derive(Debug)]
pub struct Compute {
    connection: Arc<RestConnection>,
}

impl Compute {
    pub(crate) fn new(connection: Arc<RestConnection>) -> Self {
        Self { connection }
    }

    /// Runs a script on the node and returns its result.
    pub async fn run(&self, func: &str, args: &[Value]) -> Result<Value> {
        let command = Command::new(CMD_RUN_SCRIPT)
            .param("func", func)
            .post_json(&ArgBody { arg: args })?;
        self.connection.execute(&command).await
    }

    /// Runs a script on the node owning the key's partition, discarding the
    /// result.
    pub async fn affinity_run(&self, cache_name: &str, key: &str, func: &str) -> Result<()> {
        let command = Command::new(CMD_AFFINITY_RUN)
            .param("cacheName", cache_name)
            .param("key", key)
            .param("func", func);
        self.connection.execute(&command).await?;
        Ok(())
    }

    /// Runs a script on the node owning the key's partition and returns its
    /// result.
    pub async fn affinity_call(&self, cache_name: &str, key: &str, func: &str) -> Result<Value> {
        let command = Command::new(CMD_AFFINITY_CALL)
            .param("cacheName", cache_name)
            .param("key", key)
            .param("func", func);
        self.connection.execute(&command).await
    }

    /// Executes a scripted map/reduce task on the server side.
    ///
    /// `map_src` splits the argument into per-node jobs; `reduce_src` folds
    /// the job results into the returned value. Both scripts run inside the
    /// cluster.
    pub async fn execute(&self, map_src: &str, reduce_src: &str, arg: &Value) -> Result<Value> {
        let command = Command::new(CMD_MAP_REDUCE)
            .param("map", map_src)
            .param("reduce", reduce_src)
            .post_json(&SingleArgBody { arg })?;
        self.connection.execute(&command).await
    }

    /// Orchestrates a map/reduce round trip from the client side.
    ///
    /// `mapper` is invoked once per cluster node and may return a job for
    /// that node (or `None` to skip it); each job is submitted as a script
    /// run, and `reducer` folds the collected results. Jobs run
    /// sequentially; a failed job aborts the round and its error is
    /// returned.
    pub async fn map_reduce<M, R, T>(&self, mapper: M, reducer: R, arg: &Value) -> Result<T>
    where
        M: Fn(&ClusterNode, &Value) -> Option<ScriptJob>,
        R: FnOnce(Vec<Value>) -> T,
    {
        let nodes = cluster::fetch_topology(&self.connection).await?;
        debug!(nodes = nodes.len(), "mapping jobs over topology");

        let mut results = Vec::new();
        for node in &nodes {
            if let Some(job) = mapper(node, arg) {
                results.push(self.run(&job.func, &job.args).await?);
            }
        }

        Ok(reducer(results))
    }
}
