//! REST command construction.
//!
//! A [`Command`] is built once per operation by the proxies, is immutable
//! once handed to the transport, and renders as the query string
//! `cmd=<name>&<key>=<urlencoded value>...`. Operations with a payload set a
//! JSON post body, which switches the HTTP method to POST.

use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

use crate::error::{IgniteError, Result};

/// Node version probe, also used as the connection check.
pub const CMD_VERSION: &str = "version";
/// Grid name of the connected node.
pub const CMD_NAME: &str = "name";
/// Cluster topology snapshot.
pub const CMD_TOPOLOGY: &str = "top";
/// Creates a cache if it does not exist yet.
pub const CMD_GET_OR_CREATE_CACHE: &str = "getorcreatecache";
/// Stops a dynamically started cache.
pub const CMD_DESTROY_CACHE: &str = "destroycache";

/// Reads a single cache entry.
pub const CMD_CACHE_GET: &str = "get";
/// Stores a single cache entry.
pub const CMD_CACHE_PUT: &str = "put";
/// Stores an entry only if the key has no mapping yet.
pub const CMD_CACHE_PUT_IF_ABSENT: &str = "putifabs";
/// Stores an entry if absent, returning the prior value.
pub const CMD_CACHE_GET_AND_PUT_IF_ABSENT: &str = "getputifabs";
/// Removes a key.
pub const CMD_CACHE_REMOVE: &str = "rmv";
/// Removes a key only when mapped to the given value.
pub const CMD_CACHE_REMOVE_VALUE: &str = "rmvval";
/// Removes a key, returning the prior value.
pub const CMD_CACHE_GET_AND_REMOVE: &str = "getrmv";
/// Removes a set of keys (or every key when no body is given).
pub const CMD_CACHE_REMOVE_ALL: &str = "rmvall";
/// Stores a batch of entries in one request.
pub const CMD_CACHE_PUT_ALL: &str = "putall";
/// Reads a batch of entries in one request.
pub const CMD_CACHE_GET_ALL: &str = "getall";
/// Checks whether a key is mapped.
pub const CMD_CACHE_CONTAINS_KEY: &str = "conkey";
/// Checks whether every key in a set is mapped.
pub const CMD_CACHE_CONTAINS_KEYS: &str = "conkeys";
/// Stores a value, returning the prior one.
pub const CMD_CACHE_GET_AND_PUT: &str = "getput";
/// Replaces a mapped value.
pub const CMD_CACHE_REPLACE: &str = "rep";
/// Replaces a value only when currently mapped to the expected one.
pub const CMD_CACHE_REPLACE_VALUE: &str = "repval";
/// Replaces a value, returning the prior one.
pub const CMD_CACHE_GET_AND_REPLACE: &str = "getrep";
/// Number of entries in the cache.
pub const CMD_CACHE_SIZE: &str = "size";

/// Executes a SQL query and opens a server-side cursor.
pub const CMD_QUERY_EXECUTE: &str = "qryexe";
/// Executes a SQL fields query and opens a server-side cursor.
pub const CMD_QUERY_FIELDS_EXECUTE: &str = "qryfldexe";
/// Fetches the next page for an open cursor.
pub const CMD_QUERY_FETCH: &str = "qryfetch";
/// Releases a server-side cursor.
pub const CMD_QUERY_CLOSE: &str = "qrycls";

/// Runs a function on the connected node.
pub const CMD_RUN_SCRIPT: &str = "runscript";
/// Executes a map/reduce task on the server.
pub const CMD_MAP_REDUCE: &str = "excmapreduce";
/// Runs a function colocated with a key's partition.
pub const CMD_AFFINITY_RUN: &str = "affrun";
/// Calls a function colocated with a key's partition, returning its result.
pub const CMD_AFFINITY_CALL: &str = "affcall";

/// HTTP method for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read-only parameterized call.
    Get,
    /// Call carrying a JSON payload.
    Post,
}

/// A single REST operation: a command name, ordered parameters, and an
/// optional JSON post body.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    params: Vec<(String, String)>,
    post_body: Option<String>,
}

impl Command {
    /// Creates a command with the given name and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            post_body: None,
        }
    }

    /// Appends a parameter. Parameters keep their insertion order.
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Sets the JSON post body, switching the command to POST.
    pub fn post_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_string(body)
            .map_err(|e| IgniteError::Protocol(format!("failed to encode post body: {e}")))?;
        self.post_body = Some(json);
        Ok(self)
    }

    /// Returns the command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered parameter list.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns the JSON post body, if any.
    pub fn post_body(&self) -> Option<&str> {
        self.post_body.as_deref()
    }

    /// Returns POST when a post body is set, GET otherwise.
    pub fn method(&self) -> Method {
        if self.post_body.is_some() {
            Method::Post
        } else {
            Method::Get
        }
    }

    /// Renders the full query string: `cmd=<name>&<key>=<value>...` with
    /// percent-encoded keys and values.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("cmd", &self.name);
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}
