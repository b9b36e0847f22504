//! Cache proxy: one high-level verb per REST command.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ignite_rest_core::command::*;
use ignite_rest_core::{Command, IgniteError, Result};

use crate::connection::RestConnection;
use crate::query::{Query, QueryCursor};

/// A key-value pair stored in a cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<K, V> {
    /// Entry key.
    pub key: K,
    /// Entry value.
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

#[derive(Serialize)]
struct KeyBody<'a, K> {
    key: &'a K,
}

#[derive(Serialize)]
struct KeyValueBody<'a, K, V> {
    key: &'a K,
    val: &'a V,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceValueBody<'a, K, V> {
    key: &'a K,
    val: &'a V,
    old_val: &'a V,
}

#[derive(Serialize)]
struct KeysBody<'a, K> {
    keys: &'a [K],
}

#[derive(Serialize)]
struct EntriesBody<'a, K, V> {
    entries: &'a [CacheEntry<K, V>],
}

/// A proxy for one named cache on the connected node.
///
/// The proxy is stateless beyond its (connection, cache name) binding; every
/// verb maps to exactly one REST command, and bulk variants batch their
/// keys or entries into a single request.
#[derive(Debug)]
pub struct Cache<K, V> {
    name: String,
    connection: Arc<RestConnection>,
    _phantom: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Cache<K, V> {
    pub(crate) fn new(name: String, connection: Arc<RestConnection>) -> Self {
        Self {
            name,
            connection,
            _phantom: PhantomData,
        }
    }

    /// Returns the cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a cursor for the given query against this cache.
    ///
    /// No request is issued until the cursor is first advanced.
    pub fn query(&self, query: Query) -> QueryCursor {
        QueryCursor::new(Arc::clone(&self.connection), self.name.clone(), query)
    }

    fn command(&self, name: &'static str) -> Command {
        Command::new(name).param("cacheName", &self.name)
    }
}

impl<K, V> Cache<K, V>
where
    K: Serialize + DeserializeOwned + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Returns the value mapped to the key, or `None` if there is no
    /// mapping.
    pub async fn get(&self, key: &K) -> Result<Option<V>> {
        let cmd = self.command(CMD_CACHE_GET).post_json(&KeyBody { key })?;
        decode_optional(self.connection.execute(&cmd).await?)
    }

    /// Stores the key-value pair.
    pub async fn put(&self, key: &K, value: &V) -> Result<()> {
        let cmd = self
            .command(CMD_CACHE_PUT)
            .post_json(&KeyValueBody { key, val: value })?;
        self.connection.execute(&cmd).await?;
        Ok(())
    }

    /// Stores the pair only if the key has no mapping yet.
    ///
    /// Returns `true` exactly when the pair was stored.
    pub async fn put_if_absent(&self, key: &K, value: &V) -> Result<bool> {
        let cmd = self
            .command(CMD_CACHE_PUT_IF_ABSENT)
            .post_json(&KeyValueBody { key, val: value })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Stores the pair only if the key has no mapping yet, returning the
    /// prior value.
    pub async fn get_and_put_if_absent(&self, key: &K, value: &V) -> Result<Option<V>> {
        let cmd = self
            .command(CMD_CACHE_GET_AND_PUT_IF_ABSENT)
            .post_json(&KeyValueBody { key, val: value })?;
        decode_optional(self.connection.execute(&cmd).await?)
    }

    /// Removes the key. Returns `true` when a mapping was removed.
    pub async fn remove(&self, key: &K) -> Result<bool> {
        let cmd = self.command(CMD_CACHE_REMOVE).post_json(&KeyBody { key })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Removes the key only when it is currently mapped to the given value.
    pub async fn remove_value(&self, key: &K, value: &V) -> Result<bool> {
        let cmd = self
            .command(CMD_CACHE_REMOVE_VALUE)
            .post_json(&KeyValueBody { key, val: value })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Removes the key, returning the prior value.
    pub async fn get_and_remove(&self, key: &K) -> Result<Option<V>> {
        let cmd = self
            .command(CMD_CACHE_GET_AND_REMOVE)
            .post_json(&KeyBody { key })?;
        decode_optional(self.connection.execute(&cmd).await?)
    }

    /// Removes every key in the batch with a single request.
    pub async fn remove_all(&self, keys: &[K]) -> Result<()> {
        let cmd = self
            .command(CMD_CACHE_REMOVE_ALL)
            .post_json(&KeysBody { keys })?;
        self.connection.execute(&cmd).await?;
        Ok(())
    }

    /// Removes every entry from the cache.
    pub async fn clear(&self) -> Result<()> {
        let cmd = self.command(CMD_CACHE_REMOVE_ALL);
        self.connection.execute(&cmd).await?;
        Ok(())
    }

    /// Stores a batch of entries with a single request.
    pub async fn put_all(&self, entries: &[CacheEntry<K, V>]) -> Result<()> {
        let cmd = self
            .command(CMD_CACHE_PUT_ALL)
            .post_json(&EntriesBody { entries })?;
        self.connection.execute(&cmd).await?;
        Ok(())
    }

    /// Reads a batch of entries with a single request. Keys without a
    /// mapping are absent from the result.
    pub async fn get_all(&self, keys: &[K]) -> Result<Vec<CacheEntry<K, V>>> {
        let cmd = self
            .command(CMD_CACHE_GET_ALL)
            .post_json(&KeysBody { keys })?;
        let payload = self.connection.execute(&cmd).await?;
        serde_json::from_value(payload)
            .map_err(|e| IgniteError::Protocol(format!("malformed getall payload: {e}")))
    }

    /// Returns whether the key has a mapping.
    pub async fn contains_key(&self, key: &K) -> Result<bool> {
        let cmd = self
            .command(CMD_CACHE_CONTAINS_KEY)
            .post_json(&KeyBody { key })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Returns whether every key in the batch has a mapping.
    pub async fn contains_keys(&self, keys: &[K]) -> Result<bool> {
        let cmd = self
            .command(CMD_CACHE_CONTAINS_KEYS)
            .post_json(&KeysBody { keys })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Stores the pair, returning the prior value.
    pub async fn get_and_put(&self, key: &K, value: &V) -> Result<Option<V>> {
        let cmd = self
            .command(CMD_CACHE_GET_AND_PUT)
            .post_json(&KeyValueBody { key, val: value })?;
        decode_optional(self.connection.execute(&cmd).await?)
    }

    /// Replaces the mapped value. Returns `true` when a mapping existed.
    pub async fn replace(&self, key: &K, value: &V) -> Result<bool> {
        let cmd = self
            .command(CMD_CACHE_REPLACE)
            .post_json(&KeyValueBody { key, val: value })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Replaces the value only when the key is currently mapped to
    /// `expected`. Returns `true` when the swap applied.
    pub async fn replace_value(&self, key: &K, value: &V, expected: &V) -> Result<bool> {
        let cmd = self.command(CMD_CACHE_REPLACE_VALUE).post_json(&ReplaceValueBody {
            key,
            val: value,
            old_val: expected,
        })?;
        decode_bool(self.connection.execute(&cmd).await?)
    }

    /// Replaces the mapped value, returning the prior one.
    pub async fn get_and_replace(&self, key: &K, value: &V) -> Result<Option<V>> {
        let cmd = self
            .command(CMD_CACHE_GET_AND_REPLACE)
            .post_json(&KeyValueBody { key, val: value })?;
        decode_optional(self.connection.execute(&cmd).await?)
    }

    /// Returns the number of entries in the cache.
    pub async fn size(&self) -> Result<u64> {
        let payload = self.connection.execute(&self.command(CMD_CACHE_SIZE)).await?;
        payload
            .as_u64()
            .ok_or_else(|| IgniteError::Protocol(format!("expected numeric size, got {payload}")))
    }
}

fn decode_optional<V: DeserializeOwned>(payload: Value) -> Result<Option<V>> {
    if payload.is_null() {
        return Ok(None);
    }
    serde_json::from_value(payload)
        .map(Some)
        .map_err(|e| IgniteError::Protocol(format!("malformed value payload: {e}")))
}

fn decode_bool(payload: Value) -> Result<bool> {
    payload
        .as_bool()
        .ok_or_else(|| IgniteError::Protocol(format!("expected boolean, got {payload}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_wire_shape() {
        let entry = CacheEntry::new("k1".to_string(), "v1".to_string());
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"key": "k1", "value": "v1"})
        );
    }

    #[test]
    fn test_decode_optional_null_is_none() {
        let decoded: Option<String> = decode_optional(Value::Null).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_optional_value() {
        let decoded: Option<String> = decode_optional(json!("6")).unwrap();
        assert_eq!(decoded, Some("6".to_string()));
    }

    #[test]
    fn test_decode_bool_is_strict() {
        assert!(decode_bool(json!(true)).unwrap());
        assert!(!decode_bool(json!(false)).unwrap());
        assert!(matches!(
            decode_bool(json!("true")),
            Err(IgniteError::Protocol(_))
        ));
        assert!(matches!(decode_bool(Value::Null), Err(IgniteError::Protocol(_))));
    }

    #[test]
    fn test_replace_value_body_uses_old_val() {
        let body = ReplaceValueBody {
            key: &"k",
            val: &"new",
            old_val: &"old",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"key": "k", "val": "new", "oldVal": "old"})
        );
    }

    #[test]
    fn test_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Cache<String, String>>();
    }
}
