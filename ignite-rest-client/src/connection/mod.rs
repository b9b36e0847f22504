//! Connection bootstrap and HTTP transport.

mod address;

pub use address::{expand_address_specs, Endpoint};

use futures::future::select_ok;
use futures::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use ignite_rest_core::command::CMD_VERSION;
use ignite_rest_core::signature::{signature, SIGNATURE_HEADER};
use ignite_rest_core::{Command, IgniteError, Method, RestResponse, Result};

use crate::config::ClientConfig;

/// A connection to one reachable server node.
///
/// Holds the HTTP client, the node's base URL, the optional shared secret,
/// and the fixed per-request deadline. One HTTP request is issued per
/// command; requests are independent and may be in flight concurrently.
#[derive(Debug)]
pub struct RestConnection {
    http: reqwest::Client,
    base_url: Url,
    endpoint: Endpoint,
    secret_key: Option<String>,
    request_timeout: std::time::Duration,
}

impl RestConnection {
    pub(crate) fn open(endpoint: Endpoint, config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&format!(
            "http://{}:{}{}",
            endpoint.host(),
            endpoint.port(),
            config.http_path()
        ))
        .map_err(|e| IgniteError::AddressFormat(format!("invalid endpoint '{endpoint}': {e}")))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| IgniteError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            endpoint,
            secret_key: config.secret_key().map(str::to_string),
            request_timeout: config.request_timeout(),
        })
    }

    /// Returns the endpoint this connection is bound to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Runs one command against the node and unwraps the response envelope.
    pub async fn execute(&self, command: &Command) -> Result<Value> {
        let mut url = self.base_url.clone();
        url.set_query(Some(&command.query_string()));

        let mut request = match command.method() {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        }
        .timeout(self.request_timeout);

        if let Some(secret) = &self.secret_key {
            request = request.header(SIGNATURE_HEADER, signature(secret));
        }

        if let Some(body) = command.post_body() {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        debug!(cmd = command.name(), endpoint = %self.endpoint, "running command");

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(IgniteError::Authentication(
                "request rejected with status 401".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(IgniteError::Transport(format!(
                "request failed with status {status}"
            )));
        }

        let envelope: RestResponse = response
            .json()
            .await
            .map_err(|e| IgniteError::Protocol(format!("malformed response body: {e}")))?;

        envelope.into_result()
    }

    /// Checks the connection with a lightweight version probe.
    pub async fn check(&self) -> Result<()> {
        self.execute(&Command::new(CMD_VERSION)).await.map(|_| ())
    }

    fn map_send_error(&self, error: reqwest::Error) -> IgniteError {
        if error.is_timeout() {
            IgniteError::Timeout(format!(
                "request timed out after {:?}",
                self.request_timeout
            ))
        } else {
            IgniteError::Connection(error.to_string())
        }
    }
}

/// Expands the configured address specs and races a version probe against
/// every candidate, resolving to the first reachable connection.
///
/// Malformed specs fail before any probe is issued. When every candidate
/// fails, the last underlying error is aggregated into the returned
/// connection error.
pub(crate) async fn bootstrap(config: &ClientConfig) -> Result<RestConnection> {
    let endpoints = expand_address_specs(config.address_specs())?;

    let mut candidates = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        candidates.push(RestConnection::open(endpoint, config)?);
    }

    let probes = candidates.into_iter().map(|connection| {
        async move {
            connection.check().await?;
            Ok::<_, IgniteError>(connection)
        }
        .boxed()
    });

    match select_ok(probes).await {
        Ok((connection, _)) => {
            info!(endpoint = %connection.endpoint(), "connected to server node");
            Ok(connection)
        }
        Err(last) => Err(IgniteError::Connection(format!(
            "Cannot connect to servers. {last}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(specs: &[&str]) -> ClientConfig {
        ClientConfig::builder()
            .addresses(specs.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn test_open_builds_base_url() {
        let config = config(&["node1:8080"]);
        let endpoints = expand_address_specs(config.address_specs()).unwrap();
        let connection = RestConnection::open(endpoints[0].clone(), &config).unwrap();
        assert_eq!(connection.endpoint().to_string(), "node1:8080");
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_malformed_spec_before_probing() {
        let config = config(&["host:8000...9000"]);
        match bootstrap(&config).await {
            Err(IgniteError::AddressFormat(_)) => {}
            other => panic!("expected address format error, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestConnection>();
    }
}
