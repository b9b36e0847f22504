//! Address spec parsing and expansion.
//!
//! A spec is `host:port` or `host:startPort..endPort`; a range expands to
//! one candidate endpoint per port. Malformed specs fail before any network
//! attempt is made.

use std::fmt;

use ignite_rest_core::{IgniteError, Result};

/// A single candidate endpoint produced by spec expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Returns the host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Expands a list of address specs into candidate endpoints.
pub fn expand_address_specs(specs: &[String]) -> Result<Vec<Endpoint>> {
    let mut endpoints = Vec::new();
    for spec in specs {
        expand_spec(spec, &mut endpoints)?;
    }
    Ok(endpoints)
}

fn expand_spec(spec: &str, endpoints: &mut Vec<Endpoint>) -> Result<()> {
    let (host, range) = spec
        .split_once(':')
        .ok_or_else(|| malformed(spec, "missing ':' separator"))?;

    if host.is_empty() {
        return Err(malformed(spec, "empty host"));
    }

    let (start, end) = match range.split_once("..") {
        None => {
            let port = parse_port(spec, range)?;
            (port, port)
        }
        Some((start, end)) => (parse_port(spec, start)?, parse_port(spec, end)?),
    };

    if start > end {
        return Err(malformed(spec, "start port greater than end port"));
    }

    for port in start..=end {
        endpoints.push(Endpoint {
            host: host.to_string(),
            port,
        });
    }

    Ok(())
}

fn parse_port(spec: &str, raw: &str) -> Result<u16> {
    raw.parse::<u16>()
        .map_err(|_| malformed(spec, &format!("invalid port '{raw}'")))
}

fn malformed(spec: &str, reason: &str) -> IgniteError {
    IgniteError::AddressFormat(format!("incorrect address '{spec}': {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(specs: &[&str]) -> Result<Vec<Endpoint>> {
        let specs: Vec<String> = specs.iter().map(|s| s.to_string()).collect();
        expand_address_specs(&specs)
    }

    #[test]
    fn test_single_port() {
        let endpoints = expand(&["127.0.0.1:8080"]).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].host(), "127.0.0.1");
        assert_eq!(endpoints[0].port(), 8080);
    }

    #[test]
    fn test_range_expands_to_every_port() {
        let endpoints = expand(&["node1:8000..8004"]).unwrap();
        assert_eq!(endpoints.len(), 5);
        assert_eq!(endpoints[0].port(), 8000);
        assert_eq!(endpoints[4].port(), 8004);
    }

    #[test]
    fn test_degenerate_range() {
        let endpoints = expand(&["node1:8080..8080"]).unwrap();
        assert_eq!(endpoints.len(), 1);
    }

    #[test]
    fn test_multiple_specs_concatenate() {
        let endpoints = expand(&["a:1", "b:2..4"]).unwrap();
        assert_eq!(endpoints.len(), 4);
        assert_eq!(endpoints[0].to_string(), "a:1");
        assert_eq!(endpoints[3].to_string(), "b:4");
    }

    #[test]
    fn test_missing_port_fails() {
        assert!(matches!(
            expand(&["localhost"]),
            Err(IgniteError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_empty_host_fails() {
        assert!(matches!(
            expand(&[":8080"]),
            Err(IgniteError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_non_numeric_port_fails() {
        assert!(matches!(
            expand(&["host:abc"]),
            Err(IgniteError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_triple_dot_fails() {
        assert!(matches!(
            expand(&["host:8000...9000"]),
            Err(IgniteError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_extra_range_segment_fails() {
        assert!(matches!(
            expand(&["host:1..2..3"]),
            Err(IgniteError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_inverted_range_fails() {
        assert!(matches!(
            expand(&["host:9000..8000"]),
            Err(IgniteError::AddressFormat(_))
        ));
    }

    #[test]
    fn test_one_bad_spec_fails_the_batch() {
        assert!(expand(&["good:1", "bad:"]).is_err());
    }
}
