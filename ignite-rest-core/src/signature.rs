//! Time-boxed request signature for authenticated connections.
//!
//! The header value is `<timestampMs>:<base64(sha1("<timestampMs>:<secret>"))>`.
//! Including the timestamp in the signed material limits replay of a
//! captured header.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha1::{Digest, Sha1};

/// Header carrying the signature.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Computes the signature header value for the current time.
pub fn signature(secret: &str) -> String {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    signature_at(timestamp_ms, secret)
}

/// Computes the signature header value for an explicit timestamp.
pub fn signature_at(timestamp_ms: u64, secret: &str) -> String {
    let base = format!("{timestamp_ms}:{secret}");
    let digest = Sha1::digest(base.as_bytes());
    format!("{timestamp_ms}:{}", STANDARD.encode(digest))
}
