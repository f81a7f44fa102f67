//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use axum::http::{HeaderMap, header};
use std::fmt;
use std::net::IpAddr;

use crate::crypto::{constant_time_eq, sha256};

/// Header carrying the proxy chain in front of the server
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client fingerprint derived from request metadata
///
/// Binds a session to the machine that claimed it. Two requests produce the
/// same fingerprint iff their forwarded-for header, user agent and socket
/// address are byte-identical.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientFingerprint {
    /// SHA-256 over forwarded-for, user agent and socket address
    pub hash: [u8; 32],
}

impl ClientFingerprint {
    pub fn new(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    /// Digest the three metadata inputs. Absent values count as empty strings.
    pub fn derive(forwarded_for: &str, user_agent: &str, remote_addr: &str) -> Self {
        let mut material =
            Vec::with_capacity(forwarded_for.len() + user_agent.len() + remote_addr.len() + 2);
        material.extend_from_slice(forwarded_for.as_bytes());
        material.push(b'|');
        material.extend_from_slice(user_agent.as_bytes());
        material.push(b'|');
        material.extend_from_slice(remote_addr.as_bytes());
        Self::new(sha256(&material))
    }

    /// Lowercase hex form (64 chars)
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Constant-time equality check
    pub fn matches(&self, other: &ClientFingerprint) -> bool {
        constant_time_eq(&self.hash, &other.hash)
    }
}

impl fmt::Debug for ClientFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a prefix; enough to correlate log lines
        write!(f, "ClientFingerprint({}…)", &self.to_hex()[..12])
    }
}

/// Extract the client fingerprint from request headers and socket address
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `remote_ip` - IP of the directly connected peer, if known
///
/// Never fails: missing or non-UTF-8 headers degrade to empty strings.
pub fn extract_fingerprint(headers: &HeaderMap, remote_ip: Option<IpAddr>) -> ClientFingerprint {
    let forwarded_for = header_str(headers, X_FORWARDED_FOR);
    let user_agent = header_str(headers, header::USER_AGENT.as_str());
    let remote_addr = remote_ip.map(|ip| ip.to_string()).unwrap_or_default();

    ClientFingerprint::derive(forwarded_for, user_agent, &remote_addr)
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get(X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
