//! Bearer-token auth with a localhost bypass (spec.md §4.4 "Auth").

use std::net::IpAddr;

/// `127.0.0.1`, `::1`, and the IPv4-mapped `::ffff:127.0.0.1` bypass auth.
pub fn is_loopback(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.to_ipv4_mapped().map(|v4| v4.is_loopback()).unwrap_or(false),
    }
}

/// Returns `true` if the request should be let through.
pub fn is_authorized(auth_token: Option<&str>, trust_localhost: bool, remote: Option<IpAddr>, presented: Option<&str>) -> bool {
    let Some(expected) = auth_token else {
        return true;
    };
    if trust_localhost {
        if let Some(addr) = remote {
            if is_loopback(addr) {
                return true;
            }
        }
    }
    presented == Some(expected)
}

/// Extracts a bearer token from an `Authorization: Bearer <token>` header
/// value.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ")
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
