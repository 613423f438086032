use super::*;

use std::net::Ipv4Addr;

#[test]
fn no_token_configured_always_authorizes() {
    assert!(is_authorized(None, true, None, None));
}

#[test]
fn loopback_bypasses_when_trusted() {
    let addr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    assert!(is_authorized(Some("abc"), true, Some(addr), None));
}

#[test]
fn loopback_does_not_bypass_when_untrusted() {
    let addr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    assert!(!is_authorized(Some("abc"), false, Some(addr), None));
    assert!(is_authorized(Some("abc"), false, Some(addr), Some("abc")));
}

#[test]
fn non_loopback_requires_matching_token() {
    let addr: IpAddr = "203.0.113.5".parse().unwrap();
    assert!(!is_authorized(Some("abc"), true, Some(addr), None));
    assert!(!is_authorized(Some("abc"), true, Some(addr), Some("wrong")));
    assert!(is_authorized(Some("abc"), true, Some(addr), Some("abc")));
}

#[test]
fn extract_bearer_strips_prefix() {
    assert_eq!(extract_bearer(Some("Bearer abc")), Some("abc"));
    assert_eq!(extract_bearer(Some("abc")), None);
    assert_eq!(extract_bearer(None), None);
}
