use super::*;

#[test]
fn fresh_within_ttl() {
    let entry = HealthCacheEntry::new(true, 1_000);
    assert!(entry.is_fresh(1_000 + HEALTH_TTL_MS - 1));
}

#[test]
fn stale_at_ttl_boundary() {
    let entry = HealthCacheEntry::new(true, 1_000);
    assert!(!entry.is_fresh(1_000 + HEALTH_TTL_MS));
}
