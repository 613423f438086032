use super::*;

#[test]
fn known_wrappers_puts_primary_first() {
    let wrappers = known_wrappers();
    assert_eq!(wrappers[0].id().as_str(), "primary");
}

#[test]
fn known_wrappers_has_a_dozen_concrete_shapes() {
    assert_eq!(known_wrappers().len(), 12);
}

#[test]
fn known_wrappers_have_unique_ids() {
    let wrappers = known_wrappers();
    let mut ids: Vec<&str> = wrappers.iter().map(|w| w.id().as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), wrappers.len());
}
