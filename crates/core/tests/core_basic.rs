use world_core::{slugify, version};

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn slugify_is_deterministic() {
    assert_eq!(slugify("Avelon Prime"), slugify("Avelon Prime"));
    assert_eq!(slugify("Avelon Prime"), "avelon_prime");
}
