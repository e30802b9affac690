use super::*;

#[test]
fn builtin_registry_should_expose_three_services() {
    let registry = ServiceRegistry::builtin();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.ids(), vec![1, 2, 3]);
    assert_eq!(registry.lookup(1).map(Service::name), Some("upper"));
    assert_eq!(registry.lookup(2).map(Service::name), Some("reverse"));
    assert_eq!(registry.lookup(3).map(Service::name), Some("length"));
}

#[test]
fn lookup_should_return_none_outside_the_fixed_table() {
    let registry = ServiceRegistry::builtin();

    for id in [0, 4, 99, -1, i64::MAX, i64::MIN] {
        assert!(registry.lookup(id).is_none(), "id {} should be unknown", id);
    }
}

#[test]
fn builtin_services_should_transform_values() {
    let registry = ServiceRegistry::builtin();
    let apply = |id: ServiceId, v: &str| registry.lookup(id).map(|s| s.apply(v));

    assert_eq!(apply(1, "abcdef").as_deref(), Some("ABCDEF"));
    assert_eq!(apply(2, "abcdef").as_deref(), Some("fedcba"));
    assert_eq!(apply(3, "abcdef").as_deref(), Some("6"));

    assert_eq!(apply(2, "ghijkl").as_deref(), Some("lkjihg"));
    assert_eq!(apply(3, "xyz").as_deref(), Some("3"));
}

#[test]
fn transforms_should_keep_content_untrimmed() {
    assert_eq!(uppercase(" a b "), " A B ");
    assert_eq!(reverse(" ab"), "ba ");
    assert_eq!(char_length("  "), "2");
    assert_eq!(char_length(""), "0");
    assert_eq!(reverse(""), "");
}

#[test]
fn transforms_should_count_and_reverse_characters_not_bytes() {
    assert_eq!(char_length("ação"), "4");
    assert_eq!(reverse("ação"), "oãça");
    assert_eq!(uppercase("ação"), "AÇÃO");
}

#[test]
fn uppercase_should_be_idempotent() {
    for v in ["abc", "MiXeD 123", "", "ação"] {
        assert_eq!(uppercase(&uppercase(v)), uppercase(v));
    }
}

#[test]
fn reverse_should_be_self_inverse() {
    for v in ["abc", "palindrome? no", "", "ação"] {
        assert_eq!(reverse(&reverse(v)), v);
    }
}

#[test]
fn custom_table_only_serves_registered_ids() {
    let registry = ServiceRegistry::from_services([Service::new(7, "reverse", reverse)]);

    assert_eq!(registry.ids(), vec![7]);
    assert!(registry.lookup(1).is_none());
    assert_eq!(registry.lookup(7).map(|s| s.apply("ab")).as_deref(), Some("ba"));
}
