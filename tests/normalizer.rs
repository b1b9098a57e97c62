use embargo::normalize_body;
use serde_json::json;

#[test]
fn inserts_policy_when_publishing_is_absent() {
    let normalized = normalize_body(Some(json!({"headline": "launch"})));
    assert_eq!(
        normalized,
        Some(json!({"headline": "launch", "publishing": {"private": false}}))
    );
}

#[test]
fn inserts_private_flag_when_policy_lacks_it() {
    let normalized = normalize_body(Some(json!({
        "publishing": {"until": "2030-01-01T00:00:00Z"}
    })));
    assert_eq!(
        normalized,
        Some(json!({
            "publishing": {"until": "2030-01-01T00:00:00Z", "private": false}
        }))
    );
}

#[test]
fn leaves_complete_policy_untouched() {
    let body = json!({
        "publishing": {"private": true, "until": "2030-06-01T12:00:00+02:00"},
        "author": "jk"
    });
    assert_eq!(normalize_body(Some(body.clone())), Some(body));
}

#[test]
fn preserves_sibling_fields_and_their_order() {
    let normalized = normalize_body(Some(json!({"zeta": 1, "alpha": {"nested": [1, 2]}})));
    let rendered = serde_json::to_string(&normalized.unwrap()).unwrap();
    assert_eq!(
        rendered,
        r#"{"zeta":1,"alpha":{"nested":[1,2]},"publishing":{"private":false}}"#
    );
}

#[test]
fn leaves_non_object_publishing_field_alone() {
    let body = json!({"publishing": "tomorrow"});
    assert_eq!(normalize_body(Some(body.clone())), Some(body));
}

#[test]
fn passes_unstructured_bodies_through() {
    assert_eq!(
        normalize_body(Some(json!("plain text"))),
        Some(json!("plain text"))
    );
    assert_eq!(normalize_body(Some(json!(42))), Some(json!(42)));
    assert_eq!(normalize_body(Some(json!([1, 2]))), Some(json!([1, 2])));
}

#[test]
fn passes_tombstones_through() {
    assert_eq!(normalize_body(None), None);
}

#[test]
fn keeps_non_boolean_private_field_verbatim() {
    let body = json!({"publishing": {"private": "yes"}});
    assert_eq!(normalize_body(Some(body.clone())), Some(body));
}
