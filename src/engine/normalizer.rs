use crate::model::{PRIVATE_FIELD, PUBLISHING_FIELD};
use serde_json::{Map, Value};

/// Canonicalizes an incoming record body: structured documents are
/// guaranteed to carry `publishing.private` as a boolean, every other field
/// is preserved verbatim, in place. Tombstones and unstructured bodies pass
/// through unchanged.
pub fn normalize_body(body: Option<Value>) -> Option<Value> {
    let mut body = body?;
    if let Value::Object(fields) = &mut body {
        ensure_policy(fields);
    }
    Some(body)
}

fn ensure_policy(fields: &mut Map<String, Value>) {
    match fields.get_mut(PUBLISHING_FIELD) {
        None => {
            let mut policy = Map::new();
            policy.insert(PRIVATE_FIELD.to_string(), Value::Bool(false));
            fields.insert(PUBLISHING_FIELD.to_string(), Value::Object(policy));
        }
        Some(Value::Object(policy)) => {
            if !policy.contains_key(PRIVATE_FIELD) {
                policy.insert(PRIVATE_FIELD.to_string(), Value::Bool(false));
            }
        }
        // A non-object `publishing` field is not a policy we can extend;
        // downstream treats such a record as carrying no policy.
        Some(_) => {}
    }
}
