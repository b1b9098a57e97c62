use chrono::DateTime;
use serde_json::Value;

/// Body field holding the publication policy object.
pub const PUBLISHING_FIELD: &str = "publishing";
/// Boolean flag inside the policy object.
pub const PRIVATE_FIELD: &str = "private";
/// Optional RFC 3339 instant after which privacy lapses.
pub const UNTIL_FIELD: &str = "until";

/// Publication policy read from a record body.
///
/// Tombstones, scalars and malformed documents carry no policy and behave as
/// public records with no deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishingPolicy {
    pub private: bool,
    pub until_ms: Option<i64>,
}

impl PublishingPolicy {
    /// Reads the policy from a body. A missing or unparseable `until` yields
    /// no deadline.
    pub fn of(body: Option<&Value>) -> Self {
        let Some(Value::Object(fields)) = body else {
            return Self::default();
        };
        let Some(Value::Object(publishing)) = fields.get(PUBLISHING_FIELD) else {
            return Self::default();
        };
        let private = matches!(publishing.get(PRIVATE_FIELD), Some(Value::Bool(true)));
        let until_ms = publishing
            .get(UNTIL_FIELD)
            .and_then(Value::as_str)
            .and_then(parse_instant_ms);
        Self { private, until_ms }
    }

    /// True when the record must be masked on the output stream at `now_ms`.
    /// A private record with no deadline is suppressed indefinitely; a past
    /// deadline exposes the value.
    pub fn suppressed_at(&self, now_ms: i64) -> bool {
        self.private && self.until_ms.map_or(true, |until_ms| until_ms > now_ms)
    }

    /// The deadline to register at `now_ms`: present only for a private
    /// record whose `until` is strictly in the future.
    pub fn pending_deadline(&self, now_ms: i64) -> Option<i64> {
        if !self.private {
            return None;
        }
        self.until_ms.filter(|until_ms| *until_ms > now_ms)
    }
}

/// Parses an RFC 3339 instant (offset-aware) into epoch milliseconds.
pub fn parse_instant_ms(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.timestamp_millis())
}
