//! Identity codec: textual identifiers <-> store-native object ids.
//!
//! Wire entities carry identifiers as 24-char hex strings; documents carry
//! [`ObjectId`]. Every entity codec goes through these functions so that a
//! malformed identifier aborts the whole conversion.

use bson::oid::ObjectId;

use crate::error::{DomainError, DomainResult};

/// Returns `true` when `text` is a well-formed object id.
pub fn validate(text: &str) -> bool {
    ObjectId::parse_str(text).is_ok()
}

/// Convert a textual identifier into a native one.
///
/// `field` names the identifier in error messages (e.g. `"merchant_id"`).
pub fn to_native(field: &str, text: &str) -> DomainResult<ObjectId> {
    if text.is_empty() {
        return Err(DomainError::invalid_id(format!("{field}: empty")));
    }
    ObjectId::parse_str(text)
        .map_err(|e| DomainError::invalid_id(format!("{field}: {text:?}: {e}")))
}

/// Like [`to_native`], but an empty identifier yields a freshly generated one.
pub fn to_native_or_new(field: &str, text: &str) -> DomainResult<ObjectId> {
    if text.is_empty() {
        let id = new_native();
        tracing::debug!(field, id = %id, "generated identifier");
        return Ok(id);
    }
    to_native(field, text)
}

/// Convert every identifier in `texts`, preserving order.
pub fn to_native_all(field: &str, texts: &[String]) -> DomainResult<Vec<ObjectId>> {
    texts.iter().map(|t| to_native(field, t)).collect()
}

pub fn to_text(id: &ObjectId) -> String {
    id.to_hex()
}

/// Generate a fresh native identifier.
pub fn new_native() -> ObjectId {
    ObjectId::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "5be2e16701d96d00012d26c3";

    #[test]
    fn validate_accepts_object_id_hex() {
        assert!(validate(VALID));
        assert!(!validate(""));
        assert!(!validate("not-an-id"));
        assert!(!validate("5be2e16701d96d00012d26c")); // 23 chars
    }

    #[test]
    fn to_native_rejects_empty_and_malformed() {
        match to_native("merchant_id", "") {
            Err(DomainError::InvalidId(msg)) => assert!(msg.contains("merchant_id")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
        assert!(matches!(
            to_native("project_id", "zzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn text_round_trip_is_lowercase_hex() {
        let id = to_native("id", VALID).unwrap();
        assert_eq!(to_text(&id), VALID);

        let upper = VALID.to_uppercase();
        let id = to_native("id", &upper).unwrap();
        assert_eq!(to_text(&id), VALID);
    }

    #[test]
    fn to_native_or_new_generates_only_for_empty() {
        let generated = to_native_or_new("id", "").unwrap();
        assert!(validate(&to_text(&generated)));

        let kept = to_native_or_new("id", VALID).unwrap();
        assert_eq!(to_text(&kept), VALID);

        assert!(to_native_or_new("id", "bad").is_err());
    }

    #[test]
    fn to_native_all_fails_on_first_bad_entry() {
        let ids = vec![VALID.to_string(), "".to_string()];
        assert!(matches!(
            to_native_all("products", &ids),
            Err(DomainError::InvalidId(_))
        ));

        let ids = vec![VALID.to_string(), new_native().to_hex()];
        let converted = to_native_all("products", &ids).unwrap();
        assert_eq!(converted.len(), 2);
        assert_eq!(to_text(&converted[0]), VALID);
    }
}
