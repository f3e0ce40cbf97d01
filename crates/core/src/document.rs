//! Typed document <-> raw BSON document helpers.

use bson::Document;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DomainError, DomainResult};

/// Serialize a typed storage document into a raw BSON document.
pub fn to_bson<T: Serialize>(doc: &T) -> DomainResult<Document> {
    bson::to_document(doc).map_err(|e| DomainError::validation(format!("encode document: {e}")))
}

/// Deserialize a raw BSON document into a typed storage document.
///
/// Shape mismatches (missing required fields, wrong types) surface as
/// [`DomainError::Validation`].
pub fn from_bson<T: DeserializeOwned>(doc: Document) -> DomainResult<T> {
    bson::from_document(doc).map_err(|e| DomainError::validation(format!("decode document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use bson::oid::ObjectId;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(rename = "_id")]
        id: ObjectId,
        name: String,
    }

    #[test]
    fn round_trips_typed_document() {
        let sample = Sample {
            id: ObjectId::new(),
            name: "sample".to_string(),
        };
        let raw = to_bson(&sample).unwrap();
        assert_eq!(raw.get_object_id("_id").unwrap(), sample.id);
        assert_eq!(from_bson::<Sample>(raw).unwrap(), sample);
    }

    #[test]
    fn shape_mismatch_is_validation_error() {
        let raw = doc! { "_id": "not-an-object-id", "name": "x" };
        assert!(matches!(
            from_bson::<Sample>(raw),
            Err(DomainError::Validation(_))
        ));
    }
}
