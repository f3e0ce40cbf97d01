use std::collections::HashMap;
use std::sync::RwLock;

use bson::Document;
use bson::oid::ObjectId;

use billing_core::ExpectedVersion;

use super::document::{DocumentStore, StoreError, StoredDocument};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocKey {
    collection: String,
    id: ObjectId,
}

/// In-memory document store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<HashMap<DocKey, (u64, Document)>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn find(&self, collection: &str, id: &ObjectId) -> Result<Option<StoredDocument>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let key = DocKey {
            collection: collection.to_string(),
            id: *id,
        };
        Ok(docs.get(&key).map(|(revision, body)| StoredDocument {
            id: *id,
            revision: *revision,
            body: body.clone(),
        }))
    }

    fn save(
        &self,
        collection: &str,
        id: ObjectId,
        body: Document,
        expected: ExpectedVersion,
    ) -> Result<u64, StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let key = DocKey {
            collection: collection.to_string(),
            id,
        };
        let current = docs.get(&key).map(|(revision, _)| *revision).unwrap_or(0);
        expected
            .check(current)
            .map_err(|e| StoreError::Concurrency(format!("{collection}/{id}: {e}")))?;

        let next = current + 1;
        docs.insert(key, (next, body));
        Ok(next)
    }

    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(docs
            .iter()
            .filter(|(k, _)| k.collection == collection)
            .map(|(k, (revision, body))| StoredDocument {
                id: k.id,
                revision: *revision,
                body: body.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn revisions_increase_per_write() {
        let store = InMemoryDocumentStore::new();
        let id = ObjectId::new();

        let r1 = store.save("product", id, doc! { "sku": "a" }, ExpectedVersion::Absent).unwrap();
        let r2 = store.save("product", id, doc! { "sku": "b" }, ExpectedVersion::Exact(r1)).unwrap();
        assert_eq!((r1, r2), (1, 2));

        let found = store.find("product", &id).unwrap().unwrap();
        assert_eq!(found.revision, 2);
        assert_eq!(found.body.get_str("sku").unwrap(), "b");
    }

    #[test]
    fn stale_revision_is_a_conflict() {
        let store = InMemoryDocumentStore::new();
        let id = ObjectId::new();
        store.save("paylink", id, doc! {}, ExpectedVersion::Absent).unwrap();
        store.save("paylink", id, doc! {}, ExpectedVersion::Exact(1)).unwrap();

        let err = store
            .save("paylink", id, doc! {}, ExpectedVersion::Exact(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Concurrency(_)));

        let err = store.save("paylink", id, doc! {}, ExpectedVersion::Absent).unwrap_err();
        assert!(matches!(err, StoreError::Concurrency(_)));
    }

    #[test]
    fn collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let id = ObjectId::new();
        store.save("product", id, doc! {}, ExpectedVersion::Any).unwrap();

        assert!(store.find("paylink", &id).unwrap().is_none());
        assert_eq!(store.list("product").unwrap().len(), 1);
        assert!(store.list("paylink").unwrap().is_empty());
    }
}
