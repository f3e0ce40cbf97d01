use std::sync::Arc;

use bson::Document;
use bson::oid::ObjectId;
use thiserror::Error;

use billing_core::ExpectedVersion;

/// A raw document together with its store-assigned revision.
///
/// Revisions start at 1 for the first write and increase by one per write.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: ObjectId,
    pub revision: u64,
    pub body: Document,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("concurrency conflict: {0}")]
    Concurrency(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Collection-scoped document storage with optimistic concurrency.
pub trait DocumentStore: Send + Sync {
    fn find(&self, collection: &str, id: &ObjectId) -> Result<Option<StoredDocument>, StoreError>;

    /// Replace (or insert) a document, returning its new revision.
    fn save(
        &self,
        collection: &str,
        id: ObjectId,
        body: Document,
        expected: ExpectedVersion,
    ) -> Result<u64, StoreError>;

    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn find(&self, collection: &str, id: &ObjectId) -> Result<Option<StoredDocument>, StoreError> {
        (**self).find(collection, id)
    }

    fn save(
        &self,
        collection: &str,
        id: ObjectId,
        body: Document,
        expected: ExpectedVersion,
    ) -> Result<u64, StoreError> {
        (**self).save(collection, id, body, expected)
    }

    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        (**self).list(collection)
    }
}
