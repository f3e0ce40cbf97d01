//! Entities persisted in their wire shape.
//!
//! Merchants and royalty reports have no dedicated storage codec; the body is
//! the serde encoding of the entity, keyed by its id.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use billing_core::{ExpectedVersion, document, id};
use billing_merchants::Merchant;
use billing_royalty::RoyaltyReport;

use super::Versioned;
use crate::error::{ServiceError, ServiceResult};
use crate::store::{DocumentStore, StoredDocument};

/// An entity stored as-is under its own id.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn record_id(&self) -> &str;
}

impl Record for Merchant {
    const COLLECTION: &'static str = "merchant";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for RoyaltyReport {
    const COLLECTION: &'static str = "royalty_report";

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct RecordRepository<T, S> {
    store: S,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, S: DocumentStore> RecordRepository<T, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Write a record. Its id must already be assigned.
    pub fn save(&self, record: &T, expected: ExpectedVersion) -> ServiceResult<u64> {
        let oid = id::to_native("id", record.record_id())?;
        let body = document::to_bson(record)?;
        let revision = self.store.save(T::COLLECTION, oid, body, expected)?;

        tracing::debug!(collection = T::COLLECTION, id = %oid, revision, "record saved");
        Ok(revision)
    }

    pub fn find(&self, record_id: &str) -> ServiceResult<Option<Versioned<T>>> {
        let oid = id::to_native("id", record_id)?;
        self.store.find(T::COLLECTION, &oid)?.map(decode).transpose()
    }

    pub fn get(&self, record_id: &str) -> ServiceResult<Versioned<T>> {
        self.find(record_id)?
            .ok_or_else(|| ServiceError::not_found(T::COLLECTION, record_id))
    }

    pub fn list(&self) -> ServiceResult<Vec<Versioned<T>>> {
        self.store
            .list(T::COLLECTION)?
            .into_iter()
            .map(decode)
            .collect()
    }
}

fn decode<T: Record>(stored: StoredDocument) -> ServiceResult<Versioned<T>> {
    Ok(Versioned {
        value: document::from_bson(stored.body)?,
        revision: stored.revision,
    })
}
