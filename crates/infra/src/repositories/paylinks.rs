use chrono::{DateTime, Utc};

use billing_core::{ExpectedVersion, id};
use billing_paylinks::{Paylink, PaylinkDocument, from_storage, to_storage};

use super::Versioned;
use crate::error::{ServiceError, ServiceResult};
use crate::store::{DocumentStore, StoredDocument};

pub const PAYLINK_COLLECTION: &str = "paylink";

#[derive(Debug, Clone)]
pub struct PaylinkRepository<S> {
    store: S,
}

impl<S: DocumentStore> PaylinkRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encode and write a paylink. The returned value has `is_expired`
    /// evaluated at `now`.
    pub fn save(
        &self,
        paylink: &Paylink,
        expected: ExpectedVersion,
        now: DateTime<Utc>,
    ) -> ServiceResult<Versioned<Paylink>> {
        let doc = to_storage(paylink)?;
        let id = doc.id;
        let body = doc.to_bson()?;
        let revision = self.store.save(PAYLINK_COLLECTION, id, body.clone(), expected)?;

        tracing::debug!(paylink_id = %id, revision, "paylink saved");
        decode(StoredDocument { id, revision, body }, now)
    }

    pub fn find(&self, paylink_id: &str, now: DateTime<Utc>) -> ServiceResult<Option<Versioned<Paylink>>> {
        let oid = id::to_native("id", paylink_id)?;
        self.store
            .find(PAYLINK_COLLECTION, &oid)?
            .map(|stored| decode(stored, now))
            .transpose()
    }

    pub fn get(&self, paylink_id: &str, now: DateTime<Utc>) -> ServiceResult<Versioned<Paylink>> {
        self.find(paylink_id, now)?
            .ok_or_else(|| ServiceError::not_found(PAYLINK_COLLECTION, paylink_id))
    }

    /// Paylinks of a merchant that are neither deleted nor expired at `now`.
    pub fn list_active(&self, merchant_id: &str, now: DateTime<Utc>) -> ServiceResult<Vec<Paylink>> {
        let merchant = id::to_native("merchant_id", merchant_id)?;
        let mut active = Vec::new();
        for stored in self.store.list(PAYLINK_COLLECTION)? {
            if stored.body.get_object_id("merchant_id").ok() != Some(merchant) {
                continue;
            }
            let doc = PaylinkDocument::from_bson(stored.body)?;
            if doc.deleted {
                continue;
            }
            let paylink = from_storage(&doc, now)?;
            if !paylink.is_expired {
                active.push(paylink);
            }
        }
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }
}

fn decode(stored: StoredDocument, now: DateTime<Utc>) -> ServiceResult<Versioned<Paylink>> {
    let doc = PaylinkDocument::from_bson(stored.body)?;
    Ok(Versioned {
        value: from_storage(&doc, now)?,
        revision: stored.revision,
    })
}
