use billing_core::{ExpectedVersion, id};
use billing_onboarding::{PrimaryOnboarding, PrimaryOnboardingDocument, from_storage, to_storage};

use super::Versioned;
use crate::error::ServiceResult;
use crate::store::{DocumentStore, StoredDocument};

pub const ONBOARDING_COLLECTION: &str = "user_profile";

#[derive(Debug, Clone)]
pub struct OnboardingRepository<S> {
    store: S,
}

impl<S: DocumentStore> OnboardingRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(
        &self,
        profile: &PrimaryOnboarding,
        expected: ExpectedVersion,
    ) -> ServiceResult<Versioned<PrimaryOnboarding>> {
        let doc = to_storage(profile)?;
        let id = doc.id;
        let body = doc.to_bson()?;
        let revision = self.store.save(ONBOARDING_COLLECTION, id, body.clone(), expected)?;

        tracing::debug!(profile_id = %id, revision, "onboarding profile saved");
        decode(StoredDocument { id, revision, body })
    }

    pub fn find(&self, profile_id: &str) -> ServiceResult<Option<Versioned<PrimaryOnboarding>>> {
        let oid = id::to_native("id", profile_id)?;
        self.store
            .find(ONBOARDING_COLLECTION, &oid)?
            .map(decode)
            .transpose()
    }

    /// The profile owned by `user_id`, if any.
    pub fn find_by_user(&self, user_id: &str) -> ServiceResult<Option<Versioned<PrimaryOnboarding>>> {
        let user = id::to_native("user_id", user_id)?;
        let owned = self
            .store
            .list(ONBOARDING_COLLECTION)?
            .into_iter()
            .find(|stored| stored.body.get_object_id("user_id").ok() == Some(user));
        owned.map(decode).transpose()
    }
}

fn decode(stored: StoredDocument) -> ServiceResult<Versioned<PrimaryOnboarding>> {
    let doc = PrimaryOnboardingDocument::from_bson(stored.body)?;
    Ok(Versioned {
        value: from_storage(&doc)?,
        revision: stored.revision,
    })
}
