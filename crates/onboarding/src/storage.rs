//! Primary onboarding storage codec.
//!
//! Unlike products and paylinks, the profile id is assigned by the caller and
//! is never generated here. Sections are stored as-is.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use billing_core::{DomainError, DomainResult, id, time};

use crate::profile::{CompanyInfo, HelpInfo, PersonalInfo, PrimaryOnboarding};

/// Stored primary onboarding document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryOnboardingDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    #[serde(default)]
    pub personal: Option<PersonalInfo>,
    #[serde(default)]
    pub help: Option<HelpInfo>,
    #[serde(default)]
    pub company: Option<CompanyInfo>,
    #[serde(default)]
    pub last_step: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl PrimaryOnboardingDocument {
    pub fn to_bson(&self) -> DomainResult<bson::Document> {
        billing_core::document::to_bson(self)
    }

    pub fn from_bson(doc: bson::Document) -> DomainResult<Self> {
        billing_core::document::from_bson(doc)
    }
}

pub fn to_storage(profile: &PrimaryOnboarding) -> DomainResult<PrimaryOnboardingDocument> {
    let doc_id = id::to_native("id", &profile.id)?;
    if profile.user_id.is_empty() {
        return Err(DomainError::missing_relation(format!(
            "onboarding profile {} has no user_id",
            profile.id
        )));
    }
    let user_id = id::to_native("user_id", &profile.user_id)?;

    Ok(PrimaryOnboardingDocument {
        id: doc_id,
        user_id,
        personal: profile.personal.clone(),
        help: profile.help.clone(),
        company: profile.company.clone(),
        last_step: profile.last_step.clone(),
        created_at: time::to_storage_or_now("created_at", profile.created_at.as_ref())?,
        updated_at: time::to_storage_or_now("updated_at", profile.updated_at.as_ref())?,
    })
}

pub fn from_storage(doc: &PrimaryOnboardingDocument) -> DomainResult<PrimaryOnboarding> {
    Ok(PrimaryOnboarding {
        id: id::to_text(&doc.id),
        user_id: id::to_text(&doc.user_id),
        personal: doc.personal.clone(),
        help: doc.help.clone(),
        company: doc.company.clone(),
        last_step: doc.last_step.clone(),
        created_at: Some(time::from_storage(doc.created_at)?),
        updated_at: Some(time::from_storage(doc.updated_at)?),
    })
}
