//! Primary onboarding questionnaire: the first profile a user fills in before
//! a merchant account exists.

pub mod profile;
pub mod storage;

pub use profile::{
    CompanyInfo, HelpInfo, Monetization, PersonalInfo, Platforms, PrimaryOnboarding, Range,
};
pub use storage::{PrimaryOnboardingDocument, from_storage, to_storage};
