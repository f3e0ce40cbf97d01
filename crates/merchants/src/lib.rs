//! Merchants domain module.
//!
//! Onboarding and agreement-signing rules evaluated against a merchant
//! loaded by the caller. Pure predicates, no IO.

pub mod merchant;

pub use merchant::{
    AgreementSignatureData, AuthorizedContact, CompletedSteps, Merchant, MerchantBanking,
    MerchantCompany, MerchantContacts, MerchantStatus, TechnicalContact,
};
