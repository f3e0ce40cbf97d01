use serde::{Deserialize, Serialize};

use billing_core::WireTimestamp;

/// Merchant status lifecycle.
///
/// `Draft -> OnReview -> AgreementSigning -> AgreementSigned`, with
/// `Rejected`/`Deleted` as exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MerchantStatus {
    #[default]
    Draft,
    OnReview,
    AgreementSigning,
    AgreementSigned,
    Rejected,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MerchantBanking {
    pub currency: String,
    pub name: String,
    pub address: String,
    pub account_number: String,
    pub swift: String,
    pub correspondent_account: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MerchantCompany {
    pub name: String,
    pub alternative_name: String,
    pub website: String,
    pub country: String,
    pub state: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub registration_number: String,
    pub tax_id: String,
}

/// Person entitled to sign the agreement on the merchant's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthorizedContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TechnicalContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MerchantContacts {
    pub authorized: Option<AuthorizedContact>,
    pub technical: Option<TechnicalContact>,
}

/// Which onboarding sections the merchant has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompletedSteps {
    pub company: bool,
    pub contacts: bool,
    pub banking: bool,
    pub tariff: bool,
}

/// Signature requests created with the document-signing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgreementSignatureData {
    pub details_url: String,
    pub merchant_signature_id: String,
    pub merchant_sign_url: String,
    pub ps_signature_id: String,
    pub ps_sign_url: String,
}

/// A merchant account as loaded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Merchant {
    pub id: String,
    pub user_id: String,
    pub status: MerchantStatus,
    pub company: Option<MerchantCompany>,
    pub contacts: Option<MerchantContacts>,
    pub banking: Option<MerchantBanking>,
    pub steps: CompletedSteps,
    pub agreement_signature_data: Option<AgreementSignatureData>,
    pub has_merchant_signature: bool,
    pub has_psp_signature: bool,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
}

impl Merchant {
    /// Profile edits are only accepted while the merchant is a draft.
    pub fn changes_allowed(&self) -> bool {
        self.status == MerchantStatus::Draft
    }

    pub fn is_deleted(&self) -> bool {
        self.status == MerchantStatus::Deleted
    }

    /// Banking present, company country set, authorized contact present.
    fn has_agreement_requisites(&self) -> bool {
        let has_country = self
            .company
            .as_ref()
            .is_some_and(|c| !c.country.is_empty());
        let has_authorized = self
            .contacts
            .as_ref()
            .is_some_and(|c| c.authorized.is_some());

        self.banking.is_some() && has_country && has_authorized
    }

    pub fn can_change_status_to_signing(&self) -> bool {
        self.status == MerchantStatus::OnReview && self.has_agreement_requisites()
    }

    pub fn can_generate_agreement(&self) -> bool {
        matches!(
            self.status,
            MerchantStatus::OnReview
                | MerchantStatus::AgreementSigning
                | MerchantStatus::AgreementSigned
        ) && self.has_agreement_requisites()
    }

    /// Both parties have signed.
    pub fn is_agreement_signed(&self) -> bool {
        self.has_merchant_signature && self.has_psp_signature
    }

    /// Both signatures are in but the status has not caught up yet.
    pub fn need_mark_agreement_as_signed(&self) -> bool {
        self.is_agreement_signed() && self.status != MerchantStatus::AgreementSigned
    }

    /// Signature requests exist and at least one party has not signed.
    pub fn is_agreement_signing_started(&self) -> bool {
        self.agreement_signature_data.is_some() && !self.is_agreement_signed()
    }

    /// Every onboarding section is finished.
    pub fn is_completed(&self) -> bool {
        let s = self.steps;
        s.company && s.contacts && s.banking && s.tariff
    }

    pub fn payout_currency(&self) -> Option<&str> {
        self.banking
            .as_ref()
            .map(|b| b.currency.as_str())
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_merchant(status: MerchantStatus) -> Merchant {
        Merchant {
            id: "5dc3f70deb494903d835f28c".to_string(),
            status,
            company: Some(MerchantCompany {
                name: "Game Studio LLC".to_string(),
                country: "RU".to_string(),
                ..MerchantCompany::default()
            }),
            contacts: Some(MerchantContacts {
                authorized: Some(AuthorizedContact {
                    name: "Ivan Ivanov".to_string(),
                    email: "ivan@studio.example".to_string(),
                    ..AuthorizedContact::default()
                }),
                technical: None,
            }),
            banking: Some(MerchantBanking {
                currency: "USD".to_string(),
                ..MerchantBanking::default()
            }),
            ..Merchant::default()
        }
    }

    #[test]
    fn changes_allowed_only_in_draft() {
        assert!(ready_merchant(MerchantStatus::Draft).changes_allowed());
        for status in [
            MerchantStatus::OnReview,
            MerchantStatus::AgreementSigning,
            MerchantStatus::AgreementSigned,
            MerchantStatus::Rejected,
            MerchantStatus::Deleted,
        ] {
            assert!(!ready_merchant(status).changes_allowed(), "{status:?}");
        }
    }

    #[test]
    fn only_deleted_status_is_deleted() {
        assert!(ready_merchant(MerchantStatus::Deleted).is_deleted());
        for status in [
            MerchantStatus::Draft,
            MerchantStatus::OnReview,
            MerchantStatus::AgreementSigning,
            MerchantStatus::AgreementSigned,
            MerchantStatus::Rejected,
        ] {
            assert!(!ready_merchant(status).is_deleted(), "{status:?}");
        }
    }

    #[test]
    fn signing_requires_on_review_and_requisites() {
        assert!(ready_merchant(MerchantStatus::OnReview).can_change_status_to_signing());
        assert!(!ready_merchant(MerchantStatus::Draft).can_change_status_to_signing());
        assert!(!ready_merchant(MerchantStatus::AgreementSigning).can_change_status_to_signing());
    }

    #[test]
    fn signing_rejected_without_company() {
        let mut merchant = ready_merchant(MerchantStatus::OnReview);
        merchant.company = None;
        assert!(merchant.banking.is_some());
        assert!(!merchant.can_change_status_to_signing());
        assert!(!merchant.can_generate_agreement());
    }

    #[test]
    fn signing_rejected_without_country_banking_or_authorized_contact() {
        let mut merchant = ready_merchant(MerchantStatus::OnReview);
        merchant.company.as_mut().unwrap().country.clear();
        assert!(!merchant.can_change_status_to_signing());

        let mut merchant = ready_merchant(MerchantStatus::OnReview);
        merchant.banking = None;
        assert!(!merchant.can_change_status_to_signing());

        let mut merchant = ready_merchant(MerchantStatus::OnReview);
        merchant.contacts.as_mut().unwrap().authorized = None;
        assert!(!merchant.can_change_status_to_signing());

        let mut merchant = ready_merchant(MerchantStatus::OnReview);
        merchant.contacts = None;
        assert!(!merchant.can_change_status_to_signing());
    }

    #[test]
    fn agreement_can_be_generated_through_signing() {
        for status in [
            MerchantStatus::OnReview,
            MerchantStatus::AgreementSigning,
            MerchantStatus::AgreementSigned,
        ] {
            assert!(ready_merchant(status).can_generate_agreement(), "{status:?}");
        }
        for status in [MerchantStatus::Draft, MerchantStatus::Rejected, MerchantStatus::Deleted] {
            assert!(!ready_merchant(status).can_generate_agreement(), "{status:?}");
        }
    }

    #[test]
    fn mark_as_signed_needs_both_signatures() {
        let mut merchant = ready_merchant(MerchantStatus::AgreementSigning);
        merchant.has_merchant_signature = true;
        assert!(!merchant.need_mark_agreement_as_signed());

        merchant.has_psp_signature = true;
        assert!(merchant.is_agreement_signed());
        assert!(merchant.need_mark_agreement_as_signed());

        merchant.status = MerchantStatus::AgreementSigned;
        assert!(!merchant.need_mark_agreement_as_signed());
        assert!(merchant.is_agreement_signed());
    }

    #[test]
    fn signing_started_needs_signature_data_and_missing_flag() {
        let mut merchant = ready_merchant(MerchantStatus::AgreementSigning);
        assert!(!merchant.is_agreement_signing_started());

        merchant.agreement_signature_data = Some(AgreementSignatureData::default());
        assert!(merchant.is_agreement_signing_started());

        merchant.has_psp_signature = true;
        assert!(merchant.is_agreement_signing_started());

        merchant.has_merchant_signature = true;
        assert!(!merchant.is_agreement_signing_started());
    }

    #[test]
    fn completion_needs_all_steps() {
        let mut merchant = ready_merchant(MerchantStatus::Draft);
        merchant.steps = CompletedSteps {
            company: true,
            contacts: true,
            banking: true,
            tariff: false,
        };
        assert!(!merchant.is_completed());
        merchant.steps.tariff = true;
        assert!(merchant.is_completed());
    }

    #[test]
    fn payout_currency_comes_from_banking() {
        let mut merchant = ready_merchant(MerchantStatus::Draft);
        assert_eq!(merchant.payout_currency(), Some("USD"));
        merchant.banking.as_mut().unwrap().currency.clear();
        assert_eq!(merchant.payout_currency(), None);
        merchant.banking = None;
        assert_eq!(merchant.payout_currency(), None);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = MerchantStatus> {
            prop_oneof![
                Just(MerchantStatus::Draft),
                Just(MerchantStatus::OnReview),
                Just(MerchantStatus::AgreementSigning),
                Just(MerchantStatus::AgreementSigned),
                Just(MerchantStatus::Rejected),
                Just(MerchantStatus::Deleted),
            ]
        }

        proptest! {
            /// Property: whoever may move to signing may also get an agreement.
            #[test]
            fn signing_implies_agreement_generation(
                status in any_status(),
                banking: bool,
                company: bool,
                authorized: bool,
            ) {
                let mut merchant = ready_merchant(status);
                if !banking { merchant.banking = None; }
                if !company { merchant.company = None; }
                if !authorized { merchant.contacts = None; }

                if merchant.can_change_status_to_signing() {
                    prop_assert!(merchant.can_generate_agreement());
                }
                if merchant.can_generate_agreement() {
                    prop_assert!(banking && company && authorized);
                }
            }
        }
    }
}
