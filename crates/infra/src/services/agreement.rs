use chrono::{DateTime, Utc};
use serde_json::json;

use billing_core::{DomainError, WireTimestamp};
use billing_merchants::{AgreementSignatureData, Merchant, MerchantStatus};

use crate::error::ServiceResult;
use crate::external::{
    DocumentSigner, MessageBroker, Signatory, SignatureRequest, SignatureStatus, SignerInfo,
};

/// Drives a merchant through agreement signing.
#[derive(Debug)]
pub struct AgreementService<D, B> {
    signer: D,
    broker: B,
    topic: String,
}

impl<D: DocumentSigner, B: MessageBroker> AgreementService<D, B> {
    pub fn new(signer: D, broker: B, topic: impl Into<String>) -> Self {
        Self {
            signer,
            broker,
            topic: topic.into(),
        }
    }

    /// Open signature requests for the merchant agreement.
    ///
    /// A merchant on review moves to `AgreementSigning`. Calling this while a
    /// signing is already in flight is a no-op. `merchant` is only updated
    /// once the broker accepted the event.
    pub async fn start_signing(&self, merchant: &mut Merchant, now: DateTime<Utc>) -> ServiceResult<()> {
        if merchant.is_agreement_signed() {
            return Err(DomainError::illegal_transition(format!(
                "merchant {}: agreement already signed",
                merchant.id
            ))
            .into());
        }
        if !merchant.can_generate_agreement() {
            return Err(DomainError::illegal_transition(format!(
                "merchant {}: agreement cannot be generated in status {:?}",
                merchant.id, merchant.status
            ))
            .into());
        }
        if merchant.is_agreement_signing_started() {
            tracing::debug!(merchant_id = %merchant.id, "agreement signing already started");
            return Ok(());
        }

        let contact = merchant
            .contacts
            .as_ref()
            .and_then(|c| c.authorized.as_ref())
            .ok_or_else(|| {
                DomainError::missing_relation(format!(
                    "merchant {} has no authorized contact",
                    merchant.id
                ))
            })?;
        let company = merchant
            .company
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or_default();

        let response = self
            .signer
            .create_signature(SignatureRequest {
                merchant_id: merchant.id.clone(),
                title: format!("License agreement: {company}"),
                merchant_signer: SignerInfo {
                    name: contact.name.clone(),
                    email: contact.email.clone(),
                },
            })
            .await?;

        let mut updated = merchant.clone();
        updated.agreement_signature_data = Some(AgreementSignatureData {
            details_url: response.details_url,
            merchant_signature_id: response.merchant.signature_id,
            merchant_sign_url: response.merchant.sign_url,
            ps_signature_id: response.payment_system.signature_id,
            ps_sign_url: response.payment_system.sign_url,
        });
        if updated.can_change_status_to_signing() {
            updated.status = MerchantStatus::AgreementSigning;
        }
        updated.updated_at = Some(WireTimestamp::from(now));

        self.broker
            .publish(
                &self.topic,
                json!({
                    "event": "agreement_signing_started",
                    "merchant_id": updated.id,
                }),
            )
            .await?;

        tracing::info!(merchant_id = %updated.id, "agreement signing started");
        *merchant = updated;
        Ok(())
    }

    /// Record one party's signature. Returns `true` when this completed the
    /// agreement and the merchant moved to `AgreementSigned`.
    pub async fn mark_signed(
        &self,
        merchant: &mut Merchant,
        signatory: Signatory,
        now: DateTime<Utc>,
    ) -> ServiceResult<bool> {
        if merchant.agreement_signature_data.is_none() {
            return Err(DomainError::missing_relation(format!(
                "merchant {}: no signature requests",
                merchant.id
            ))
            .into());
        }

        let mut updated = merchant.clone();
        set_signature(&mut updated, signatory);
        updated.updated_at = Some(WireTimestamp::from(now));
        tracing::info!(merchant_id = %updated.id, ?signatory, "agreement signed by party");

        self.commit(merchant, updated).await
    }

    /// Poll the signer for parties that have not signed yet.
    pub async fn refresh_signatures(&self, merchant: &mut Merchant, now: DateTime<Utc>) -> ServiceResult<bool> {
        let data = merchant.agreement_signature_data.clone().ok_or_else(|| {
            DomainError::missing_relation(format!("merchant {}: no signature requests", merchant.id))
        })?;

        let mut updated = merchant.clone();
        let pending = [
            (Signatory::Merchant, updated.has_merchant_signature, data.merchant_signature_id),
            (Signatory::PaymentSystem, updated.has_psp_signature, data.ps_signature_id),
        ];
        for (signatory, signed, signature_id) in pending {
            if signed {
                continue;
            }
            match self.signer.signature_status(&signature_id).await? {
                SignatureStatus::Signed => {
                    set_signature(&mut updated, signatory);
                    updated.updated_at = Some(WireTimestamp::from(now));
                }
                SignatureStatus::Declined => {
                    tracing::warn!(merchant_id = %updated.id, ?signatory, "agreement signature declined");
                }
                SignatureStatus::Pending => {}
            }
        }

        self.commit(merchant, updated).await
    }

    /// Move `updated` to `AgreementSigned` when both signatures are in,
    /// publish, then replace `merchant`. On error `merchant` is untouched.
    async fn commit(&self, merchant: &mut Merchant, mut updated: Merchant) -> ServiceResult<bool> {
        let completed = self.complete_if_signed(&mut updated).await?;
        *merchant = updated;
        Ok(completed)
    }

    async fn complete_if_signed(&self, merchant: &mut Merchant) -> ServiceResult<bool> {
        if !merchant.need_mark_agreement_as_signed() {
            return Ok(false);
        }

        merchant.status = MerchantStatus::AgreementSigned;
        self.broker
            .publish(
                &self.topic,
                json!({
                    "event": "agreement_signed",
                    "merchant_id": merchant.id,
                }),
            )
            .await?;
        tracing::info!(merchant_id = %merchant.id, "agreement signed");
        Ok(true)
    }
}

fn set_signature(merchant: &mut Merchant, signatory: Signatory) {
    match signatory {
        Signatory::Merchant => merchant.has_merchant_signature = true,
        Signatory::PaymentSystem => merchant.has_psp_signature = true,
    }
}
