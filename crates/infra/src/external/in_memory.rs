//! Recording implementations of the external service contracts.
//!
//! Intended for tests/dev. Nothing leaves the process.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{
    DocumentSigner, Email, EmailSender, ExternalError, MessageBroker, SignatureLink,
    SignatureRequest, SignatureResponse, SignatureStatus,
};

/// Message broker that keeps every published message.
#[derive(Debug, Default)]
pub struct RecordingBroker {
    published: Mutex<Vec<(String, serde_json::Value)>>,
    unavailable: AtomicBool,
}

impl RecordingBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages published so far, oldest first.
    pub fn published(&self) -> Vec<(String, serde_json::Value)> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// While set, every publish fails with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageBroker for RecordingBroker {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), ExternalError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ExternalError::unavailable("broker", "connection refused"));
        }
        let mut published = self
            .published
            .lock()
            .map_err(|_| ExternalError::unavailable("broker", "lock poisoned"))?;
        published.push((topic.to_string(), payload));
        Ok(())
    }
}

/// Email sender that keeps every outgoing email.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
    unavailable: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// While set, every send fails with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), ExternalError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ExternalError::unavailable("mailer", "smtp relay down"));
        }
        if email.to.is_empty() {
            return Err(ExternalError::rejected("mailer", "empty recipient"));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| ExternalError::unavailable("mailer", "lock poisoned"))?;
        sent.push(email);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SignerState {
    next: u64,
    statuses: HashMap<String, SignatureStatus>,
}

/// Document signer that issues sequential signature ids.
///
/// Every new signature starts `Pending`; use [`StubSigner::set_status`] to
/// simulate a party signing.
#[derive(Debug, Default)]
pub struct StubSigner {
    state: Mutex<SignerState>,
}

impl StubSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, signature_id: &str, status: SignatureStatus) {
        if let Ok(mut state) = self.state.lock() {
            state.statuses.insert(signature_id.to_string(), status);
        }
    }
}

#[async_trait]
impl DocumentSigner for StubSigner {
    async fn create_signature(&self, request: SignatureRequest) -> Result<SignatureResponse, ExternalError> {
        if request.merchant_signer.email.is_empty() {
            return Err(ExternalError::rejected("signer", "merchant signer has no email"));
        }

        let mut state = self
            .state
            .lock()
            .map_err(|_| ExternalError::unavailable("signer", "lock poisoned"))?;
        state.next += 1;
        let request_no = state.next;

        let merchant_id = format!("sig-{request_no}-merchant");
        let ps_id = format!("sig-{request_no}-ps");
        state.statuses.insert(merchant_id.clone(), SignatureStatus::Pending);
        state.statuses.insert(ps_id.clone(), SignatureStatus::Pending);

        Ok(SignatureResponse {
            details_url: format!("https://sign.invalid/requests/{request_no}"),
            merchant: SignatureLink {
                sign_url: format!("https://sign.invalid/sign/{merchant_id}"),
                signature_id: merchant_id,
            },
            payment_system: SignatureLink {
                sign_url: format!("https://sign.invalid/sign/{ps_id}"),
                signature_id: ps_id,
            },
        })
    }

    async fn signature_status(&self, signature_id: &str) -> Result<SignatureStatus, ExternalError> {
        let state = self
            .state
            .lock()
            .map_err(|_| ExternalError::unavailable("signer", "lock poisoned"))?;
        state
            .statuses
            .get(signature_id)
            .copied()
            .ok_or_else(|| ExternalError::rejected("signer", format!("unknown signature {signature_id}")))
    }
}
