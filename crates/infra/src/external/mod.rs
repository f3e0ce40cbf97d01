//! Contracts of the external services the billing workflows call.
//!
//! Transport details (HTTP clients, broker connections, SMTP) live behind
//! these traits; [`in_memory`] provides recording implementations.

pub mod in_memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("{service} rejected the request: {message}")]
    Rejected { service: &'static str, message: String },

    #[error("{service} unavailable: {message}")]
    Unavailable { service: &'static str, message: String },
}

impl ExternalError {
    pub fn rejected(service: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            service,
            message: message.into(),
        }
    }

    pub fn unavailable(service: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            message: message.into(),
        }
    }
}

/// One of the two agreement signatories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signatory {
    Merchant,
    PaymentSystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerInfo {
    pub name: String,
    pub email: String,
}

/// Request to open a two-party signature flow for a merchant agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRequest {
    pub merchant_id: String,
    pub title: String,
    pub merchant_signer: SignerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureLink {
    pub signature_id: String,
    pub sign_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResponse {
    pub details_url: String,
    pub merchant: SignatureLink,
    pub payment_system: SignatureLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    Pending,
    Signed,
    Declined,
}

#[async_trait]
pub trait DocumentSigner: Send + Sync {
    async fn create_signature(&self, request: SignatureRequest) -> Result<SignatureResponse, ExternalError>;

    async fn signature_status(&self, signature_id: &str) -> Result<SignatureStatus, ExternalError>;
}

#[async_trait]
pub trait MessageBroker: Send + Sync {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), ExternalError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), ExternalError>;
}

#[async_trait]
impl<T: DocumentSigner + ?Sized> DocumentSigner for Arc<T> {
    async fn create_signature(&self, request: SignatureRequest) -> Result<SignatureResponse, ExternalError> {
        (**self).create_signature(request).await
    }

    async fn signature_status(&self, signature_id: &str) -> Result<SignatureStatus, ExternalError> {
        (**self).signature_status(signature_id).await
    }
}

#[async_trait]
impl<T: MessageBroker + ?Sized> MessageBroker for Arc<T> {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), ExternalError> {
        (**self).publish(topic, payload).await
    }
}

#[async_trait]
impl<T: EmailSender + ?Sized> EmailSender for Arc<T> {
    async fn send(&self, email: Email) -> Result<(), ExternalError> {
        (**self).send(email).await
    }
}
