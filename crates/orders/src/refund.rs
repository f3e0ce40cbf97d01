//! Refunds and their public JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use billing_core::{DomainError, DomainResult, WireTimestamp, time};

/// The order a refund was issued against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RefundOrder {
    /// Internal order id.
    pub id: String,
    /// Public order identifier shown to merchants.
    pub uuid: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RefundPayerData {
    pub country: String,
    pub zip: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Refund {
    pub id: String,
    pub original_order: Option<RefundOrder>,
    pub external_id: String,
    pub amount: f64,
    pub creator_id: String,
    pub reason: String,
    pub currency: String,
    pub status: i32,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
    pub payer_data: Option<RefundPayerData>,
    pub sales_tax: f64,
    pub is_chargeback: bool,
}

/// Public JSON view of a refund. `order_id` is the order's public uuid.
#[derive(Debug, Serialize)]
struct PublicRefund<'a> {
    id: &'a str,
    order_id: Uuid,
    external_id: &'a str,
    amount: f64,
    creator_id: &'a str,
    reason: &'a str,
    currency: &'a str,
    status: i32,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    payer_data: Option<&'a RefundPayerData>,
    sales_tax: f64,
}

impl Refund {
    /// Render the public JSON representation.
    ///
    /// Fails when the refund is not attached to an order or carries an
    /// unrepresentable timestamp.
    pub fn to_public_json(&self) -> DomainResult<serde_json::Value> {
        let order = self.original_order.as_ref().ok_or_else(|| {
            DomainError::missing_relation(format!("refund {} has no original order", self.id))
        })?;

        let view = PublicRefund {
            id: &self.id,
            order_id: order.uuid,
            external_id: &self.external_id,
            amount: self.amount,
            creator_id: &self.creator_id,
            reason: &self.reason,
            currency: &self.currency,
            status: self.status,
            created_at: self.created_at.as_ref().map(time::decode).transpose()?,
            updated_at: self.updated_at.as_ref().map(time::decode).transpose()?,
            payer_data: self.payer_data.as_ref(),
            sales_tax: self.sales_tax,
        };

        serde_json::to_value(&view)
            .map_err(|e| DomainError::validation(format!("refund {}: {e}", self.id)))
    }
}
