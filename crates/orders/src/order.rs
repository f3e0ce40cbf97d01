use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use billing_core::{DomainResult, LocalizedText, WireTimestamp};

use crate::status::{DeclineCodeTable, OrderStatusTable, PublicOrderStatus, private_status};

/// Transaction parameter holding the payment system's decline code.
pub const TXN_PARAM_DECLINE_CODE: &str = "decline_code";
/// Transaction parameter holding the payment system's decline reason.
pub const TXN_PARAM_DECLINE_REASON: &str = "decline_reason";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderProject {
    pub id: String,
    pub merchant_id: String,
    pub name: LocalizedText,
    pub url_success: String,
    pub url_fail: String,
    pub notify_emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderPaymentMethod {
    pub id: String,
    pub name: String,
    pub external_id: String,
    pub payment_system_id: String,
    pub group: String,
}

/// Amounts due to the merchant and the platform for this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoyaltyData {
    pub merchant_total_amount: f64,
    pub merchant_tax_amount: f64,
    pub payment_system_fee_amount: f64,
    pub merchant_gross_amount: f64,
}

/// An order as loaded by the caller.
///
/// `private_status` is the fine-grained internal code; `status` holds the
/// derived public string once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub uuid: Uuid,
    pub transaction: String,
    pub project: Option<OrderProject>,
    pub payment_method: Option<OrderPaymentMethod>,
    pub royalty_data: Option<RoyaltyData>,
    pub private_status: i32,
    pub status: String,
    pub payment_method_txn_params: HashMap<String, String>,
    pub total_payment_amount: f64,
    pub currency: String,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
}

impl Order {
    pub fn public_status(&self, table: &OrderStatusTable) -> DomainResult<PublicOrderStatus> {
        table.lookup(self.private_status)
    }

    /// Derive the public status and store it in `status`.
    ///
    /// On an unmapped private status the order is left untouched.
    pub fn publish_status(&mut self, table: &OrderStatusTable) -> DomainResult<PublicOrderStatus> {
        let public = self.public_status(table)?;
        self.status = public.as_str().to_string();
        Ok(public)
    }

    pub fn decline_reason(&self) -> &str {
        self.txn_param(TXN_PARAM_DECLINE_REASON)
    }

    pub fn private_decline_code(&self) -> &str {
        self.txn_param(TXN_PARAM_DECLINE_CODE)
    }

    /// Public decline code, or `""` when the order carries no code or the code
    /// has no public translation.
    pub fn public_decline_code<'t>(&self, table: &'t DeclineCodeTable) -> &'t str {
        match self.private_decline_code() {
            "" => "",
            code => table.lookup(code),
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(
            self.private_status,
            private_status::PAYMENT_SYSTEM_DECLINE
                | private_status::PAYMENT_SYSTEM_REJECT
                | private_status::PAYMENT_SYSTEM_REJECT_ON_CREATE
        )
    }

    /// The order reached a state no payment flow moves it out of.
    pub fn has_final_status(&self, table: &OrderStatusTable) -> bool {
        self.public_status(table).is_ok_and(PublicOrderStatus::is_final)
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.merchant_id.as_str())
    }

    fn txn_param(&self, key: &str) -> &str {
        self.payment_method_txn_params
            .get(key)
            .map(String::as_str)
            .unwrap_or("")
    }
}
