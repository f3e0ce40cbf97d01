//! Private -> public translation tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use billing_core::{DomainError, DomainResult};

/// Private (internal) order status codes.
pub mod private_status {
    pub const NEW: i32 = 0;
    pub const PAYMENT_SYSTEM_CREATE: i32 = 1;
    pub const PAYMENT_SYSTEM_REJECT_ON_CREATE: i32 = 2;
    pub const PAYMENT_SYSTEM_REJECT: i32 = 3;
    pub const PAYMENT_SYSTEM_COMPLETE: i32 = 4;
    pub const PROJECT_IN_PROGRESS: i32 = 5;
    pub const PROJECT_COMPLETE: i32 = 6;
    pub const PROJECT_PENDING: i32 = 7;
    pub const PROJECT_REJECT: i32 = 8;
    pub const REFUND: i32 = 9;
    pub const CHARGEBACK: i32 = 10;
    pub const PAYMENT_SYSTEM_DECLINE: i32 = 11;
    pub const PAYMENT_SYSTEM_CANCEL: i32 = 12;
}

/// Coarse order status exposed to merchants and webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicOrderStatus {
    Created,
    Canceled,
    Rejected,
    Processed,
    Refunded,
    Chargeback,
}

impl PublicOrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PublicOrderStatus::Created => "created",
            PublicOrderStatus::Canceled => "canceled",
            PublicOrderStatus::Rejected => "rejected",
            PublicOrderStatus::Processed => "processed",
            PublicOrderStatus::Refunded => "refunded",
            PublicOrderStatus::Chargeback => "chargeback",
        }
    }

    /// No further status changes are expected.
    pub fn is_final(self) -> bool {
        !matches!(self, PublicOrderStatus::Created)
    }
}

impl core::fmt::Display for PublicOrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Private status code -> public status.
///
/// Intermediate project states (`PROJECT_IN_PROGRESS`, `PROJECT_PENDING`)
/// have no public counterpart and are reported as unmapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusTable {
    entries: HashMap<i32, PublicOrderStatus>,
}

impl OrderStatusTable {
    pub fn new(entries: HashMap<i32, PublicOrderStatus>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, private: i32) -> DomainResult<PublicOrderStatus> {
        self.entries
            .get(&private)
            .copied()
            .ok_or(DomainError::UnmappedStatus(private))
    }
}

impl Default for OrderStatusTable {
    fn default() -> Self {
        use private_status::*;
        use PublicOrderStatus::*;

        Self::new(HashMap::from([
            (NEW, Created),
            (PAYMENT_SYSTEM_CREATE, Created),
            (PAYMENT_SYSTEM_CANCEL, Canceled),
            (PAYMENT_SYSTEM_REJECT_ON_CREATE, Rejected),
            (PAYMENT_SYSTEM_REJECT, Rejected),
            (PROJECT_REJECT, Rejected),
            (PAYMENT_SYSTEM_DECLINE, Rejected),
            (PAYMENT_SYSTEM_COMPLETE, Processed),
            (PROJECT_COMPLETE, Processed),
            (REFUND, Refunded),
            (CHARGEBACK, Chargeback),
        ]))
    }
}

/// Payment-system decline code -> public decline code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclineCodeTable {
    entries: HashMap<String, String>,
}

impl DeclineCodeTable {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Public code for `private`, or `""` when there is none.
    pub fn lookup(&self, private: &str) -> &str {
        self.entries.get(private).map(String::as_str).unwrap_or("")
    }

    /// Add or replace entries, returning the combined table.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.entries.extend(overrides);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DeclineCodeTable {
    fn default() -> Self {
        let entries = [
            ("1", "ps000001"), // general decline
            ("2", "ps000002"), // insufficient funds
            ("3", "ps000003"), // invalid card number
            ("4", "ps000004"), // card expired
            ("5", "ps000005"), // suspected fraud
            ("6", "ps000006"), // 3-D Secure authentication failed
            ("7", "ps000007"), // limit exceeded
            ("8", "ps000008"), // issuer unavailable
            ("9", "ps000009"), // transaction not permitted
            ("10", "ps000010"), // lost or stolen card
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
