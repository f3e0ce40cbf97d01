use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billing_core::{DomainError, DomainResult, WireTimestamp};

/// Royalty report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoyaltyReportStatus {
    #[default]
    New,
    Pending,
    Accepted,
    Canceled,
    Dispute,
}

impl RoyaltyReportStatus {
    pub const ALL: [RoyaltyReportStatus; 5] = [
        RoyaltyReportStatus::New,
        RoyaltyReportStatus::Pending,
        RoyaltyReportStatus::Accepted,
        RoyaltyReportStatus::Canceled,
        RoyaltyReportStatus::Dispute,
    ];

    /// Statuses reachable from `self` in one step.
    pub fn allowed_targets(self) -> &'static [RoyaltyReportStatus] {
        use RoyaltyReportStatus::*;
        match self {
            Accepted => &[],
            New => &[Pending, Canceled],
            Pending => &[Accepted, Dispute],
            Canceled => &[New],
            Dispute => &[Pending],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoyaltyReportTotals {
    pub transactions_count: i32,
    pub fee_amount: f64,
    pub vat_amount: f64,
    pub payout_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoyaltyReport {
    pub id: String,
    pub merchant_id: String,
    pub status: RoyaltyReportStatus,
    pub period_from: Option<WireTimestamp>,
    pub period_to: Option<WireTimestamp>,
    /// Deadline after which a pending report is accepted automatically.
    pub accept_expire_at: Option<WireTimestamp>,
    pub accepted_at: Option<WireTimestamp>,
    pub is_auto_accepted: bool,
    pub totals: Option<RoyaltyReportTotals>,
    pub currency: String,
    pub dispute_reason: String,
    pub dispute_started_at: Option<WireTimestamp>,
    pub dispute_closed_at: Option<WireTimestamp>,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
}

impl RoyaltyReport {
    /// Whether moving to `target` is allowed from the current status.
    pub fn changes_available(&self, target: RoyaltyReportStatus) -> bool {
        self.status.allowed_targets().contains(&target)
    }

    /// Apply a status change, stamping the matching timestamps.
    pub fn change_status(&mut self, target: RoyaltyReportStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.changes_available(target) {
            return Err(DomainError::illegal_transition(format!(
                "royalty report {}: {:?} -> {:?}",
                self.id, self.status, target
            )));
        }

        let stamp = Some(WireTimestamp::from(now));
        match (self.status, target) {
            (_, RoyaltyReportStatus::Accepted) => self.accepted_at = stamp,
            (_, RoyaltyReportStatus::Dispute) => self.dispute_started_at = stamp,
            (RoyaltyReportStatus::Dispute, RoyaltyReportStatus::Pending) => {
                self.dispute_closed_at = stamp
            }
            _ => {}
        }

        tracing::info!(
            report_id = %self.id,
            from = ?self.status,
            to = ?target,
            "royalty report status changed"
        );
        self.status = target;
        self.updated_at = stamp;
        Ok(())
    }

    /// Pending and past its acceptance deadline.
    pub fn is_accept_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == RoyaltyReportStatus::Pending
            && self
                .accept_expire_at
                .is_some_and(|deadline| deadline < WireTimestamp::from(now))
    }

    /// Accept a report whose deadline passed without a merchant decision.
    pub fn auto_accept(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_accept_expired(now) {
            return Err(DomainError::illegal_transition(format!(
                "royalty report {}: acceptance deadline not reached",
                self.id
            )));
        }
        self.change_status(RoyaltyReportStatus::Accepted, now)?;
        self.is_auto_accepted = true;
        Ok(())
    }
}
