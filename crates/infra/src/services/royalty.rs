use chrono::{DateTime, Utc};

use billing_core::ExpectedVersion;
use billing_royalty::{RoyaltyReport, RoyaltyReportStatus};

use crate::error::{ServiceError, ServiceResult};
use crate::external::{Email, EmailSender};
use crate::repositories::{RecordRepository, Versioned};
use crate::store::{DocumentStore, StoreError};

/// A persisted status change and whether finance was told about it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub report: RoyaltyReport,
    /// `false` when the notification mail could not be sent. The change is
    /// persisted either way.
    pub notified: bool,
}

/// Result of an auto-accept run. Every list is sorted by report id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoAcceptOutcome {
    /// Reports accepted and persisted by this run.
    pub accepted: Vec<String>,
    /// Accepted reports whose notification mail failed.
    pub unnotified: Vec<String>,
    /// Reports written by someone else between the scan and the save.
    pub conflicted: Vec<String>,
}

/// Royalty report status changes with persistence and finance notifications.
#[derive(Debug)]
pub struct RoyaltyReportService<S, E> {
    reports: RecordRepository<RoyaltyReport, S>,
    mailer: E,
    finance_email: String,
}

impl<S: DocumentStore, E: EmailSender> RoyaltyReportService<S, E> {
    pub fn new(store: S, mailer: E, finance_email: impl Into<String>) -> Self {
        Self {
            reports: RecordRepository::new(store),
            mailer,
            finance_email: finance_email.into(),
        }
    }

    pub fn reports(&self) -> &RecordRepository<RoyaltyReport, S> {
        &self.reports
    }

    /// Load, transition and write back a report.
    ///
    /// A concurrent write between the load and the save surfaces as a store
    /// conflict and nothing is persisted.
    pub async fn change_status(
        &self,
        report_id: &str,
        target: RoyaltyReportStatus,
        now: DateTime<Utc>,
    ) -> ServiceResult<StatusChange> {
        let Versioned { mut value, revision } = self.reports.get(report_id)?;
        value.change_status(target, now)?;
        self.reports.save(&value, ExpectedVersion::Exact(revision))?;

        let notified = self.notify(&value).await;
        Ok(StatusChange {
            report: value,
            notified,
        })
    }

    /// Move a pending report into dispute with the merchant's reason.
    pub async fn open_dispute(
        &self,
        report_id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<StatusChange> {
        let Versioned { mut value, revision } = self.reports.get(report_id)?;
        value.change_status(RoyaltyReportStatus::Dispute, now)?;
        value.dispute_reason = reason.to_string();
        self.reports.save(&value, ExpectedVersion::Exact(revision))?;

        let notified = self.notify(&value).await;
        Ok(StatusChange {
            report: value,
            notified,
        })
    }

    /// Accept every pending report whose deadline passed.
    ///
    /// Failed mails and concurrently changed reports are recorded in the
    /// outcome and do not stop the run.
    pub async fn auto_accept_expired(&self, now: DateTime<Utc>) -> ServiceResult<AutoAcceptOutcome> {
        let mut outcome = AutoAcceptOutcome::default();
        for Versioned { mut value, revision } in self.reports.list()? {
            if !value.is_accept_expired(now) {
                continue;
            }
            value.auto_accept(now)?;

            match self.reports.save(&value, ExpectedVersion::Exact(revision)) {
                Ok(_) => {}
                Err(ServiceError::Store(StoreError::Concurrency(reason))) => {
                    tracing::warn!(report_id = %value.id, %reason, "royalty report changed during auto-accept");
                    outcome.conflicted.push(value.id);
                    continue;
                }
                Err(e) => return Err(e),
            }

            if !self.notify(&value).await {
                outcome.unnotified.push(value.id.clone());
            }
            outcome.accepted.push(value.id);
        }

        if !outcome.accepted.is_empty() {
            tracing::info!(
                count = outcome.accepted.len(),
                unnotified = outcome.unnotified.len(),
                "royalty reports auto-accepted"
            );
        }
        outcome.accepted.sort();
        outcome.unnotified.sort();
        outcome.conflicted.sort();
        Ok(outcome)
    }

    /// Mail finance about acceptance or dispute. Returns `false` when the
    /// mail failed; statuses that need no mail count as notified.
    async fn notify(&self, report: &RoyaltyReport) -> bool {
        let subject = match report.status {
            RoyaltyReportStatus::Accepted if report.is_auto_accepted => {
                format!("Royalty report {} auto-accepted", report.id)
            }
            RoyaltyReportStatus::Accepted => format!("Royalty report {} accepted", report.id),
            RoyaltyReportStatus::Dispute => format!("Royalty report {} disputed", report.id),
            _ => return true,
        };

        let body = match report.status {
            RoyaltyReportStatus::Dispute => format!(
                "Merchant {} opened a dispute: {}",
                report.merchant_id, report.dispute_reason
            ),
            _ => format!("Merchant {}, currency {}", report.merchant_id, report.currency),
        };

        let email = Email {
            to: self.finance_email.clone(),
            subject,
            body,
        };
        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(report_id = %report.id, %error, "royalty report notification not sent");
                false
            }
        }
    }
}
