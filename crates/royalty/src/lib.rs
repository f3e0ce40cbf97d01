//! Royalty reports domain module.
//!
//! Periodic statements of what the platform owes a merchant, and the approval
//! workflow they move through. Pure state-machine logic, no IO.

pub mod report;

pub use report::{RoyaltyReport, RoyaltyReportStatus, RoyaltyReportTotals};
