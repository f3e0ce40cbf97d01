//! Workflows that combine the domain predicates with storage and the
//! external service contracts.

pub mod agreement;
pub mod orders;
pub mod royalty;

pub use agreement::AgreementService;
pub use orders::OrderStatusNotifier;
pub use royalty::{AutoAcceptOutcome, RoyaltyReportService, StatusChange};
