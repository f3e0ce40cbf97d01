//! Orders domain module.
//!
//! Translation of fine-grained private order statuses and decline codes into
//! their public counterparts, plus the public refund representation. The
//! translation tables are plain values built once and passed in.

pub mod order;
pub mod refund;
pub mod status;

pub use order::{Order, OrderPaymentMethod, OrderProject, RoyaltyData};
pub use refund::{Refund, RefundOrder, RefundPayerData};
pub use status::{DeclineCodeTable, OrderStatusTable, PublicOrderStatus, private_status};
