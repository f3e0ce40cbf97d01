//! Paylinks domain module.
//!
//! A paylink is a shareable checkout link for a fixed set of products. This
//! crate holds the wire entity, the expiry rule, and the storage codec.

pub mod paylink;
pub mod storage;

pub use paylink::Paylink;
pub use storage::{PaylinkDocument, from_storage, to_storage};
