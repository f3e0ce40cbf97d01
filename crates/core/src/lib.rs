//! `billing-core`: storage-mapping building blocks.
//!
//! This crate contains the **pure** leaf codecs shared by every entity codec
//! (identifiers, timestamps, localized text) and the domain error model. No IO.

pub mod document;
pub mod error;
pub mod i18n;
pub mod id;
pub mod time;
pub mod version;

pub use error::{DomainError, DomainResult};
pub use i18n::{LocalizedText, SearchableText};
pub use time::WireTimestamp;
pub use version::ExpectedVersion;

pub use bson::oid::ObjectId;
