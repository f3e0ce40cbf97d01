//! Typed repositories over a [`DocumentStore`](crate::store::DocumentStore).
//!
//! Each repository runs the entity's storage codec on the way in and out, so
//! callers only ever see wire entities.

pub mod onboarding;
pub mod paylinks;
pub mod products;
pub mod records;

pub use onboarding::OnboardingRepository;
pub use paylinks::PaylinkRepository;
pub use products::ProductRepository;
pub use records::{Record, RecordRepository};

/// An entity together with the store revision it was read at (or written as).
///
/// Pass `revision` back as `ExpectedVersion::Exact` to detect lost updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub revision: u64,
}
