//! Optimistic concurrency expectations for stored documents.

use crate::error::{DomainError, DomainResult};

/// Revision a writer expects a document to be at before replacing it.
///
/// Revision `0` means "never written".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip revision checking (migrations, idempotent upserts).
    Any,
    /// The document must not exist yet.
    Absent,
    /// Require the document to be at an exact revision.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Absent => actual == 0,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
