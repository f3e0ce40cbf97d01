//! Document storage abstractions.

pub mod document;
pub mod in_memory;

pub use document::{DocumentStore, StoreError, StoredDocument};
pub use in_memory::InMemoryDocumentStore;
