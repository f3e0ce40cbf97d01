//! Products domain module.
//!
//! The wire `Product` entity, its business helpers, and its storage codec.
//! Pure conversion logic (no IO, no storage access).

pub mod product;
pub mod storage;

pub use product::{Product, ProductPrice};
pub use storage::{ProductDocument, StoredPrice, from_storage, to_storage};
