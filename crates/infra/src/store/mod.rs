//! Keyed person storage abstractions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryPersonStore;
pub use r#trait::{PersonStore, StoreError};
