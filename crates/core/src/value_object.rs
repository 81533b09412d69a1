//! Value object trait: equality by value, not identity.
//!
//! A person's address is the canonical example here: two addresses with the same
//! city, street and building are the same address, and an address is replaced as
//! a whole rather than edited field by field.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity, compared by attribute values
/// - **Entity**: has identity (two persons with the same id are the same record)
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Address {
///     city: String,
///     street: String,
///     building: i32,
/// }
///
/// impl ValueObject for Address {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
