//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// `Money`, `Rank` and price quotes carry no identity; two values with the
/// same attributes are interchangeable. To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
