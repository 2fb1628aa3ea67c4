//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity** - they are defined entirely by their
//! attribute values. In the storefront the checkout draft, the validation
//! result and the final order are value objects: observers receive copies of
//! them in event payloads and compare them by value.

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: payloads are handed to every subscriber of an event
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: payloads are logged by the event tap
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Address(String);
///
/// impl ValueObject for Address {}
///
/// assert_eq!(Address("Main St".into()), Address("Main St".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
