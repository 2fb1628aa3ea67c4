//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type ShopResult<T> = Result<T, ShopError>;

/// Domain-level error.
///
/// Keep this focused on deterministic storefront failures (malformed input,
/// checkout preconditions). Transport concerns belong to the API client.
/// Validation of the checkout draft is *not* reported through this type: an
/// incomplete draft is data (`ValidationErrors`), not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A payment method string did not match any known method.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// A checkout field or form name was not recognised.
    #[error("unknown checkout field: {0}")]
    UnknownField(String),

    /// An order was requested from a draft that has not passed both phases.
    #[error("checkout incomplete: {0}")]
    CheckoutIncomplete(String),

    /// An order submission is already in flight.
    #[error("an order submission is already in progress")]
    SubmissionInProgress,
}

impl ShopError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_payment_method(value: impl Into<String>) -> Self {
        Self::UnknownPaymentMethod(value.into())
    }

    pub fn unknown_field(value: impl Into<String>) -> Self {
        Self::UnknownField(value.into())
    }

    pub fn checkout_incomplete(msg: impl Into<String>) -> Self {
        Self::CheckoutIncomplete(msg.into())
    }
}
