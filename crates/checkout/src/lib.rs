//! Checkout domain module.
//!
//! The checkout is a two-screen form: payment method + address first, then
//! email + phone. This crate holds the in-progress draft, the phase-gated
//! validator that decides when the draft is ready, and the order assembled
//! from a ready draft. Pure logic: no IO, no events.

pub mod draft;
pub mod order;
pub mod validator;

pub use draft::{CheckoutDraft, CheckoutForm, DraftField, PaymentMethod};
pub use order::{FinalOrder, OrderConfirmation, SubmissionState};
pub use validator::{CheckoutStage, Validation, ValidationErrors, validate};
