use serde::{Deserialize, Serialize};

use shopfront_core::{OrderId, ProductId, ShopError, ShopResult, ValueObject};

use crate::draft::{CheckoutDraft, PaymentMethod};
use crate::validator::validate;

/// The order as submitted to the API.
///
/// Only ever assembled at submission time from a ready draft plus the basket
/// as it is at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalOrder {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: u64,
    pub items: Vec<ProductId>,
}

impl ValueObject for FinalOrder {}

impl FinalOrder {
    pub fn assemble(draft: &CheckoutDraft, items: Vec<ProductId>, total: u64) -> ShopResult<Self> {
        let validation = validate(draft);
        if !validation.is_valid() {
            return Err(ShopError::checkout_incomplete(format!(
                "draft is at stage {:?}",
                validation.stage
            )));
        }
        let Some(payment) = draft.payment else {
            return Err(ShopError::checkout_incomplete("payment method missing"));
        };
        if items.is_empty() {
            return Err(ShopError::checkout_incomplete("basket is empty"));
        }

        Ok(Self {
            payment,
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
            total,
            items,
        })
    }
}

/// Successful answer to an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub total: u64,
}

/// Whether an order is currently in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}
