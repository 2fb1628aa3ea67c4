use std::borrow::Cow;

use shopfront_catalog::Catalog;
use shopfront_checkout::{CheckoutDraft, CheckoutForm, DraftField, SubmissionState, ValidationErrors};
use shopfront_core::ProductId;
use shopfront_events::{Event, Matcher};

/// Stable event names.
pub mod names {
    pub const ITEMS_RENDER: &str = "items:render";
    pub const BASKET_CHANGED: &str = "basket:changed";
    pub const ORDER_CHANGED: &str = "order:changed";
    pub const FORM_ERRORS_CHANGE: &str = "formErrors:change";
    pub const ORDER_READY: &str = "order:ready";
    pub const SUBMISSION_CHANGED: &str = "submission:changed";

    pub const CARD_SELECT: &str = "card:select";
    pub const CARD_TOGGLE: &str = "card:toggle";
    pub const BASKET_OPEN: &str = "basket:open";
    pub const BASKET_REMOVE: &str = "basket:remove";
    pub const ORDER_OPEN: &str = "order:open";
    pub const ORDER_SUBMIT: &str = "order:submit";
    pub const CONTACTS_OPEN: &str = "contacts:open";
    pub const SUCCESS_CLOSE: &str = "success:close";

    pub const FIELD_CHANGE_SUFFIX: &str = ":change";
}

/// Basket contents at the time of a `basket:changed` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasketSnapshot {
    pub items: Vec<ProductId>,
    pub total: u64,
}

/// Everything that travels over the storefront broker.
///
/// The first group is emitted by `ShopState` after a mutation; the second is
/// emitted by the UI and consumed by the orchestration layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    CatalogChanged(Catalog),
    BasketChanged(BasketSnapshot),
    DraftChanged(CheckoutDraft),
    FormErrorsChanged(ValidationErrors),
    DraftReady(CheckoutDraft),
    SubmissionChanged(SubmissionState),

    CardSelected(ProductId),
    CardToggled(ProductId),
    BasketOpened,
    BasketItemRemoved(ProductId),
    OrderOpened,
    OrderSubmitted,
    ContactsOpened,
    FieldChanged {
        form: CheckoutForm,
        field: DraftField,
        value: String,
    },
    SuccessClosed,
}

impl ShopEvent {
    /// Per-field change event as emitted by a form input.
    pub fn field_changed(form: CheckoutForm, field: DraftField, value: impl Into<String>) -> Self {
        ShopEvent::FieldChanged {
            form,
            field,
            value: value.into(),
        }
    }

    /// Matcher for every per-field change event of `form` (`order.*:change`).
    pub fn field_changes(form: CheckoutForm) -> Matcher {
        Matcher::family(format!("{}.", form.as_str()), names::FIELD_CHANGE_SUFFIX)
    }
}

impl Event for ShopEvent {
    fn event_name(&self) -> Cow<'static, str> {
        let name = match self {
            ShopEvent::CatalogChanged(_) => names::ITEMS_RENDER,
            ShopEvent::BasketChanged(_) => names::BASKET_CHANGED,
            ShopEvent::DraftChanged(_) => names::ORDER_CHANGED,
            ShopEvent::FormErrorsChanged(_) => names::FORM_ERRORS_CHANGE,
            ShopEvent::DraftReady(_) => names::ORDER_READY,
            ShopEvent::SubmissionChanged(_) => names::SUBMISSION_CHANGED,
            ShopEvent::CardSelected(_) => names::CARD_SELECT,
            ShopEvent::CardToggled(_) => names::CARD_TOGGLE,
            ShopEvent::BasketOpened => names::BASKET_OPEN,
            ShopEvent::BasketItemRemoved(_) => names::BASKET_REMOVE,
            ShopEvent::OrderOpened => names::ORDER_OPEN,
            ShopEvent::OrderSubmitted => names::ORDER_SUBMIT,
            ShopEvent::ContactsOpened => names::CONTACTS_OPEN,
            ShopEvent::FieldChanged { form, field, .. } => {
                return Cow::Owned(form.field_event_name(*field));
            }
            ShopEvent::SuccessClosed => names::SUCCESS_CLOSE,
        };
        Cow::Borrowed(name)
    }
}
