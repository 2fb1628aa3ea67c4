//! Phase-gated checkout validation.
//!
//! The draft moves through three stages:
//!
//! ```text
//! NeedsPaymentAddress ──(payment + address)──▶ NeedsContact ──(email + phone)──▶ Ready
//! ```
//!
//! Contact fields are only looked at once the first screen is complete, so a
//! customer still on the first screen never sees "email required".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopfront_core::ValueObject;

use crate::draft::{CheckoutDraft, CheckoutForm, DraftField};

pub const PAYMENT_REQUIRED: &str = "Необходимо указать метод оплаты";
pub const ADDRESS_REQUIRED: &str = "Необходимо указать адрес";
pub const EMAIL_REQUIRED: &str = "Необходимо указать email";
pub const PHONE_REQUIRED: &str = "Необходимо указать телефон";

fn required_message(field: DraftField) -> &'static str {
    match field {
        DraftField::Payment => PAYMENT_REQUIRED,
        DraftField::Address => ADDRESS_REQUIRED,
        DraftField::Email => EMAIL_REQUIRED,
        DraftField::Phone => PHONE_REQUIRED,
    }
}

/// Where a draft stands in the two-screen checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    NeedsPaymentAddress,
    NeedsContact,
    Ready,
}

impl CheckoutStage {
    pub fn of(draft: &CheckoutDraft) -> Self {
        validate(draft).stage
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CheckoutStage::Ready)
    }
}

/// Field → message for every currently invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<DraftField, String>);

impl ValueObject for ValidationErrors {}

impl ValidationErrors {
    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// True when none of `form`'s fields has an error.
    pub fn form_valid(&self, form: CheckoutForm) -> bool {
        form.fields().iter().all(|f| !self.contains(*f))
    }

    /// `form`'s messages joined with `"; "`, in the form's listing order.
    pub fn joined(&self, form: CheckoutForm) -> String {
        form.fields()
            .iter()
            .filter_map(|f| self.get(*f))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn require(&mut self, draft: &CheckoutDraft, field: DraftField) {
        if !draft.is_filled(field) {
            self.0.insert(field, required_message(field).to_string());
        }
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub stage: CheckoutStage,
    pub errors: ValidationErrors,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Evaluate `draft` against the two-phase policy. Never fails: an invalid
/// draft yields a non-empty error map.
pub fn validate(draft: &CheckoutDraft) -> Validation {
    let mut errors = ValidationErrors::default();

    errors.require(draft, DraftField::Payment);
    errors.require(draft, DraftField::Address);
    if !errors.is_empty() {
        return Validation {
            stage: CheckoutStage::NeedsPaymentAddress,
            errors,
        };
    }

    errors.require(draft, DraftField::Email);
    errors.require(draft, DraftField::Phone);
    let stage = if errors.is_empty() {
        CheckoutStage::Ready
    } else {
        CheckoutStage::NeedsContact
    };

    Validation { stage, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::PaymentMethod;

    fn draft(payment: Option<PaymentMethod>, address: &str, email: &str, phone: &str) -> CheckoutDraft {
        CheckoutDraft {
            payment,
            address: address.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn fields(v: &Validation) -> Vec<DraftField> {
        v.errors.fields().collect()
    }

    #[test]
    fn empty_draft_reports_only_first_screen() {
        let v = validate(&CheckoutDraft::default());

        assert_eq!(v.stage, CheckoutStage::NeedsPaymentAddress);
        assert_eq!(fields(&v), vec![DraftField::Payment, DraftField::Address]);
        assert_eq!(v.errors.get(DraftField::Payment), Some(PAYMENT_REQUIRED));
        assert_eq!(v.errors.get(DraftField::Address), Some(ADDRESS_REQUIRED));
    }

    #[test]
    fn contact_errors_suppressed_while_one_first_screen_field_missing() {
        let v = validate(&draft(Some(PaymentMethod::Online), "", "", ""));

        assert_eq!(v.stage, CheckoutStage::NeedsPaymentAddress);
        assert_eq!(fields(&v), vec![DraftField::Address]);
    }

    #[test]
    fn first_screen_complete_reports_contacts() {
        let v = validate(&draft(Some(PaymentMethod::Online), "Main St", "", ""));

        assert_eq!(v.stage, CheckoutStage::NeedsContact);
        assert_eq!(fields(&v), vec![DraftField::Email, DraftField::Phone]);
    }

    #[test]
    fn complete_draft_is_ready() {
        let v = validate(&draft(
            Some(PaymentMethod::OnDelivery),
            "Main St",
            "a@b.c",
            "+7 900 000 00 00",
        ));

        assert_eq!(v.stage, CheckoutStage::Ready);
        assert!(v.is_valid());
        assert!(v.errors.is_empty());
    }

    #[test]
    fn joined_lists_form_errors_in_display_order() {
        let first = validate(&CheckoutDraft::default()).errors;
        assert_eq!(
            first.joined(CheckoutForm::Order),
            format!("{PAYMENT_REQUIRED}; {ADDRESS_REQUIRED}")
        );
        assert_eq!(first.joined(CheckoutForm::Contacts), "");
        assert!(!first.form_valid(CheckoutForm::Order));
        assert!(first.form_valid(CheckoutForm::Contacts));

        let second = validate(&draft(Some(PaymentMethod::Online), "x", "", "")).errors;
        assert_eq!(
            second.joined(CheckoutForm::Contacts),
            format!("{PHONE_REQUIRED}; {EMAIL_REQUIRED}")
        );
        assert!(second.form_valid(CheckoutForm::Order));
    }

    #[test]
    fn errors_serialize_as_field_keyed_map() {
        let errors = validate(&CheckoutDraft::default()).errors;
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json["payment"], PAYMENT_REQUIRED);
        assert_eq!(json["address"], ADDRESS_REQUIRED);
        assert!(json.get("email").is_none());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn text() -> impl Strategy<Value = String> {
            prop_oneof![Just(String::new()), "[a-z@. ]{1,12}"]
        }

        fn payment() -> impl Strategy<Value = Option<PaymentMethod>> {
            prop_oneof![
                Just(None),
                Just(Some(PaymentMethod::Online)),
                Just(Some(PaymentMethod::OnDelivery)),
            ]
        }

        proptest! {
            /// Property: contact errors never appear before the first screen is complete,
            /// and the draft is valid exactly when the stage is Ready.
            #[test]
            fn phase_gating_holds(
                payment in payment(),
                address in text(),
                email in text(),
                phone in text()
            ) {
                let d = draft(payment, &address, &email, &phone);
                let v = validate(&d);
                let first_done = payment.is_some() && !address.is_empty();

                if !first_done {
                    prop_assert!(!v.errors.contains(DraftField::Email));
                    prop_assert!(!v.errors.contains(DraftField::Phone));
                    prop_assert_eq!(v.stage, CheckoutStage::NeedsPaymentAddress);
                }
                prop_assert_eq!(v.is_valid(), v.stage.is_ready());
                prop_assert_eq!(
                    v.is_valid(),
                    first_done && !email.is_empty() && !phone.is_empty()
                );
            }
        }
    }
}
