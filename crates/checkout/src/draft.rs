use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shopfront_core::{ShopError, ValueObject};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "online", alias = "card")]
    Online,
    #[serde(rename = "cash")]
    OnDelivery,
}

impl PaymentMethod {
    /// Wire value sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::OnDelivery => "cash",
        }
    }

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "Онлайн",
            PaymentMethod::OnDelivery => "При получении",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ShopError;

    /// Accepts wire values, the form button names and the labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" | "card" | "Онлайн" => Ok(PaymentMethod::Online),
            "cash" | "При получении" => Ok(PaymentMethod::OnDelivery),
            other => Err(ShopError::unknown_payment_method(other)),
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input of the checkout forms.
///
/// The declaration order is the order errors are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Payment,
    Address,
    Email,
    Phone,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Payment,
        DraftField::Address,
        DraftField::Email,
        DraftField::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Payment => "payment",
            DraftField::Address => "address",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
        }
    }

    /// The screen this field is entered on.
    pub fn form(&self) -> CheckoutForm {
        match self {
            DraftField::Payment | DraftField::Address => CheckoutForm::Order,
            DraftField::Email | DraftField::Phone => CheckoutForm::Contacts,
        }
    }
}

impl FromStr for DraftField {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ShopError::unknown_field(s))
    }
}

impl core::fmt::Display for DraftField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two checkout screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutForm {
    /// Payment method + delivery address.
    Order,
    /// Email + phone.
    Contacts,
}

impl CheckoutForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutForm::Order => "order",
            CheckoutForm::Contacts => "contacts",
        }
    }

    /// Fields of this form, in the order their errors are listed.
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            CheckoutForm::Order => &[DraftField::Payment, DraftField::Address],
            CheckoutForm::Contacts => &[DraftField::Phone, DraftField::Email],
        }
    }

    /// Name of the per-field change event, e.g. `order.address:change`.
    pub fn field_event_name(&self, field: DraftField) -> String {
        format!("{}.{}:change", self.as_str(), field.as_str())
    }
}

/// In-progress checkout input.
///
/// A field is "filled" when it is non-empty; whitespace counts as input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDraft {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl ValueObject for CheckoutDraft {}

impl CheckoutDraft {
    /// Store raw form input for `field`.
    ///
    /// A payment value that is not a known method leaves the payment unset,
    /// so the draft reports it as missing instead of carrying junk.
    pub fn set(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Payment => {
                self.payment = if value.is_empty() {
                    None
                } else {
                    match value.parse() {
                        Ok(method) => Some(method),
                        Err(err) => {
                            tracing::warn!(value, error = %err, "ignoring payment input");
                            None
                        }
                    }
                };
            }
            DraftField::Address => self.address = value.to_string(),
            DraftField::Email => self.email = value.to_string(),
            DraftField::Phone => self.phone = value.to_string(),
        }
    }

    /// Current value of `field` as the form would display it.
    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Payment => self.payment.map(|p| p.as_str()).unwrap_or(""),
            DraftField::Address => &self.address,
            DraftField::Email => &self.email,
            DraftField::Phone => &self.phone,
        }
    }

    pub fn is_filled(&self, field: DraftField) -> bool {
        !self.value(field).is_empty()
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
