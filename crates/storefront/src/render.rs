//! View data handed to a [`Renderer`].
//!
//! Views are plain values built from `ShopState` snapshots. A renderer draws
//! them however it likes and never reaches back into the state.

use shopfront_catalog::{Catalog, Product};
use shopfront_checkout::{CheckoutForm, PaymentMethod, ValidationErrors};
use shopfront_core::ProductId;

pub const BUY_LABEL: &str = "Купить";
pub const REMOVE_LABEL: &str = "Убрать";

/// A catalog card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub category: String,
    pub price: Option<u64>,
}

impl From<&Product> for CardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            price: product.price,
        }
    }
}

/// A card opened in the modal, with its basket button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub card: CardView,
    pub description: String,
    pub button: &'static str,
    /// `false` for price-less products; the button is shown disabled.
    pub can_buy: bool,
}

impl PreviewView {
    pub fn new(product: &Product, in_basket: bool) -> Self {
        Self {
            card: CardView::from(product),
            description: product.description.clone(),
            button: if in_basket { REMOVE_LABEL } else { BUY_LABEL },
            can_buy: product.is_purchasable(),
        }
    }
}

/// One basket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketLineView {
    /// 1-based position in the basket.
    pub index: usize,
    pub id: ProductId,
    pub title: String,
    pub price: Option<u64>,
    /// `false` when the id is no longer in the catalog.
    pub available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasketView {
    pub lines: Vec<BasketLineView>,
    pub total: u64,
}

impl BasketView {
    pub fn new(catalog: &Catalog, items: &[ProductId], total: u64) -> Self {
        let lines = items
            .iter()
            .enumerate()
            .map(|(i, id)| match catalog.find(id) {
                Some(product) => BasketLineView {
                    index: i + 1,
                    id: id.clone(),
                    title: product.title.clone(),
                    price: product.price,
                    available: true,
                },
                None => BasketLineView {
                    index: i + 1,
                    id: id.clone(),
                    title: id.to_string(),
                    price: None,
                    available: false,
                },
            })
            .collect();
        Self { lines, total }
    }

    /// Checkout is offered only for a non-empty basket.
    pub fn can_checkout(&self) -> bool {
        !self.lines.is_empty()
    }
}

/// Validity of one checkout form and its joined error text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    pub valid: bool,
    pub errors: String,
}

impl FormStatus {
    /// A freshly opened form: not submittable, nothing reported yet.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn of(errors: &ValidationErrors, form: CheckoutForm) -> Self {
        Self {
            valid: errors.form_valid(form),
            errors: errors.joined(form),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessView {
    pub total: u64,
}

/// What the modal currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    Preview(PreviewView),
    Basket(BasketView),
    Form { form: CheckoutForm, status: FormStatus },
    Success(SuccessView),
}

/// Display sink driven by the storefront.
///
/// Methods take `&self`; implementations that keep state use interior
/// mutability, like the rest of the single-threaded core.
pub trait Renderer {
    fn render_catalog(&self, cards: Vec<CardView>);
    fn set_basket_counter(&self, count: usize);
    fn render_basket(&self, basket: BasketView);
    fn open_modal(&self, content: ModalContent);
    fn close_modal(&self);
    fn update_form(&self, form: CheckoutForm, status: FormStatus);
    fn select_payment(&self, payment: Option<PaymentMethod>);
    fn report_error(&self, message: &str);
}
