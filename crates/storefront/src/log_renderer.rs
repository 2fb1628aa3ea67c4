use shopfront_checkout::{CheckoutForm, PaymentMethod};

use crate::render::{BasketView, CardView, FormStatus, ModalContent, Renderer};

/// Renders every view as a `tracing` event under `shopfront::render`.
///
/// Used by the `shopfront` binary, which has no display surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render_catalog(&self, cards: Vec<CardView>) {
        for card in &cards {
            tracing::info!(
                target: "shopfront::render",
                id = %card.id,
                title = %card.title,
                category = %card.category,
                price = ?card.price,
                "card"
            );
        }
        tracing::info!(target: "shopfront::render", cards = cards.len(), "catalog rendered");
    }

    fn set_basket_counter(&self, count: usize) {
        tracing::info!(target: "shopfront::render", count, "basket counter");
    }

    fn render_basket(&self, basket: BasketView) {
        for line in &basket.lines {
            tracing::info!(
                target: "shopfront::render",
                index = line.index,
                id = %line.id,
                title = %line.title,
                price = ?line.price,
                available = line.available,
                "basket line"
            );
        }
        tracing::info!(target: "shopfront::render", total = basket.total, "basket rendered");
    }

    fn open_modal(&self, content: ModalContent) {
        tracing::info!(target: "shopfront::render", content = ?content, "modal opened");
    }

    fn close_modal(&self) {
        tracing::info!(target: "shopfront::render", "modal closed");
    }

    fn update_form(&self, form: CheckoutForm, status: FormStatus) {
        tracing::info!(
            target: "shopfront::render",
            form = form.as_str(),
            valid = status.valid,
            errors = %status.errors,
            "form updated"
        );
    }

    fn select_payment(&self, payment: Option<PaymentMethod>) {
        tracing::info!(
            target: "shopfront::render",
            payment = payment.map(|p| p.label()).unwrap_or("-"),
            "payment selected"
        );
    }

    fn report_error(&self, message: &str) {
        tracing::error!(target: "shopfront::render", message, "error shown to user");
    }
}
